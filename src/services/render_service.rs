use crate::models::classify_types::{PredictionResult, RenderedPrediction, RenderedProbability, Tone};

pub fn tone_for(label: &str) -> Tone {
    match label {
        "Dropout" => Tone::Negative,
        "Graduate" => Tone::Positive,
        _ => Tone::Neutral,
    }
}

/// `0.1234` → `"12.34%"`.
pub fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

pub fn render(result: &PredictionResult) -> RenderedPrediction {
    RenderedPrediction {
        label: result.label.clone(),
        tone: tone_for(&result.label),
        status_line: format!("Predicted status: {}", result.label),
        probabilities: result
            .probabilities
            .iter()
            .map(|p| RenderedProbability {
                class_name: p.class_name.clone(),
                probability: p.probability,
                percent: format_percent(p.probability),
            })
            .collect(),
    }
}

/// Plain-text table, logged at debug level for each submission.
pub fn render_text(rendered: &RenderedPrediction) -> String {
    let width = rendered
        .probabilities
        .iter()
        .map(|p| p.class_name.len())
        .max()
        .unwrap_or(0);
    let mut out = format!("{}\n", rendered.status_line);
    for p in &rendered.probabilities {
        out.push_str(&format!("  {:<width$}  {:>7}\n", p.class_name, p.percent, width = width));
    }
    out
}
