use serde::Serialize;

#[derive(Debug, Serialize, Clone)]
pub struct ArtifactStatus {
    pub available: bool,
    pub model_dir: String,
    pub missing: Vec<String>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ClassProbability {
    pub class_name: String,
    pub probability: f64,
}

/// Outcome of one submission: the decoded label plus one probability per
/// class, ordered like the encoder's known classes.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PredictionResult {
    pub label: String,
    pub probabilities: Vec<ClassProbability>,
}

impl PredictionResult {
    pub fn probability_of(&self, class_name: &str) -> Option<f64> {
        self.probabilities
            .iter()
            .find(|p| p.class_name == class_name)
            .map(|p| p.probability)
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Negative,
    Positive,
    Neutral,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RenderedProbability {
    pub class_name: String,
    pub probability: f64,
    pub percent: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RenderedPrediction {
    pub label: String,
    pub tone: Tone,
    pub status_line: String,
    pub probabilities: Vec<RenderedProbability>,
}
