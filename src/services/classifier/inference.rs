use crate::error::AppError;
use crate::models::classify_types::{ClassProbability, PredictionResult};
use crate::models::feature_types::FeatureRecord;
use crate::services::assembler;
use crate::services::classifier::artifacts::Artifacts;
use ndarray::Array2;
use tracing::debug;

pub fn scale(artifacts: &Artifacts, row: &Array2<f64>) -> Result<Array2<f64>, AppError> {
    artifacts.scaler.transform(row.view())
}

/// Returns the encoded class and the distribution over the classifier's classes.
pub fn classify(artifacts: &Artifacts, scaled: &Array2<f64>) -> Result<(i64, Vec<f64>), AppError> {
    if scaled.nrows() != 1 {
        return Err(AppError::prediction(format!(
            "expected a single row, got {}",
            scaled.nrows()
        )));
    }
    artifacts
        .classifier
        .predict(scaled.row(0))
        .map_err(|e| match e.kind {
            crate::error::ErrorKind::Prediction => e,
            _ => AppError::prediction(e.message),
        })
}

pub fn decode(
    artifacts: &Artifacts,
    encoded: i64,
    probabilities: Vec<f64>,
) -> Result<PredictionResult, AppError> {
    let classes = artifacts.classifier.classes();
    if classes.len() != probabilities.len() {
        return Err(AppError::prediction(format!(
            "classifier returned {} probabilities for {} classes",
            probabilities.len(),
            classes.len()
        )));
    }

    let label = artifacts.encoder.inverse_transform(encoded)?.to_string();

    // Rows follow the encoder's class order, whatever order the classifier
    // reports its columns in. Every encoder class needs a column.
    let known = artifacts.encoder.classes();
    if classes.len() != known.len() {
        return Err(AppError::prediction(format!(
            "classifier knows {} classes but the label encoder has {}",
            classes.len(),
            known.len()
        )));
    }
    let probabilities = known
        .iter()
        .enumerate()
        .map(|(id, class_name)| {
            let column = classes
                .iter()
                .position(|&class| class == id as i64)
                .ok_or_else(|| {
                    AppError::prediction(format!(
                        "classifier has no probability for class {}",
                        class_name
                    ))
                })?;
            Ok(ClassProbability {
                class_name: class_name.clone(),
                probability: probabilities[column],
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(PredictionResult {
        label,
        probabilities,
    })
}

/// assemble → scale → classify → decode; the first failing stage aborts
/// the submission with its own error.
pub fn predict_record(artifacts: &Artifacts, record: &FeatureRecord) -> Result<PredictionResult, AppError> {
    let row = assembler::assemble(record, &artifacts.feature_order)?;
    let scaled = scale(artifacts, &row)?;
    let (encoded, probabilities) = classify(artifacts, &scaled)?;
    let result = decode(artifacts, encoded, probabilities)?;
    debug!(label = %result.label, "prediction computed");
    Ok(result)
}
