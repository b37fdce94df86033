use crate::error::AppError;
use crate::models::classify_types::RenderedPrediction;
use crate::models::feature_types::FeatureValue;
use crate::models::form_types::AppInfo;
use crate::services::classifier::artifacts::{ArtifactStore, REQUIRED_FILES};
use crate::services::classifier::inference;
use crate::services::{form_service, render_service};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const DESCRIPTION: &str = "Predicts a student's likely academic outcome: Dropout, Enrolled or Graduate. \
The prediction uses information available at enrollment and academic performance over the first two semesters.";

pub const USAGE: &[&str] = &[
    "Fill in every field of the form.",
    "Press \"Predict student status\".",
    "The predicted status and class probabilities are shown below the form.",
];

pub fn app_info(store: &ArtifactStore) -> AppInfo {
    AppInfo {
        title: form_service::schema().title,
        description: DESCRIPTION,
        usage: USAGE,
        model_dir: store.model_dir().display().to_string(),
        required_files: REQUIRED_FILES,
    }
}

/// One form submission end to end. Nothing is scored unless the artifacts
/// loaded; any stage failure returns that stage's error and no result.
pub async fn predict_submission(
    store: &ArtifactStore,
    values: &HashMap<String, FeatureValue>,
) -> Result<RenderedPrediction, AppError> {
    let artifacts = store.ready().await?;
    let record = form_service::collect(values)?;
    debug!(choices = %form_service::describe_choices(&record), "submission collected");

    let started = Instant::now();
    let result = inference::predict_record(&artifacts, &record).map_err(|e| {
        warn!(kind = ?e.kind, error = %e, "prediction aborted");
        e
    })?;
    let rendered = render_service::render(&result);
    debug!(table = %render_service::render_text(&rendered), "probability table");

    info!(
        label = %rendered.label,
        elapsed_us = started.elapsed().as_micros() as u64,
        "prediction rendered"
    );
    Ok(rendered)
}
