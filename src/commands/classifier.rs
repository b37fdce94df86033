use crate::error::AppError;
use crate::models::classify_types::{ArtifactStatus, RenderedPrediction};
use crate::models::feature_types::FeatureValue;
use crate::services::classifier::artifacts::ArtifactStore;
use crate::services::prediction_service;
use std::collections::HashMap;
use tauri::State;

#[tauri::command]
pub async fn get_artifact_status(store: State<'_, ArtifactStore>) -> Result<ArtifactStatus, AppError> {
    Ok(store.status().await)
}

#[tauri::command]
pub async fn predict_status(
    store: State<'_, ArtifactStore>,
    values: HashMap<String, FeatureValue>,
) -> Result<RenderedPrediction, AppError> {
    prediction_service::predict_submission(store.inner(), &values).await
}
