use crate::models::form_types::{AppInfo, FormSchema};
use crate::services::classifier::artifacts::ArtifactStore;
use crate::services::{form_service, prediction_service};
use tauri::State;

#[tauri::command]
pub fn get_form_schema() -> FormSchema {
    *form_service::schema()
}

#[tauri::command]
pub fn get_app_info(store: State<'_, ArtifactStore>) -> AppInfo {
    prediction_service::app_info(store.inner())
}
