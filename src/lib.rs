#[cfg(feature = "desktop")]
mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, ErrorKind};
pub use services::classifier::artifacts::{ArtifactState, ArtifactStore, Artifacts};

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::{Emitter, Manager};
    use tracing::{error, info, warn};

    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Falling back to default configuration: {}", e);
        AppConfig::default()
    });
    logging::init(&config.log_filter);
    info!(model_dir = %config.model_dir.display(), "starting student outcome predictor");

    tauri::Builder::default()
        .plugin(tauri_plugin_window_state::Builder::default().build())
        .setup(move |app| {
            let store = ArtifactStore::new(config.model_dir.clone());
            app.manage(store.clone());

            // Load the artifacts once up front; later commands reuse the outcome.
            let app_handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                let status = store.status().await;
                if status.available {
                    info!(model_dir = %status.model_dir, "model artifacts ready");
                } else if let Some(ref cause) = status.error {
                    error!(model_dir = %status.model_dir, %cause, "failed to load model artifacts");
                } else {
                    warn!(model_dir = %status.model_dir, missing = ?status.missing, "model artifacts missing");
                }
                let _ = app_handle.emit("artifacts-status", status);
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::classifier::get_artifact_status,
            commands::classifier::predict_status,
            commands::form::get_form_schema,
            commands::form::get_app_info,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
