use crate::error::{AppError, ErrorKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "STUDENT_OUTCOME_CONFIG";
pub const MODEL_DIR_ENV: &str = "STUDENT_OUTCOME_MODEL_DIR";
pub const LOG_ENV: &str = "STUDENT_OUTCOME_LOG";
pub const DEFAULT_CONFIG_FILE: &str = "student-outcome.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub model_dir: PathBuf,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("model"),
            log_filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    model: Option<FileModelConfig>,
    log: Option<FileLogConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct FileModelConfig {
    dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileLogConfig {
    filter: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_non_empty(key: &str) -> Option<String> {
    non_empty(std::env::var(key).ok())
}

impl AppConfig {
    /// Defaults, then the TOML file (if any), then environment overrides.
    pub fn load() -> Result<Self, AppError> {
        let mut cfg = Self::default();
        if let Some(path) = resolve_config_path() {
            cfg.apply_file(&path)?;
        }
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn apply_file(&mut self, path: &Path) -> Result<(), AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorKind::Io,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;
        self.apply_toml(&raw)
    }

    pub fn apply_toml(&mut self, raw: &str) -> Result<(), AppError> {
        let file_cfg: FileConfig = toml::from_str(raw)?;
        if let Some(dir) = non_empty(file_cfg.model.and_then(|m| m.dir)) {
            self.model_dir = PathBuf::from(dir);
        }
        if let Some(filter) = non_empty(file_cfg.log.and_then(|l| l.filter)) {
            self.log_filter = filter;
        }
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(v) = env_non_empty(MODEL_DIR_ENV) {
            self.model_dir = PathBuf::from(v);
        }
        if let Some(v) = env_non_empty(LOG_ENV) {
            self.log_filter = v;
        }
    }
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Some(path) = env_non_empty(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.exists().then_some(local)
}
