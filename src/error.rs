use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ArtifactsUnavailable,
    ArtifactsCorrupt,
    FeatureMismatch,
    Scaling,
    Prediction,
    Decode,
    InvalidInput,
    Io,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expected_features: Vec<String>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        AppError {
            kind,
            message: message.into(),
            expected_features: Vec::new(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArtifactsUnavailable, message)
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArtifactsCorrupt, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn feature_mismatch(missing: &[String], expected: &[String]) -> Self {
        AppError {
            kind: ErrorKind::FeatureMismatch,
            message: format!(
                "Feature mismatch while ordering columns: missing {:?}. \
                 The submitted fields do not match the features the model was trained on. \
                 Expected features are: {:?}",
                missing, expected
            ),
            expected_features: expected.to_vec(),
        }
    }

    pub fn scaling(cause: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Scaling, format!("Error during scaling: {}", cause))
    }

    pub fn prediction(cause: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Prediction, format!("Error during prediction: {}", cause))
    }

    pub fn decode(cause: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Decode, format!("Error while decoding the predicted label: {}", cause))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::new(ErrorKind::Io, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::new(ErrorKind::Internal, err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::invalid_input(format!("Invalid configuration file: {}", err))
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::new(ErrorKind::Internal, msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::new(ErrorKind::Internal, msg)
    }
}
