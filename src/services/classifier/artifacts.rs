use crate::error::AppError;
use crate::models::classify_types::ArtifactStatus;
use crate::models::feature_types::FeatureOrder;
use crate::models::form_types::ArtifactFile;
use crate::services::classifier::forest::{Classifier, RandomForest};
use crate::services::classifier::label_encoder::LabelEncoder;
use crate::services::classifier::scaler::StandardScaler;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;
use tracing::{info, warn};

pub const MODEL_FILE: &str = "dropout_model.json";
pub const SCALER_FILE: &str = "dropout_scaler.json";
pub const FEATURES_FILE: &str = "features_list.json";
pub const ENCODER_FILE: &str = "target_encoder.json";

pub const REQUIRED_FILES: &[ArtifactFile] = &[
    ArtifactFile {
        file_name: MODEL_FILE,
        description: "Trained random forest classifier",
    },
    ArtifactFile {
        file_name: SCALER_FILE,
        description: "Fitted standard scaler",
    },
    ArtifactFile {
        file_name: FEATURES_FILE,
        description: "Feature names in training order",
    },
    ArtifactFile {
        file_name: ENCODER_FILE,
        description: "Fitted label encoder for the target classes",
    },
];

/// Everything needed to score one submission. Read-only once built.
pub struct Artifacts {
    pub classifier: Box<dyn Classifier>,
    pub scaler: StandardScaler,
    pub feature_order: FeatureOrder,
    pub encoder: LabelEncoder,
}

impl fmt::Debug for Artifacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifacts")
            .field("classifier_features", &self.classifier.n_features())
            .field("classifier_classes", &self.classifier.classes())
            .field("scaler_features", &self.scaler.n_features())
            .field("feature_order", &self.feature_order)
            .field("encoder", &self.encoder)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum ArtifactState {
    Ready(Arc<Artifacts>),
    Unavailable { missing: Vec<String> },
    Corrupt { cause: String },
}

impl ArtifactState {
    pub fn is_available(&self) -> bool {
        matches!(self, ArtifactState::Ready(_))
    }

    /// The loaded bundle, or the error the UI should show instead of the form.
    pub fn ready(&self) -> Result<Arc<Artifacts>, AppError> {
        match self {
            ArtifactState::Ready(artifacts) => Ok(artifacts.clone()),
            ArtifactState::Unavailable { missing } => Err(AppError::unavailable(format!(
                "One or more model files were not found: {}. Make sure {}, {}, {} and {} are present in the model directory.",
                missing.join(", "),
                MODEL_FILE,
                SCALER_FILE,
                FEATURES_FILE,
                ENCODER_FILE
            ))),
            ArtifactState::Corrupt { cause } => Err(AppError::corrupt(format!(
                "An error occurred while loading the model: {}",
                cause
            ))),
        }
    }
}

pub fn missing_files(model_dir: &Path) -> Vec<String> {
    REQUIRED_FILES
        .iter()
        .filter(|f| !model_dir.join(f.file_name).exists())
        .map(|f| f.file_name.to_string())
        .collect()
}

fn read_artifact<T: DeserializeOwned>(model_dir: &Path, file_name: &str) -> Result<T, AppError> {
    let path = model_dir.join(file_name);
    let content = std::fs::read_to_string(&path)
        .map_err(|e| AppError::corrupt(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| AppError::corrupt(format!("Failed to parse {}: {}", path.display(), e)))
}

fn read_all(model_dir: &Path) -> Result<Artifacts, AppError> {
    let classifier: RandomForest = read_artifact(model_dir, MODEL_FILE)?;
    let scaler: StandardScaler = read_artifact(model_dir, SCALER_FILE)?;
    let feature_order: FeatureOrder = read_artifact(model_dir, FEATURES_FILE)?;
    let encoder: LabelEncoder = read_artifact(model_dir, ENCODER_FILE)?;

    if feature_order.is_empty() {
        return Err(AppError::corrupt(format!("{} lists no features", FEATURES_FILE)));
    }

    info!(
        trees = classifier.n_trees(),
        features = feature_order.len(),
        classes = ?encoder.classes(),
        "model artifacts loaded"
    );

    Ok(Artifacts {
        classifier: Box::new(classifier),
        scaler,
        feature_order,
        encoder,
    })
}

/// Reads the four artifacts from `model_dir`. Never fails: problems become
/// `Unavailable` (files absent) or `Corrupt` (files unreadable).
pub fn load_artifacts(model_dir: &Path) -> ArtifactState {
    let missing = missing_files(model_dir);
    if !missing.is_empty() {
        warn!(model_dir = %model_dir.display(), ?missing, "model artifacts unavailable");
        return ArtifactState::Unavailable { missing };
    }

    match read_all(model_dir) {
        Ok(artifacts) => ArtifactState::Ready(Arc::new(artifacts)),
        Err(e) => {
            warn!(model_dir = %model_dir.display(), error = %e, "model artifacts corrupt");
            ArtifactState::Corrupt { cause: e.message }
        }
    }
}

/// Process-wide, load-once holder for the artifact bundle. Cloning shares
/// the same underlying cell.
#[derive(Clone)]
pub struct ArtifactStore {
    model_dir: PathBuf,
    state: Arc<OnceCell<ArtifactState>>,
}

impl ArtifactStore {
    pub fn new(model_dir: PathBuf) -> Self {
        Self {
            model_dir,
            state: Arc::new(OnceCell::new()),
        }
    }

    /// A store whose outcome is already decided, e.g. a bundle built in memory.
    pub fn preloaded(model_dir: PathBuf, state: ArtifactState) -> Self {
        Self {
            model_dir,
            state: Arc::new(OnceCell::new_with(Some(state))),
        }
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    pub fn is_loaded(&self) -> bool {
        self.state.initialized()
    }

    pub async fn state(&self) -> &ArtifactState {
        self.state
            .get_or_init(|| async {
                let dir = self.model_dir.clone();
                let started = Instant::now();
                let state = tokio::task::spawn_blocking(move || load_artifacts(&dir))
                    .await
                    .unwrap_or_else(|e| ArtifactState::Corrupt {
                        cause: format!("Failed to spawn model loading task: {}", e),
                    });
                info!(
                    available = state.is_available(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "artifact load finished"
                );
                state
            })
            .await
    }

    pub async fn ready(&self) -> Result<Arc<Artifacts>, AppError> {
        self.state().await.ready()
    }

    pub async fn status(&self) -> ArtifactStatus {
        let state = self.state().await;
        let (missing, error) = match state {
            ArtifactState::Ready(_) => (Vec::new(), None),
            ArtifactState::Unavailable { missing } => (missing.clone(), None),
            ArtifactState::Corrupt { cause } => (Vec::new(), Some(cause.clone())),
        };
        ArtifactStatus {
            available: state.is_available(),
            model_dir: self.model_dir.display().to_string(),
            missing,
            error,
        }
    }
}
