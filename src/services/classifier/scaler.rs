use crate::error::AppError;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::Deserialize;

fn default_true() -> bool {
    true
}

/// Standardization fitted upstream: `(x - mean) / scale` per column.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawScaler")]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
    with_mean: bool,
    with_std: bool,
}

#[derive(Deserialize)]
struct RawScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
    #[serde(default = "default_true")]
    with_mean: bool,
    #[serde(default = "default_true")]
    with_std: bool,
}

impl TryFrom<RawScaler> for StandardScaler {
    type Error = String;

    fn try_from(raw: RawScaler) -> Result<Self, Self::Error> {
        StandardScaler::new(raw.mean, raw.scale, raw.with_mean, raw.with_std)
    }
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>, with_mean: bool, with_std: bool) -> Result<Self, String> {
        if mean.len() != scale.len() {
            return Err(format!(
                "scaler mean has {} columns but scale has {}",
                mean.len(),
                scale.len()
            ));
        }
        // A constant training column has zero spread; it is left unscaled.
        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect::<Vec<_>>();
        Ok(Self {
            mean: Array1::from(mean),
            scale: Array1::from(scale),
            with_mean,
            with_std,
        })
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, table: ArrayView2<'_, f64>) -> Result<Array2<f64>, AppError> {
        if table.ncols() != self.n_features() {
            return Err(AppError::scaling(format!(
                "X has {} features, but the scaler is expecting {} features as input",
                table.ncols(),
                self.n_features()
            )));
        }

        let mut out = table.to_owned();
        for mut row in out.axis_iter_mut(Axis(0)) {
            if self.with_mean {
                row -= &self.mean;
            }
            if self.with_std {
                row /= &self.scale;
            }
        }
        Ok(out)
    }
}
