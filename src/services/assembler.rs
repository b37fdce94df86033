use crate::error::AppError;
use crate::models::feature_types::{FeatureOrder, FeatureRecord};
use ndarray::Array2;

/// Lays the record out as a single row whose columns follow `order`.
/// Extra keys in the record are ignored; any missing key aborts.
pub fn assemble(record: &FeatureRecord, order: &FeatureOrder) -> Result<Array2<f64>, AppError> {
    let mut row = Vec::with_capacity(order.len());
    let mut missing = Vec::new();

    for name in order.names() {
        match record.get(name) {
            Some(value) => row.push(value.as_f64()),
            None => missing.push(name.clone()),
        }
    }

    if !missing.is_empty() {
        return Err(AppError::feature_mismatch(&missing, order.names()));
    }

    Array2::from_shape_vec((1, order.len()), row)
        .map_err(|e| AppError::from(format!("Failed to build feature row: {}", e)))
}
