#![allow(dead_code)]

use ndarray::ArrayView1;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use student_outcome_lib::models::feature_types::{FeatureOrder, FeatureValue};
use student_outcome_lib::services::classifier::artifacts::{
    ENCODER_FILE, FEATURES_FILE, MODEL_FILE, SCALER_FILE,
};
use student_outcome_lib::services::classifier::forest::Classifier;
use student_outcome_lib::services::classifier::label_encoder::LabelEncoder;
use student_outcome_lib::services::classifier::scaler::StandardScaler;
use student_outcome_lib::services::form_service;
use student_outcome_lib::{AppError, Artifacts};

pub const CLASSES: [&str; 3] = ["Dropout", "Enrolled", "Graduate"];

/// Training order deliberately differs from the form's declaration order.
pub fn feature_names() -> Vec<String> {
    let mut names: Vec<String> = form_service::fields().map(|f| f.name.to_string()).collect();
    names.reverse();
    names
}

pub fn index_of(name: &str) -> usize {
    feature_names()
        .iter()
        .position(|n| n == name)
        .unwrap_or_else(|| panic!("{} is not a feature", name))
}

fn stump(feature: &str, threshold: f64, left: [f64; 3], right: [f64; 3]) -> serde_json::Value {
    json!({
        "children_left": [1, -1, -1],
        "children_right": [2, -1, -1],
        "feature": [index_of(feature), -2, -2],
        "threshold": [threshold, -2.0, -2.0],
        "value": [[0.0, 0.0, 0.0], left, right],
    })
}

pub fn model_json() -> serde_json::Value {
    json!({
        "n_features": feature_names().len(),
        "classes": [0, 1, 2],
        "trees": [
            stump("Curricular_units_2nd_sem_approved", 0.0, [8.0, 1.0, 1.0], [1.0, 1.0, 8.0]),
            stump("Tuition_fees_up_to_date", 0.5, [6.0, 2.0, 2.0], [1.0, 3.0, 6.0]),
            stump("Age_at_enrollment", 25.0, [1.0, 2.0, 7.0], [4.0, 4.0, 2.0]),
        ],
    })
}

/// Identity everywhere except the 2nd semester approved units column,
/// which is centred on 3 with spread 2.
pub fn scaler_json() -> serde_json::Value {
    let n = feature_names().len();
    let mut mean = vec![0.0; n];
    let mut scale = vec![1.0; n];
    let approved = index_of("Curricular_units_2nd_sem_approved");
    mean[approved] = 3.0;
    scale[approved] = 2.0;
    json!({ "mean": mean, "scale": scale })
}

pub fn write_json(dir: &Path, file_name: &str, value: &serde_json::Value) {
    std::fs::write(dir.join(file_name), serde_json::to_string_pretty(value).unwrap()).unwrap();
}

pub fn write_artifacts(dir: &Path) {
    write_json(dir, MODEL_FILE, &model_json());
    write_json(dir, SCALER_FILE, &scaler_json());
    write_json(dir, FEATURES_FILE, &json!(feature_names()));
    write_json(dir, ENCODER_FILE, &json!({ "classes": CLASSES }));
}

/// age 20, 6 enrolled / 5 approved units per semester, grade 12.0,
/// admission 120.0, unemployment 10, inflation 1, GDP 1, every flag 0
/// except tuition fees up to date.
pub fn graduate_values() -> HashMap<String, FeatureValue> {
    let mut values: HashMap<String, FeatureValue> = form_service::default_record()
        .iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    for (name, value) in [
        ("Age_at_enrollment", FeatureValue::Code(20)),
        ("Curricular_units_1st_sem_enrolled", FeatureValue::Code(6)),
        ("Curricular_units_1st_sem_approved", FeatureValue::Code(5)),
        ("Curricular_units_1st_sem_grade", FeatureValue::Measure(12.0)),
        ("Curricular_units_2nd_sem_enrolled", FeatureValue::Code(6)),
        ("Curricular_units_2nd_sem_approved", FeatureValue::Code(5)),
        ("Curricular_units_2nd_sem_grade", FeatureValue::Measure(12.0)),
        ("Admission_grade", FeatureValue::Measure(120.0)),
        ("Unemployment_rate", FeatureValue::Measure(10.0)),
        ("Inflation_rate", FeatureValue::Measure(1.0)),
        ("GDP", FeatureValue::Measure(1.0)),
        ("Displaced", FeatureValue::Code(0)),
        ("International", FeatureValue::Code(0)),
        ("Educational_special_needs", FeatureValue::Code(0)),
        ("Debtor", FeatureValue::Code(0)),
        ("Scholarship_holder", FeatureValue::Code(0)),
        ("Tuition_fees_up_to_date", FeatureValue::Code(1)),
    ] {
        values.insert(name.to_string(), value);
    }
    values
}

pub fn dropout_values() -> HashMap<String, FeatureValue> {
    let mut values = graduate_values();
    values.insert("Curricular_units_2nd_sem_approved".to_string(), FeatureValue::Code(0));
    values.insert("Tuition_fees_up_to_date".to_string(), FeatureValue::Code(0));
    values.insert("Age_at_enrollment".to_string(), FeatureValue::Code(30));
    values
}

/// Returns the same distribution for every row, with columns labelled by `classes`.
pub struct FixedClassifier {
    pub classes: Vec<i64>,
    pub probabilities: Vec<f64>,
}

impl Classifier for FixedClassifier {
    fn n_features(&self) -> usize {
        36
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict_proba(&self, _row: ArrayView1<'_, f64>) -> Result<Vec<f64>, AppError> {
        Ok(self.probabilities.clone())
    }
}

/// Identity scaler, reversed feature order and the three outcome classes
/// around a fixed classifier.
pub fn fixed_artifacts(classes: Vec<i64>, probabilities: Vec<f64>) -> Artifacts {
    Artifacts {
        classifier: Box::new(FixedClassifier { classes, probabilities }),
        scaler: StandardScaler::new(vec![0.0; 36], vec![1.0; 36], true, true).unwrap(),
        feature_order: FeatureOrder::new(feature_names()),
        encoder: LabelEncoder::new(CLASSES.iter().map(|c| c.to_string()).collect()).unwrap(),
    }
}
