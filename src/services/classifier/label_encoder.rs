use crate::error::AppError;
use serde::Deserialize;

/// Maps encoded target ids back to class names; id `i` is `classes[i]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawEncoder")]
pub struct LabelEncoder {
    classes: Vec<String>,
}

#[derive(Deserialize)]
struct RawEncoder {
    classes: Vec<String>,
}

impl TryFrom<RawEncoder> for LabelEncoder {
    type Error = String;

    fn try_from(raw: RawEncoder) -> Result<Self, Self::Error> {
        LabelEncoder::new(raw.classes)
    }
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, String> {
        if classes.is_empty() {
            return Err("label encoder has no classes".to_string());
        }
        Ok(Self { classes })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn inverse_transform(&self, encoded: i64) -> Result<&str, AppError> {
        usize::try_from(encoded)
            .ok()
            .and_then(|idx| self.classes.get(idx))
            .map(String::as_str)
            .ok_or_else(|| {
                AppError::decode(format!(
                    "y contains previously unseen label {} (known: 0..{})",
                    encoded,
                    self.classes.len()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> LabelEncoder {
        LabelEncoder::new(vec!["Dropout".into(), "Enrolled".into(), "Graduate".into()]).unwrap()
    }

    #[test]
    fn decodes_known_ids() {
        assert_eq!(encoder().inverse_transform(2).unwrap(), "Graduate");
        assert_eq!(encoder().inverse_transform(0).unwrap(), "Dropout");
    }

    #[test]
    fn unseen_ids_fail_to_decode() {
        assert_eq!(
            encoder().inverse_transform(3).unwrap_err().kind,
            crate::error::ErrorKind::Decode
        );
        assert!(encoder().inverse_transform(-1).is_err());
    }

    #[test]
    fn empty_class_list_is_rejected() {
        assert!(serde_json::from_str::<LabelEncoder>(r#"{"classes": []}"#).is_err());
    }
}
