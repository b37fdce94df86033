use serde::Serialize;

#[derive(Debug, Serialize, Clone, Copy)]
pub struct Choice {
    pub code: i64,
    pub label: &'static str,
}

#[derive(Debug, Serialize, Clone, Copy)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    Select {
        choices: &'static [Choice],
        default: i64,
        show_code: bool,
    },
    Integer {
        min: i64,
        max: i64,
        default: i64,
    },
    Decimal {
        min: f64,
        max: f64,
        default: f64,
        step: f64,
    },
}

#[derive(Debug, Serialize, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub help: Option<&'static str>,
    pub control: Control,
}

#[derive(Debug, Serialize, Clone, Copy)]
pub struct FieldGroup {
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

#[derive(Debug, Serialize, Clone, Copy)]
pub struct FormSchema {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub groups: &'static [FieldGroup],
}

#[derive(Debug, Serialize, Clone, Copy)]
pub struct ArtifactFile {
    pub file_name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize, Clone)]
pub struct AppInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub usage: &'static [&'static str],
    pub model_dir: String,
    pub required_files: &'static [ArtifactFile],
}
