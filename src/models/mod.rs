pub mod classify_types;
pub mod feature_types;
pub mod form_types;
