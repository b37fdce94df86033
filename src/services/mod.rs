pub mod assembler;
pub mod classifier;
pub mod form_service;
pub mod prediction_service;
pub mod render_service;
