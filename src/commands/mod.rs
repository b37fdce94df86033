pub mod classifier;
pub mod form;
