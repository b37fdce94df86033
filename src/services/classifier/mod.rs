pub mod artifacts;
pub mod forest;
pub mod inference;
pub mod label_encoder;
pub mod scaler;
