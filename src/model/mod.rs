pub mod aliquot;
pub mod measurement;
pub mod status;
pub mod thresholds;
