pub mod result;
pub mod risk;
pub mod thresholds;
pub mod variant;
