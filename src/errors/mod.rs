pub mod types;
pub mod classification;

pub use types::ScanlensError;
pub use classification::ErrorClassification;
