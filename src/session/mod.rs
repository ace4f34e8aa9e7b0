pub mod cache;
pub mod state;

pub use cache::{CachedUpload, UploadCache};
pub use state::{Page, UploadOutcome, ViewSession};
