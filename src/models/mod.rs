pub mod record;
pub mod report_kind;
pub mod scalar;
pub mod summary;
pub mod window;

pub use record::*;
pub use report_kind::*;
pub use scalar::*;
pub use summary::*;
pub use window::*;
