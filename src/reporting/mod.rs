pub mod assembler;
pub mod chart;
pub mod formatter;

pub use assembler::{render_page, render_page_json, EMPTY_FILE_MESSAGE, NO_DATA_MESSAGE, WAITING_MESSAGE};
