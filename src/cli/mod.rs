pub mod commands;
pub mod flatten;
pub mod shell;
pub mod validate;
pub mod view;

pub use commands::{Cli, Commands};
