pub mod parser;
pub mod schema;
pub mod settings;
pub mod types;

pub use types::*;
pub use parser::{discover_config, parse_config, parse_config_str, DEFAULT_CONFIG_PATH};
pub use settings::ViewSettings;
