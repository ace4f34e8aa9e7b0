use std::path::PathBuf;

use crate::cli::commands::ValidateArgs;
use crate::config::{parse_config, ViewSettings};
use crate::errors::ScanlensError;

pub fn handle_validate(args: ValidateArgs) -> Result<(), ScanlensError> {
    let path = PathBuf::from(&args.file);
    let config = parse_config(&path)?;
    let settings = ViewSettings::from_config(&config);
    println!("Configuration is valid: {}", args.file);
    println!(
        "  lookback {} days, separator '{}', {} severities",
        settings.lookback_days,
        settings.separator,
        settings.severities.len()
    );
    Ok(())
}
