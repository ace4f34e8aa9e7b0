use std::path::PathBuf;

use tracing::info;

use crate::cli::commands::FlattenArgs;
use crate::config::ViewSettings;
use crate::errors::ScanlensError;
use crate::ingest::json::read_json_records;
use crate::ingest::{flattener_for, read_input, Flattener};

pub fn handle_flatten(args: FlattenArgs, settings: ViewSettings) -> Result<(), ScanlensError> {
    let mut options = settings.load_options();
    if let Some(sep) = args.separator {
        if sep.is_empty() {
            return Err(ScanlensError::InvalidInput("Separator must not be empty".into()));
        }
        options.separator = sep;
    }

    let flattener = match args.kind {
        Some(kind) => flattener_for(kind, &options),
        None => Flattener::new(options.separator.clone()),
    };

    let path = PathBuf::from(&args.file);
    let content = read_input(&path, options.max_input_bytes)?;
    let records = read_json_records(&content, &flattener)?;
    info!(path = %path.display(), records = records.len(), "Flattened records");

    for record in &records {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}
