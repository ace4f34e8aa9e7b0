use std::path::{Path, PathBuf};

use super::schema::CONFIG_SCHEMA;
use super::types::ScanlensConfig;
use crate::errors::ScanlensError;
use tracing::{debug, warn};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = ".scanlens/config.yaml";

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub fn parse_config(path: &Path) -> Result<ScanlensConfig, ScanlensError> {
    if !path.exists() {
        return Err(ScanlensError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(ScanlensError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = std::fs::read_to_string(path)?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<ScanlensConfig, ScanlensError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    // An empty file parses to null
    let yaml = match yaml {
        serde_yaml::Value::Null => serde_yaml::Value::Mapping(Default::default()),
        other => other,
    };

    validate_schema(&yaml)?;

    let config: ScanlensConfig = serde_yaml::from_value(yaml)?;

    validate_values(&config)?;

    Ok(config)
}

/// Load the explicit config path, else the default path if present, else defaults.
pub fn discover_config(explicit: Option<&Path>) -> Result<ScanlensConfig, ScanlensError> {
    if let Some(path) = explicit {
        return parse_config(path);
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
    if fallback.exists() {
        debug!(path = %fallback.display(), "Using default config file");
        return parse_config(&fallback);
    }
    Ok(ScanlensConfig::default())
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), ScanlensError> {
    let json_value: serde_json::Value = serde_json::to_value(yaml)
        .map_err(|e| ScanlensError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| ScanlensError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only; typed parsing and value checks below are authoritative
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

/// Reject values that parse but cannot be used.
fn validate_values(config: &ScanlensConfig) -> Result<(), ScanlensError> {
    if let Some(sep) = config.flatten.as_ref().and_then(|f| f.separator.as_ref()) {
        if sep.is_empty() {
            return Err(ScanlensError::Config("flatten.separator must not be empty".into()));
        }
    }

    if let Some(days) = config.window.as_ref().and_then(|w| w.lookback_days) {
        if days > 3650 {
            return Err(ScanlensError::Config(format!(
                "window.lookback_days must be at most 3650, got {}",
                days
            )));
        }
    }

    if let Some(render) = &config.render {
        if render.cell_width.map_or(false, |w| w < 4) {
            return Err(ScanlensError::Config("render.cell_width must be at least 4".into()));
        }
        if render.bar_width == Some(0) {
            return Err(ScanlensError::Config("render.bar_width must be at least 1".into()));
        }
    }

    if config.limits.as_ref().and_then(|l| l.max_input_bytes) == Some(0) {
        return Err(ScanlensError::Config("limits.max_input_bytes must be at least 1".into()));
    }

    if let Some(levels) = config.reports.as_ref().and_then(|r| r.severities.as_ref()) {
        if levels.is_empty() {
            return Err(ScanlensError::Config("reports.severities must list at least one level".into()));
        }
        for (i, level) in levels.iter().enumerate() {
            if levels[..i].iter().any(|l| l.eq_ignore_ascii_case(level)) {
                return Err(ScanlensError::Config(format!(
                    "Duplicate severity level '{}' in reports.severities",
                    level
                )));
            }
        }
    }

    Ok(())
}
