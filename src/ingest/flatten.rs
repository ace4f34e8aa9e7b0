//! Nested-record flattening.
//!
//! Objects extend the path with `<sep><key>`, lists of objects with `[i]`.
//! Lists made only of scalars collapse into one value joined by the
//! separator. Empty objects and empty lists produce nothing.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::errors::ScanlensError;
use crate::models::{FlatRecord, Scalar};

pub const DEFAULT_SEPARATOR: &str = ".";

#[derive(Debug, Clone)]
pub struct Flattener {
    separator: String,
    /// Paths whose single-element scalar lists keep the bare scalar.
    unwrapped: HashSet<String>,
}

impl Default for Flattener {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

impl Flattener {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            unwrapped: HashSet::new(),
        }
    }

    pub fn with_unwrapped<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unwrapped.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Flatten one record. The record itself must be a JSON object.
    pub fn flatten(&self, value: &Value) -> Result<FlatRecord, ScanlensError> {
        match value {
            Value::Object(map) => Ok(self.flatten_object(map)),
            other => Err(ScanlensError::InvalidInput(format!(
                "expected a JSON object, found {}",
                json_type(other)
            ))),
        }
    }

    pub fn flatten_object(&self, map: &Map<String, Value>) -> FlatRecord {
        let mut out = FlatRecord::new();
        for (key, value) in map {
            self.flatten_value(key.clone(), value, &mut out);
        }
        out
    }

    fn flatten_value(&self, path: String, value: &Value, out: &mut FlatRecord) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let child_path = format!("{}{}{}", path, self.separator, key);
                    self.flatten_value(child_path, child, out);
                }
            }
            Value::Array(items) => self.flatten_list(path, items, out),
            leaf => {
                if let Some(scalar) = Scalar::from_json(leaf) {
                    out.insert(path, scalar);
                }
            }
        }
    }

    fn flatten_list(&self, path: String, items: &[Value], out: &mut FlatRecord) {
        if items.is_empty() {
            return;
        }

        let scalars: Option<Vec<Scalar>> = items.iter().map(Scalar::from_json).collect();
        match scalars {
            Some(mut scalars) => {
                if scalars.len() == 1 && self.unwrapped.contains(&path) {
                    out.insert(path, scalars.remove(0));
                    return;
                }
                let joined = scalars
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(&self.separator);
                out.insert(path, Scalar::Text(joined));
            }
            None => {
                for (i, item) in items.iter().enumerate() {
                    self.flatten_value(format!("{}[{}]", path, i), item, out);
                }
            }
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
