use serde_json::Value;

use super::flatten::Flattener;
use crate::errors::ScanlensError;
use crate::models::FlatRecord;

/// Parse a JSON export into flattened records.
///
/// The export is normally an array of objects. An object wrapping exactly one
/// array (e.g. `{"findings": [...]}`) is unwrapped first.
pub fn read_json_records(content: &str, flattener: &Flattener) -> Result<Vec<FlatRecord>, ScanlensError> {
    let value: Value = serde_json::from_str(content)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) if map.len() == 1 => {
            let key = map.keys().next().cloned().unwrap_or_default();
            match map.remove(&key) {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(ScanlensError::InvalidInput(format!(
                        "expected a JSON array of records, found an object with key '{}'",
                        key
                    )))
                }
            }
        }
        _ => {
            return Err(ScanlensError::InvalidInput(
                "expected a JSON array of records".into(),
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            flattener.flatten(item).map_err(|e| match e {
                ScanlensError::InvalidInput(msg) => {
                    ScanlensError::InvalidInput(format!("record {}: {}", i + 1, msg))
                }
                other => other,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scalar;

    #[test]
    fn test_reads_array_of_records() {
        let records = read_json_records(
            r#"[{"id": 1, "rule": {"name": "a"}}, {"id": 2}]"#,
            &Flattener::default(),
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("rule.name"), Some(&Scalar::from("a")));
    }

    #[test]
    fn test_unwraps_single_key_envelope() {
        let records = read_json_records(
            r#"{"findings": [{"severity": "HIGH"}]}"#,
            &Flattener::default(),
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text("severity").as_deref(), Some("HIGH"));
    }

    #[test]
    fn test_empty_array_is_empty() {
        let records = read_json_records("[]", &Flattener::default()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_non_object_record_names_position() {
        let err = read_json_records(r#"[{"a": 1}, 5]"#, &Flattener::default()).unwrap_err();
        assert!(matches!(err, ScanlensError::InvalidInput(ref m) if m.starts_with("record 2")));
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        assert!(matches!(
            read_json_records("42", &Flattener::default()),
            Err(ScanlensError::InvalidInput(_))
        ));
        assert!(matches!(
            read_json_records("{not json", &Flattener::default()),
            Err(ScanlensError::Json(_))
        ));
    }
}
