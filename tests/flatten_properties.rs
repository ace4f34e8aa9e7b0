use scanlens::ingest::Flattener;
use scanlens::models::Scalar;
use serde_json::{json, Value};

fn leaves(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => map.values().for_each(|v| leaves(v, out)),
        Value::Array(items) => items.iter().for_each(|v| leaves(v, out)),
        Value::Null => {}
        other => out.push(Scalar::from_json(other).map(|s| s.to_string()).unwrap_or_default()),
    }
}

#[test]
fn flat_input_is_unchanged() {
    let record = json!({"id": 7, "severity": "high", "fixed": false, "note": null});
    let flat = Flattener::default().flatten(&record).unwrap();
    assert_eq!(serde_json::to_value(&flat).unwrap(), record);
}

#[test]
fn nested_example_record() {
    let flat = Flattener::default()
        .flatten(&json!({"a": {"b": 1}, "c": [1, 2]}))
        .unwrap();
    assert_eq!(serde_json::to_value(&flat).unwrap(), json!({"a.b": 1, "c": "1.2"}));
}

#[test]
fn no_scalar_leaf_is_lost() {
    let record = json!({
        "repository": {"name": "api", "owner": {"login": "platform", "id": 12}},
        "rule": {"cwe_names": ["CWE-89"], "confidence": "high"},
        "locations": [{"path": "src/db.rs", "line": 42}, {"path": "src/web.rs", "line": 42}],
        "created_at": "2024-03-01 09:00:00"
    });
    let flat = Flattener::default().flatten(&record).unwrap();

    let mut expected = Vec::new();
    leaves(&record, &mut expected);
    expected.sort();

    let mut values: Vec<String> = flat.iter().map(|(_, v)| v.to_string()).collect();
    values.sort();

    assert_eq!(values, expected);
    assert_eq!(flat.get("locations[1].line"), Some(&Scalar::from(42i64)));
}

#[test]
fn scalar_list_joins_every_item() {
    let flat = Flattener::default()
        .flatten(&json!({"rule": {"owasp_names": ["A03", "A01", "A03"]}}))
        .unwrap();
    assert_eq!(flat.len(), 1);
    assert_eq!(flat.text("rule.owasp_names").as_deref(), Some("A03.A01.A03"));
}

#[test]
fn single_element_list_has_no_artifact() {
    let flat = Flattener::default()
        .flatten(&json!({"rule": {"cwe_names": ["CWE-79: Cross-site Scripting"]}}))
        .unwrap();
    assert_eq!(
        flat.text("rule.cwe_names").as_deref(),
        Some("CWE-79: Cross-site Scripting")
    );
}

#[test]
fn custom_separator_applies_to_paths_and_joins() {
    let flat = Flattener::new("/")
        .flatten(&json!({"a": {"b": ["x", "y"]}}))
        .unwrap();
    assert_eq!(flat.text("a/b").as_deref(), Some("x/y"));
}
