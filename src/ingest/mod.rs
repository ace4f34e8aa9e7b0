pub mod flatten;
pub mod json;
pub mod tabular;
pub mod timestamp;

use std::path::Path;

use tracing::{debug, info};

use crate::errors::ScanlensError;
use crate::models::{column_name, FlatRecord, InputFormat, ReportKind, ReportTable, Scalar};

pub use flatten::{Flattener, DEFAULT_SEPARATOR};
pub use timestamp::{parse_timestamp, scalar_timestamp, TIMESTAMP_FORMAT};

pub const DEFAULT_MAX_INPUT_BYTES: u64 = 256 * 1024 * 1024;

const CREATED_AT: &str = "created_at";

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub separator: String,
    pub max_input_bytes: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// The flattener configured for one report kind.
pub fn flattener_for(kind: ReportKind, options: &LoadOptions) -> Flattener {
    let unwrapped = kind
        .unwrapped_columns()
        .iter()
        .map(|path| column_name(*path, &options.separator));
    Flattener::new(options.separator.clone()).with_unwrapped(unwrapped)
}

/// Read an input file, refusing anything over `max_bytes`.
pub fn read_input(path: &Path, max_bytes: u64) -> Result<String, ScanlensError> {
    if !path.exists() {
        return Err(ScanlensError::InvalidInput(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let metadata = std::fs::metadata(path)?;
    if metadata.len() > max_bytes {
        return Err(ScanlensError::InvalidInput(format!(
            "{} is {} bytes, over the {} byte limit",
            path.display(),
            metadata.len(),
            max_bytes
        )));
    }

    Ok(std::fs::read_to_string(path)?)
}

/// Read an export from disk into a report table.
pub fn load_report(kind: ReportKind, path: &Path, options: &LoadOptions) -> Result<ReportTable, ScanlensError> {
    let content = read_input(path, options.max_input_bytes)?;
    let table = parse_report(kind, &content, options)?;
    info!(
        kind = %kind,
        path = %path.display(),
        rows = table.len(),
        columns = table.columns().len(),
        "Loaded report"
    );
    Ok(table)
}

/// Parse export content that is already in memory.
pub fn parse_report(kind: ReportKind, content: &str, options: &LoadOptions) -> Result<ReportTable, ScanlensError> {
    match kind.input_format() {
        InputFormat::Csv => tabular::read_csv_table(content),
        InputFormat::Json => {
            let records = json::read_json_records(content, &flattener_for(kind, options))?;
            build_table(kind, records)
        }
    }
}

fn build_table(kind: ReportKind, records: Vec<FlatRecord>) -> Result<ReportTable, ScanlensError> {
    let mut table = ReportTable::new();
    for (i, mut record) in records.into_iter().enumerate() {
        let created_at = if kind.is_date_filtered() {
            normalize_created_at(&mut record, i)?
        } else {
            None
        };
        table.push(record, created_at);
    }
    debug!(kind = %kind, rows = table.len(), "Built report table");
    Ok(table)
}

/// Parse `created_at` and rewrite the cell in the canonical UTC form.
fn normalize_created_at(
    record: &mut FlatRecord,
    index: usize,
) -> Result<Option<chrono::NaiveDateTime>, ScanlensError> {
    let value = match record.get(CREATED_AT) {
        Some(v) if !v.is_blank() => v.clone(),
        _ => return Ok(None),
    };
    let ts = scalar_timestamp(&value).ok_or_else(|| {
        ScanlensError::InvalidDate(format!(
            "record {}: unrecognised created_at '{}'",
            index + 1,
            value
        ))
    })?;
    record.insert(CREATED_AT, Scalar::Text(ts.format(TIMESTAMP_FORMAT).to_string()));
    Ok(Some(ts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_sast_normalizes_created_at() {
        let content = r#"[
            {"created_at": "2024-05-01T12:00:00+02:00", "severity": "high", "status": "open",
             "rule": {"cwe_names": ["CWE-89: SQL Injection"], "vulnerability_classes": ["SQL Injection"]}}
        ]"#;
        let table = parse_report(ReportKind::Sast, content, &LoadOptions::default()).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.record.text("created_at").as_deref(), Some("2024-05-01 10:00:00"));
        assert!(row.created_at.is_some());
        assert_eq!(
            row.record.get("rule.cwe_names"),
            Some(&Scalar::from("CWE-89: SQL Injection"))
        );
    }

    #[test]
    fn test_missing_created_at_has_no_timestamp() {
        let table = parse_report(
            ReportKind::Sca,
            r#"[{"severity": "low", "status": "fixed"}]"#,
            &LoadOptions::default(),
        )
        .unwrap();
        assert!(table.rows()[0].created_at.is_none());
    }

    #[test]
    fn test_bad_created_at_is_an_error() {
        let err = parse_report(
            ReportKind::Sast,
            r#"[{"created_at": "2024-05-01"}, {"created_at": "last tuesday"}]"#,
            &LoadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ScanlensError::InvalidDate(ref m) if m.contains("record 2")));
    }

    #[test]
    fn test_inspector_is_not_date_parsed() {
        let table = parse_report(
            ReportKind::Inspector,
            r#"[{"created_at": "whenever", "title": "CVE-2024-0001"}]"#,
            &LoadOptions::default(),
        )
        .unwrap();
        assert_eq!(table.rows()[0].record.text("created_at").as_deref(), Some("whenever"));
    }

    #[test]
    fn test_load_report_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Resource type,Region\nAWS::S3::Bucket,us-east-1\n").unwrap();
        let table = load_report(ReportKind::Inventory, file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_report_enforces_size_limit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"a\": 1}}]").unwrap();
        let options = LoadOptions { max_input_bytes: 4, ..Default::default() };
        let err = load_report(ReportKind::Inspector, file.path(), &options).unwrap_err();
        assert!(matches!(err, ScanlensError::InvalidInput(ref m) if m.contains("limit")));
    }

    #[test]
    fn test_load_report_missing_file() {
        let err = load_report(
            ReportKind::Sast,
            Path::new("/definitely/not/here.json"),
            &LoadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ScanlensError::InvalidInput(ref m) if m.contains("not found")));
    }
}
