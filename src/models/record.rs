use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::scalar::Scalar;
use super::window::DateWindow;
use crate::errors::ScanlensError;

/// A single-level mapping from path strings to scalars.
///
/// Keys keep the order in which they were first inserted, which for a
/// flattened record is the order of the source document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRecord {
    fields: IndexMap<String, Scalar>,
}

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing (in place) any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: Scalar) -> Option<Scalar> {
        self.fields.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.fields.get(key)
    }

    /// The display text of a non-blank value.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_blank()).map(|v| v.to_string())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Keep only the given columns, in the given order.
    pub fn project(&self, columns: &[String]) -> FlatRecord {
        columns
            .iter()
            .filter_map(|c| self.get(c).map(|v| (c.clone(), v.clone())))
            .collect()
    }
}

impl FromIterator<(String, Scalar)> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = (String, Scalar)>>(iter: I) -> Self {
        let mut record = FlatRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for FlatRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// One row of a report table.
#[derive(Debug, Clone)]
pub struct Row {
    pub record: FlatRecord,
    /// Parsed `created_at`, UTC with the offset stripped.
    pub created_at: Option<NaiveDateTime>,
}

/// An ordered collection of flat records plus the union of their keys.
#[derive(Debug, Clone, Default)]
pub struct ReportTable {
    columns: Vec<String>,
    seen: HashSet<String>,
    rows: Vec<Row>,
}

impl ReportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a table whose column order is fixed up front (CSV headers).
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for c in columns {
            table.add_column(c.into());
        }
        table
    }

    fn add_column(&mut self, name: String) {
        if self.seen.insert(name.clone()) {
            self.columns.push(name);
        }
    }

    pub fn push(&mut self, record: FlatRecord, created_at: Option<NaiveDateTime>) {
        for key in record.keys() {
            if !self.seen.contains(key) {
                self.add_column(key.to_string());
            }
        }
        self.rows.push(Row { record, created_at });
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Fail with `MissingField` for the first column absent from every row.
    pub fn require_columns(&self, names: &[&str]) -> Result<(), ScanlensError> {
        match names.iter().find(|n| !self.has_column(n)) {
            Some(missing) => Err(ScanlensError::MissingField(format!(
                "column '{}' not present in any record",
                missing
            ))),
            None => Ok(()),
        }
    }

    /// Rows whose `created_at` falls inside the window. Rows without a
    /// timestamp are never inside.
    pub fn within(&self, window: &DateWindow) -> Vec<&Row> {
        self.rows
            .iter()
            .filter(|r| r.created_at.map_or(false, |ts| window.contains(ts)))
            .collect()
    }

    /// Earliest and latest `created_at` dates, if any row has one.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.rows.iter().filter_map(|r| r.created_at.map(|ts| ts.date()));
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
    }

    fn record(pairs: &[(&str, &str)]) -> FlatRecord {
        pairs.iter().map(|(k, v)| (k.to_string(), Scalar::from(*v))).collect()
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut r = FlatRecord::new();
        r.insert("a", Scalar::from(1));
        r.insert("b", Scalar::from(2));
        let old = r.insert("a", Scalar::from(3));
        assert_eq!(old, Some(Scalar::from(1)));
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(r.get("a"), Some(&Scalar::from(3)));
    }

    #[test]
    fn test_wide_record_lookup() {
        let r: FlatRecord = (0..20_000i64)
            .map(|i| (format!("field_{}", i), Scalar::from(i)))
            .collect();
        assert_eq!(r.len(), 20_000);
        assert_eq!(r.get("field_19999"), Some(&Scalar::from(19_999)));
        assert_eq!(r.keys().next(), Some("field_0"));
        assert_eq!(r.keys().last(), Some("field_19999"));
    }

    #[test]
    fn test_text_skips_blank_values() {
        let mut r = FlatRecord::new();
        r.insert("empty", Scalar::from(""));
        r.insert("null", Scalar::Null);
        r.insert("sev", Scalar::from("high"));
        assert_eq!(r.text("empty"), None);
        assert_eq!(r.text("null"), None);
        assert_eq!(r.text("sev"), Some("high".to_string()));
    }

    #[test]
    fn test_project_keeps_requested_order() {
        let r = record(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let p = r.project(&["c".to_string(), "missing".to_string(), "a".to_string()]);
        assert_eq!(p.keys().collect::<Vec<_>>(), vec!["c", "a"]);
    }

    #[test]
    fn test_serialize_as_ordered_map() {
        let r = record(&[("z", "1"), ("a", "2")]);
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"z":"1","a":"2"}"#);
    }

    #[test]
    fn test_table_column_union() {
        let mut t = ReportTable::new();
        t.push(record(&[("a", "1"), ("b", "2")]), None);
        t.push(record(&[("b", "3"), ("c", "4")]), None);
        assert_eq!(t.columns(), &["a", "b", "c"]);
        assert!(t.has_column("c"));
        assert!(!t.has_column("d"));
    }

    #[test]
    fn test_require_columns() {
        let mut t = ReportTable::new();
        t.push(record(&[("severity", "high")]), None);
        assert!(t.require_columns(&["severity"]).is_ok());
        let err = t.require_columns(&["severity", "status"]).unwrap_err();
        assert!(matches!(err, ScanlensError::MissingField(ref m) if m.contains("status")));
    }

    #[test]
    fn test_within_and_date_span() {
        let mut t = ReportTable::new();
        t.push(record(&[("id", "1")]), ts("2024-03-01 10:00:00"));
        t.push(record(&[("id", "2")]), ts("2024-03-15 23:59:59"));
        t.push(record(&[("id", "3")]), None);

        let (lo, hi) = t.date_span().unwrap();
        assert_eq!(lo, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(hi, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        let full = DateWindow::new(lo, hi).unwrap();
        assert_eq!(t.within(&full).len(), 2);

        let before = DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        )
        .unwrap();
        assert!(t.within(&before).is_empty());
    }
}
