use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::Scalar;

/// Display format for normalised `created_at` values.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a timestamp string into a naive UTC datetime.
///
/// Offsets are applied and then dropped; strings without an offset are taken
/// as UTC already.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let zulu;
    let s = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        Some(rest) => {
            zulu = format!("{}+00:00", rest);
            zulu.as_str()
        }
        None => s,
    };

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_utc());
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Interpret a scalar as a timestamp. Numbers are Unix epochs, in
/// milliseconds when they are too large to be seconds.
pub fn scalar_timestamp(value: &Scalar) -> Option<NaiveDateTime> {
    match value {
        Scalar::Text(s) => parse_timestamp(s),
        Scalar::Number(n) => {
            let raw = n.as_i64()?;
            let dt = if raw.abs() >= 100_000_000_000 {
                DateTime::from_timestamp_millis(raw)
            } else {
                DateTime::from_timestamp(raw, 0)
            };
            dt.map(|d| d.naive_utc())
        }
        Scalar::Null | Scalar::Bool(_) => None,
    }
}
