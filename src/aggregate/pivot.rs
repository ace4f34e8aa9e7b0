use std::collections::{BTreeSet, HashMap};

use super::fix_rate::format_fix_rate;
use crate::models::{CountEntry, FlatRecord, SeverityBreakdown, SeverityRow, StatusCount};

pub const SEVERITY_FIELD: &str = "severity";
pub const STATUS_FIELD: &str = "status";

/// Group rows by the display value of `field` and count them.
///
/// Rows without a value for the field are left out. Ties are ordered by value
/// so the output is stable.
pub fn count_by(rows: &[&FlatRecord], field: &str) -> Vec<CountEntry> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for row in rows {
        if let Some(value) = row.text(field) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(value, count)| CountEntry { value, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    entries
}

/// Pivot rows into severity × status counts.
///
/// Every level in `severities` gets a row, zero-filled. `tracked` statuses are
/// always present as columns and form the fix-rate denominator; its first
/// entry is the "fixed" status. Other statuses seen in the data follow in
/// alphabetical order. Severity and status values compare case-insensitively.
pub fn severity_breakdown(
    rows: &[&FlatRecord],
    severities: &[String],
    tracked: &[&str],
) -> SeverityBreakdown {
    let mut cells: HashMap<(String, String), u64> = HashMap::new();
    let mut extra_statuses: BTreeSet<String> = BTreeSet::new();

    for row in rows {
        let (Some(severity), Some(status)) = (row.text(SEVERITY_FIELD), row.text(STATUS_FIELD)) else {
            continue;
        };
        let severity = severity.trim().to_lowercase();
        let status = status.trim().to_lowercase();
        if !severities.iter().any(|s| s.eq_ignore_ascii_case(&severity)) {
            continue;
        }
        if !tracked.contains(&status.as_str()) {
            extra_statuses.insert(status.clone());
        }
        *cells.entry((severity, status)).or_insert(0) += 1;
    }

    let statuses: Vec<String> = tracked
        .iter()
        .map(|s| s.to_string())
        .chain(extra_statuses)
        .collect();

    let rows = severities
        .iter()
        .map(|severity| {
            let key = severity.to_lowercase();
            let counts: Vec<StatusCount> = statuses
                .iter()
                .map(|status| StatusCount {
                    status: status.clone(),
                    count: cells.get(&(key.clone(), status.clone())).copied().unwrap_or(0),
                })
                .collect();
            let tracked_count = |s: &str| counts.iter().find(|c| c.status == s).map_or(0, |c| c.count);
            let fixed = tracked.first().map_or(0, |s| tracked_count(*s));
            let denominator: u64 = tracked.iter().map(|s| tracked_count(*s)).sum();
            SeverityRow {
                severity: severity.clone(),
                fix_rate: format_fix_rate(fixed, denominator),
                counts,
            }
        })
        .collect();

    SeverityBreakdown { statuses, rows }
}
