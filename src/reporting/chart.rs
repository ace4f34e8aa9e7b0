use console::style;

use crate::models::{CountTable, SeverityBreakdown};
use crate::utils::formatting::{pad_left, pad_right, truncate_cell};

const BAR: &str = "█";
/// 256-color codes for the open and fixed series.
const OPEN_COLOR: u8 = 33;
const FIXED_COLOR: u8 = 208;

/// Bar length scaled against the largest value, rounded up so any non-zero
/// count gets at least one cell.
pub fn bar_len(count: u64, max: u64, width: usize) -> usize {
    if max == 0 || count == 0 {
        return 0;
    }
    ((count as f64 / max as f64) * width as f64).ceil() as usize
}

/// Horizontal bars, one per entry of a count table.
pub fn count_chart(counts: &CountTable, width: usize, label_width: usize) -> String {
    let max = counts.entries.iter().map(|e| e.count).max().unwrap_or(0);
    let labels: Vec<String> = counts
        .entries
        .iter()
        .map(|e| truncate_cell(&e.value, label_width))
        .collect();
    let label_col = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let count_col = max.to_string().len();

    let mut out = String::new();
    for (entry, label) in counts.entries.iter().zip(&labels) {
        out.push_str(&format!(
            "  {}  {}  {}\n",
            pad_right(label, label_col),
            pad_left(&entry.count.to_string(), count_col),
            style(BAR.repeat(bar_len(entry.count, max, width))).cyan(),
        ));
    }
    out
}

/// Open and fixed bars side by side for each severity.
pub fn fix_rate_chart(breakdown: &SeverityBreakdown, width: usize) -> String {
    let Some(fixed_status) = breakdown.statuses.first() else {
        return String::new();
    };
    let open_status = "open";

    let max = breakdown
        .rows
        .iter()
        .flat_map(|r| [r.count(fixed_status), r.count(open_status)])
        .max()
        .unwrap_or(0);
    let label_col = breakdown
        .rows
        .iter()
        .map(|r| r.severity.chars().count())
        .max()
        .unwrap_or(0);
    let count_col = max.to_string().len();

    let mut out = format!(
        "  {} {}   {} {}\n",
        style(BAR).color256(OPEN_COLOR),
        open_status,
        style(BAR).color256(FIXED_COLOR),
        fixed_status,
    );
    for row in &breakdown.rows {
        let open = row.count(open_status);
        let fixed = row.count(fixed_status);
        out.push_str(&format!(
            "  {}  {}  {}\n",
            pad_right(&row.severity, label_col),
            pad_left(&open.to_string(), count_col),
            style(BAR.repeat(bar_len(open, max, width))).color256(OPEN_COLOR),
        ));
        out.push_str(&format!(
            "  {}  {}  {}\n",
            pad_right("", label_col),
            pad_left(&fixed.to_string(), count_col),
            style(BAR.repeat(bar_len(fixed, max, width))).color256(FIXED_COLOR),
        ));
    }
    out
}
