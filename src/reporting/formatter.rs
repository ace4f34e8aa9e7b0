use console::style;

use crate::models::{CountTable, FlatRecord, SeverityBreakdown};
use crate::utils::formatting::{pad_left, pad_right, truncate_cell};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// A plain text table with a bold header and a rule under it.
#[derive(Debug, Clone)]
pub struct TextTable {
    headers: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let align = vec![Align::Left; headers.len()];
        Self {
            headers,
            align,
            rows: Vec::new(),
        }
    }

    /// Right-align every column from `from` onwards.
    pub fn numeric_from(mut self, from: usize) -> Self {
        for a in self.align.iter_mut().skip(from) {
            *a = Align::Right;
        }
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render with every cell cut to `cell_width` characters.
    pub fn render(&self, cell_width: usize) -> String {
        let cut = |s: &str| truncate_cell(s, cell_width);
        let headers: Vec<String> = self.headers.iter().map(|h| cut(h)).collect();
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| (0..headers.len()).map(|i| cut(r.get(i).map(String::as_str).unwrap_or(""))).collect())
            .collect();

        let widths: Vec<usize> = (0..headers.len())
            .map(|i| {
                rows.iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(headers[i].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .enumerate()
                .map(|(i, c)| match self.align[i] {
                    Align::Left => pad_right(c, widths[i]),
                    Align::Right => pad_left(c, widths[i]),
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        let mut out = String::new();
        out.push_str(&format!("  {}\n", style(line(&headers)).white().bold()));
        out.push_str(&format!("  {}\n", style("─".repeat(total)).dim()));
        for row in &rows {
            out.push_str(&format!("  {}\n", line(row)));
        }
        out
    }
}

/// Severity rows with one column per status, a total, and the fix rate.
pub fn severity_table(breakdown: &SeverityBreakdown) -> TextTable {
    let mut headers = vec!["Severity".to_string()];
    headers.extend(breakdown.statuses.iter().cloned());
    headers.push("Total".to_string());
    headers.push("Fix Rate".to_string());

    let mut table = TextTable::new(headers).numeric_from(1);
    for row in &breakdown.rows {
        let mut cells = vec![row.severity.clone()];
        cells.extend(breakdown.statuses.iter().map(|s| row.count(s).to_string()));
        cells.push(row.total().to_string());
        cells.push(row.fix_rate.clone());
        table.push_row(cells);
    }
    table
}

pub fn count_table(counts: &CountTable) -> TextTable {
    let mut table = TextTable::new([counts.label.as_str(), "Count"]).numeric_from(1);
    for entry in &counts.entries {
        table.push_row(vec![entry.value.clone(), entry.count.to_string()]);
    }
    table
}

/// The filtered data table, capped at `max_rows`. Returns the number of rows left out.
pub fn data_table(columns: &[String], rows: &[FlatRecord], max_rows: usize) -> (TextTable, usize) {
    let mut table = TextTable::new(columns.iter().cloned());
    for record in rows.iter().take(max_rows) {
        table.push_row(
            columns
                .iter()
                .map(|c| record.get(c).map(|v| v.to_string()).unwrap_or_default())
                .collect(),
        );
    }
    (table, rows.len().saturating_sub(max_rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CountEntry, Scalar, SeverityRow, StatusCount};

    fn breakdown() -> SeverityBreakdown {
        SeverityBreakdown {
            statuses: vec!["fixed".into(), "open".into()],
            rows: vec![SeverityRow {
                severity: "high".into(),
                counts: vec![
                    StatusCount { status: "fixed".into(), count: 1 },
                    StatusCount { status: "open".into(), count: 3 },
                ],
                fix_rate: "25%".into(),
            }],
        }
    }

    #[test]
    fn test_severity_table_columns() {
        let out = severity_table(&breakdown()).render(40);
        let header = out.lines().next().unwrap();
        for h in ["Severity", "fixed", "open", "Total", "Fix Rate"] {
            assert!(header.contains(h), "missing {}", h);
        }
        assert!(out.contains("25%"));
        assert!(out.lines().nth(2).unwrap().contains('4'));
    }

    #[test]
    fn test_numeric_columns_right_aligned() {
        let mut table = TextTable::new(["Name", "Count"]).numeric_from(1);
        table.push_row(vec!["a".into(), "7".into()]);
        table.push_row(vec!["b".into(), "12".into()]);
        let out = table.render(40);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[2].ends_with("    7"));
        assert!(lines[3].ends_with("   12"));
    }

    #[test]
    fn test_count_table_uses_label() {
        let counts = CountTable {
            title: "Pivot by Region".into(),
            label: "Region".into(),
            field: "Region".into(),
            entries: vec![CountEntry { value: "us-east-1".into(), count: 2 }],
        };
        let out = count_table(&counts).render(40);
        assert!(out.contains("Region"));
        assert!(out.contains("us-east-1"));
    }

    #[test]
    fn test_data_table_caps_rows_and_truncates() {
        let rows: Vec<FlatRecord> = (0..5)
            .map(|i| {
                [("rule_message".to_string(), Scalar::from(format!("message number {} is long", i)))]
                    .into_iter()
                    .collect()
            })
            .collect();
        let (table, hidden) = data_table(&["rule_message".to_string()], &rows, 3);
        assert_eq!(table.len(), 3);
        assert_eq!(hidden, 2);
        let out = table.render(10);
        assert!(out.contains("message n…"));
    }

    #[test]
    fn test_missing_cells_blank() {
        let rows = vec![FlatRecord::new()];
        let (table, hidden) = data_table(&["severity".to_string()], &rows, 10);
        assert_eq!(hidden, 0);
        assert_eq!(table.render(40).lines().count(), 3);
    }
}
