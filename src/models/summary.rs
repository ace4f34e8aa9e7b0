use serde::Serialize;

use super::record::FlatRecord;
use super::report_kind::ReportKind;
use super::window::DateWindow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// Counts for one severity level across every status column.
#[derive(Debug, Clone, Serialize)]
pub struct SeverityRow {
    pub severity: String,
    pub counts: Vec<StatusCount>,
    pub fix_rate: String,
}

impl SeverityRow {
    pub fn count(&self, status: &str) -> u64 {
        self.counts
            .iter()
            .find(|c| c.status == status)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.count).sum()
    }
}

/// Severity × status pivot with a derived fix rate per severity.
#[derive(Debug, Clone, Serialize)]
pub struct SeverityBreakdown {
    /// Status columns in display order: tracked statuses first, then any others seen.
    pub statuses: Vec<String>,
    pub rows: Vec<SeverityRow>,
}

impl SeverityBreakdown {
    pub fn row(&self, severity: &str) -> Option<&SeverityRow> {
        self.rows.iter().find(|r| r.severity == severity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub value: String,
    pub count: u64,
}

/// A grouped count over one column, sorted by count descending.
#[derive(Debug, Clone, Serialize)]
pub struct CountTable {
    pub title: String,
    pub label: String,
    pub field: String,
    pub entries: Vec<CountEntry>,
}

impl CountTable {
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    /// Rows in the upload before window filtering.
    pub total_rows: usize,
    /// Rows that survived window filtering.
    pub filtered_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityBreakdown>,
    pub counts: Vec<CountTable>,
    pub columns: Vec<String>,
    pub rows: Vec<FlatRecord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageBody {
    /// Nothing uploaded yet for this report kind.
    Waiting,
    /// The window filtered every row out.
    NoData,
    Ready(PageData),
}

/// Render-ready result of one recomputation for one report kind.
#[derive(Debug, Clone, Serialize)]
pub struct ReportPage {
    pub kind: ReportKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<DateWindow>,
    #[serde(flatten)]
    pub body: PageBody,
}

impl ReportPage {
    pub fn waiting(kind: ReportKind) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            source: None,
            window: None,
            body: PageBody::Waiting,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.body, PageBody::Ready(_))
    }

    pub fn data(&self) -> Option<&PageData> {
        match &self.body {
            PageBody::Ready(data) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_row_count_lookup() {
        let row = SeverityRow {
            severity: "high".into(),
            counts: vec![
                StatusCount { status: "fixed".into(), count: 2 },
                StatusCount { status: "open".into(), count: 3 },
            ],
            fix_rate: "40%".into(),
        };
        assert_eq!(row.count("open"), 3);
        assert_eq!(row.count("reviewing"), 0);
        assert_eq!(row.total(), 5);
    }

    #[test]
    fn test_waiting_page_serializes_state() {
        let page = ReportPage::waiting(ReportKind::Sast);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["state"], "waiting");
        assert_eq!(json["kind"], "sast");
        assert_eq!(json["title"], "Semgrep SAST");
        assert!(json.get("window").is_none());
        assert!(!page.is_ready());
    }
}
