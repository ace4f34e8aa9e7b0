pub mod fix_rate;
pub mod pivot;

use tracing::{debug, info};

use crate::config::ViewSettings;
use crate::errors::ScanlensError;
use crate::models::{
    CountTable, DateWindow, FlatRecord, PageBody, PageData, ReportKind, ReportPage, ReportTable,
};

pub use fix_rate::format_fix_rate;
pub use pivot::{count_by, severity_breakdown};

/// Recompute the page for one report kind over an uploaded table.
///
/// Date-aware kinds are filtered to `window` before anything is counted. An
/// empty result short-circuits to `NoData`.
pub fn summarize(
    kind: ReportKind,
    table: &ReportTable,
    window: &DateWindow,
    settings: &ViewSettings,
) -> Result<ReportPage, ScanlensError> {
    let mut page = ReportPage::waiting(kind);
    if kind.is_date_filtered() {
        page.window = Some(*window);
    }

    if table.is_empty() {
        page.body = PageBody::NoData;
        return Ok(page);
    }
    table.require_columns(kind.required_columns())?;

    let rows: Vec<&FlatRecord> = if kind.is_date_filtered() {
        table.within(window).into_iter().map(|r| &r.record).collect()
    } else {
        table.rows().iter().map(|r| &r.record).collect()
    };

    if rows.is_empty() {
        info!(kind = %kind, window = %window, total = table.len(), "No rows inside date window");
        page.body = PageBody::NoData;
        return Ok(page);
    }

    let severity = kind
        .has_severity_breakdown()
        .then(|| severity_breakdown(&rows, &settings.severities, kind.fix_rate_statuses()));

    let counts = kind
        .count_specs()
        .iter()
        .map(|spec| {
            let field = spec.column(&settings.separator);
            CountTable {
                title: spec.title.to_string(),
                label: spec.label.to_string(),
                entries: count_by(&rows, &field),
                field,
            }
        })
        .collect();

    let columns = display_columns(kind, table, settings);
    let projected = rows.iter().map(|r| r.project(&columns)).collect();

    debug!(kind = %kind, filtered = rows.len(), total = table.len(), "Summarized report");

    page.body = PageBody::Ready(PageData {
        total_rows: table.len(),
        filtered_rows: rows.len(),
        severity,
        counts,
        columns,
        rows: projected,
    });
    Ok(page)
}

/// Configured display columns that exist in the table, or every column when
/// none are configured or none match.
fn display_columns(kind: ReportKind, table: &ReportTable, settings: &ViewSettings) -> Vec<String> {
    let present: Vec<String> = settings
        .display_columns(kind)
        .into_iter()
        .filter(|c| table.has_column(c))
        .collect();
    if present.is_empty() {
        table.columns().to_vec()
    } else {
        present
    }
}
