use console::style;

use crate::config::ViewSettings;
use crate::errors::ScanlensError;
use crate::models::{PageBody, PageData, ReportPage};
use crate::reporting::chart::{count_chart, fix_rate_chart};
use crate::reporting::formatter::{count_table, data_table, severity_table};
use crate::utils::formatting::pluralize;

pub const WAITING_MESSAGE: &str = "Waiting for file.";
pub const NO_DATA_MESSAGE: &str = "No data found, please adjust your date range.";
pub const EMPTY_FILE_MESSAGE: &str = "No records found in the uploaded file.";

/// Render a report page as styled terminal text.
pub fn render_page(page: &ReportPage, settings: &ViewSettings) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n  {}\n", style(&page.title).white().bold()));
    if let Some(source) = &page.source {
        out.push_str(&format!("  {} {}\n", style("File:").dim(), source));
    }
    if let Some(window) = &page.window {
        out.push_str(&format!("  {} {}\n", style("Date range:").dim(), window));
    }

    match &page.body {
        PageBody::Waiting => {
            out.push_str(&format!("\n  {}\n", style(WAITING_MESSAGE).dim()));
        }
        PageBody::NoData => {
            let message = if page.kind.is_date_filtered() {
                NO_DATA_MESSAGE
            } else {
                EMPTY_FILE_MESSAGE
            };
            out.push_str(&format!("\n  {}\n", style(message).yellow()));
        }
        PageBody::Ready(data) => render_data(&mut out, data, settings),
    }
    out
}

fn render_data(out: &mut String, data: &PageData, settings: &ViewSettings) {
    if data.filtered_rows != data.total_rows {
        out.push_str(&format!(
            "  {}\n",
            style(format!("{} of {} rows in range", data.filtered_rows, data.total_rows)).dim()
        ));
    }

    if let Some(breakdown) = &data.severity {
        section(out, "Severity / Fix Rate Breakdown");
        out.push_str(&severity_table(breakdown).render(settings.cell_width));
        out.push('\n');
        out.push_str(&fix_rate_chart(breakdown, settings.bar_width));
    }

    for counts in &data.counts {
        section(out, &counts.title);
        if counts.entries.is_empty() {
            out.push_str(&format!(
                "  {}\n",
                style(format!("No values for {}", counts.field)).dim()
            ));
            continue;
        }
        out.push_str(&count_table(counts).render(settings.cell_width));
        out.push('\n');
        out.push_str(&count_chart(counts, settings.bar_width, settings.cell_width));
    }

    section(out, "Filtered Data");
    let (table, hidden) = data_table(&data.columns, &data.rows, settings.max_rows);
    out.push_str(&table.render(settings.cell_width));
    if hidden > 0 {
        out.push_str(&format!(
            "  {}\n",
            style(format!("… {} more", pluralize(hidden, "row", "rows"))).dim()
        ));
    }
}

fn section(out: &mut String, title: &str) {
    out.push_str(&format!("\n  {}\n\n", style(title).cyan().bold()));
}

/// Serialize a report page for `--json` output.
pub fn render_page_json(page: &ReportPage) -> Result<String, ScanlensError> {
    Ok(serde_json::to_string_pretty(page)?)
}
