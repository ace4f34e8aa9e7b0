use std::collections::HashMap;

use chrono::NaiveDate;

use super::types::ScanlensConfig;
use crate::ingest::{LoadOptions, DEFAULT_MAX_INPUT_BYTES, DEFAULT_SEPARATOR};
use crate::models::{column_name, DateWindow, ReportKind};

pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;
pub const DEFAULT_MAX_ROWS: usize = 50;
pub const DEFAULT_CELL_WIDTH: usize = 40;
pub const DEFAULT_BAR_WIDTH: usize = 30;
pub const DEFAULT_SEVERITIES: &[&str] = &["high", "medium", "low"];

/// Configuration with every default filled in.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub lookback_days: u32,
    pub separator: String,
    pub max_rows: usize,
    pub cell_width: usize,
    pub bar_width: usize,
    pub max_input_bytes: u64,
    pub severities: Vec<String>,
    display_columns: HashMap<ReportKind, Vec<String>>,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::from_config(&ScanlensConfig::default())
    }
}

impl ViewSettings {
    pub fn from_config(config: &ScanlensConfig) -> Self {
        let render = config.render.clone().unwrap_or_default();
        let reports = config.reports.clone().unwrap_or_default();

        let display_columns = ReportKind::ALL
            .iter()
            .filter_map(|kind| {
                reports
                    .for_kind(*kind)
                    .and_then(|r| r.display_columns.clone())
                    .map(|cols| (*kind, cols))
            })
            .collect();

        Self {
            lookback_days: config
                .window
                .as_ref()
                .and_then(|w| w.lookback_days)
                .unwrap_or(DEFAULT_LOOKBACK_DAYS),
            separator: config
                .flatten
                .as_ref()
                .and_then(|f| f.separator.clone())
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
            max_rows: render.max_rows.unwrap_or(DEFAULT_MAX_ROWS),
            cell_width: render.cell_width.unwrap_or(DEFAULT_CELL_WIDTH),
            bar_width: render.bar_width.unwrap_or(DEFAULT_BAR_WIDTH),
            max_input_bytes: config
                .limits
                .as_ref()
                .and_then(|l| l.max_input_bytes)
                .unwrap_or(DEFAULT_MAX_INPUT_BYTES),
            severities: reports
                .severities
                .unwrap_or_else(|| DEFAULT_SEVERITIES.iter().map(|s| s.to_string()).collect()),
            display_columns,
        }
    }

    /// Display columns for the filtered data table. Empty means all columns.
    pub fn display_columns(&self, kind: ReportKind) -> Vec<String> {
        match self.display_columns.get(&kind) {
            Some(cols) => cols.clone(),
            None => kind
                .default_display_columns()
                .iter()
                .map(|path| column_name(*path, &self.separator))
                .collect(),
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            separator: self.separator.clone(),
            max_input_bytes: self.max_input_bytes,
        }
    }

    pub fn default_window(&self, today: NaiveDate) -> DateWindow {
        DateWindow::trailing(today, self.lookback_days)
    }
}
