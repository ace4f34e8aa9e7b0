use serde::{Deserialize, Serialize};

use crate::models::ReportKind;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ScanlensConfig {
    pub window: Option<WindowConfig>,
    pub flatten: Option<FlattenConfig>,
    pub render: Option<RenderConfig>,
    pub limits: Option<LimitsConfig>,
    pub reports: Option<ReportsConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct WindowConfig {
    /// Days before today covered by the default date window.
    pub lookback_days: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct FlattenConfig {
    pub separator: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RenderConfig {
    /// Rows shown in the filtered data table.
    pub max_rows: Option<usize>,
    /// Widest a table cell may grow before it is truncated.
    pub cell_width: Option<usize>,
    /// Length of the longest chart bar.
    pub bar_width: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LimitsConfig {
    pub max_input_bytes: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReportsConfig {
    /// Severity levels always shown in the breakdown, in display order.
    pub severities: Option<Vec<String>>,
    pub sast: Option<ReportConfig>,
    pub sca: Option<ReportConfig>,
    pub inspector: Option<ReportConfig>,
    pub inventory: Option<ReportConfig>,
}

impl ReportsConfig {
    pub fn for_kind(&self, kind: ReportKind) -> Option<&ReportConfig> {
        match kind {
            ReportKind::Sast => self.sast.as_ref(),
            ReportKind::Sca => self.sca.as_ref(),
            ReportKind::Inspector => self.inspector.as_ref(),
            ReportKind::Inventory => self.inventory.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReportConfig {
    pub display_columns: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanlens_config_default() {
        let config = ScanlensConfig::default();
        assert!(config.window.is_none());
        assert!(config.flatten.is_none());
        assert!(config.reports.is_none());
    }

    #[test]
    fn test_partial_yaml() {
        let config: ScanlensConfig = serde_yaml::from_str(
            "window:\n  lookback_days: 90\nreports:\n  sca:\n    display_columns: [severity, vulnerability_identifier]\n",
        )
        .unwrap();
        assert_eq!(config.window.unwrap().lookback_days, Some(90));
        let reports = config.reports.unwrap();
        assert!(reports.for_kind(ReportKind::Sast).is_none());
        let sca = reports.for_kind(ReportKind::Sca).unwrap();
        assert_eq!(
            sca.display_columns.as_deref(),
            Some(&["severity".to_string(), "vulnerability_identifier".to_string()][..])
        );
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: ScanlensConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.render.is_none());
    }
}
