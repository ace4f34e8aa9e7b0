use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four export types the viewer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Sast,
    Sca,
    Inspector,
    Inventory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

/// A nested column as its key segments, joined with the flattener's
/// separator to give the flattened column name.
pub type ColumnPath = &'static [&'static str];

pub fn column_name(path: ColumnPath, separator: &str) -> String {
    path.join(separator)
}

/// A single-dimension count table produced for a report kind.
#[derive(Debug, Clone, Copy)]
pub struct CountSpec {
    /// Column grouped on.
    pub field: ColumnPath,
    /// Column header for the grouped value.
    pub label: &'static str,
    pub title: &'static str,
}

const CWE: CountSpec = CountSpec {
    field: &["rule", "cwe_names"],
    label: "CWE Names",
    title: "Findings by CWE",
};

const VULN_CLASS: CountSpec = CountSpec {
    field: &["rule", "vulnerability_classes"],
    label: "Vuln Class",
    title: "Findings by Vulnerability Class",
};

const CVE: CountSpec = CountSpec {
    field: &["vulnerability_identifier"],
    label: "CVE",
    title: "Findings by CVE",
};

const RESOURCE_TYPE: CountSpec = CountSpec {
    field: &["Resource type"],
    label: "Resource Type",
    title: "Pivot by Resource Type",
};

const REGION: CountSpec = CountSpec {
    field: &["Region"],
    label: "Region",
    title: "Pivot by Region",
};

/// Categorical columns whose single-element lists are unwrapped to the bare value.
const SEMGREP_CATEGORICAL: &[ColumnPath] = &[
    &["rule", "vulnerability_classes"],
    &["rule", "cwe_names"],
];

const SAST_COLUMNS: &[ColumnPath] = &[
    &["created_at"],
    &["rule_name"],
    &["severity"],
    &["rule_message"],
    &["repository", "name"],
    &["line_of_code_url"],
    &["rule", "category"],
    &["rule", "subcategories"],
    &["rule", "owasp_names"],
    &["rule", "cwe_names"],
    &["rule", "vulnerability_classes"],
];

const SCA_COLUMNS: &[ColumnPath] = &[
    &["created_at"],
    &["severity"],
    &["rule_message"],
    &["repository", "name"],
    &["found_dependency", "ecosystem"],
    &["found_dependency", "package"],
    &["line_of_code_url"],
    &["rule", "category"],
    &["vulnerability_identifier"],
    &["rule", "owasp_names"],
    &["rule", "cwe_names"],
    &["rule", "vulnerability_classes"],
];

impl CountSpec {
    pub fn column(&self, separator: &str) -> String {
        column_name(self.field, separator)
    }
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Sast,
        ReportKind::Sca,
        ReportKind::Inspector,
        ReportKind::Inventory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sast => "sast",
            Self::Sca => "sca",
            Self::Inspector => "inspector",
            Self::Inventory => "inventory",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Sast => "Semgrep SAST",
            Self::Sca => "Semgrep SCA",
            Self::Inspector => "AWS Inspector",
            Self::Inventory => "AWS Inventory",
        }
    }

    pub fn input_format(&self) -> InputFormat {
        match self {
            Self::Inventory => InputFormat::Csv,
            _ => InputFormat::Json,
        }
    }

    /// Whether rows carry a `created_at` timestamp and are filtered by the date window.
    pub fn is_date_filtered(&self) -> bool {
        matches!(self, Self::Sast | Self::Sca)
    }

    /// Statuses that make up the fix-rate denominator. `fixed` is always first.
    pub fn fix_rate_statuses(&self) -> &'static [&'static str] {
        match self {
            Self::Sast => &["fixed", "open"],
            Self::Sca => &["fixed", "open", "reviewing"],
            Self::Inspector | Self::Inventory => &[],
        }
    }

    pub fn has_severity_breakdown(&self) -> bool {
        !self.fix_rate_statuses().is_empty()
    }

    pub fn count_specs(&self) -> &'static [CountSpec] {
        match self {
            Self::Sast => &[CWE, VULN_CLASS],
            Self::Sca => &[CVE, CWE, VULN_CLASS],
            Self::Inspector => &[],
            Self::Inventory => &[RESOURCE_TYPE, REGION],
        }
    }

    /// Columns that must appear in at least one record before aggregation.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Sast | Self::Sca => &["created_at", "severity", "status"],
            Self::Inspector => &[],
            Self::Inventory => &["Resource type", "Region"],
        }
    }

    /// Default filtered-data columns. Empty means every column.
    pub fn default_display_columns(&self) -> &'static [ColumnPath] {
        match self {
            Self::Sast => SAST_COLUMNS,
            Self::Sca => SCA_COLUMNS,
            Self::Inspector | Self::Inventory => &[],
        }
    }

    pub fn unwrapped_columns(&self) -> &'static [ColumnPath] {
        match self {
            Self::Sast | Self::Sca => SEMGREP_CATEGORICAL,
            Self::Inspector | Self::Inventory => &[],
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sast" => Ok(Self::Sast),
            "sca" => Ok(Self::Sca),
            "inspector" | "ins" => Ok(Self::Inspector),
            "inventory" | "inv" => Ok(Self::Inventory),
            other => Err(format!(
                "Unknown report kind: {}. Use: sast, sca, inspector, inventory",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_roundtrip() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.as_str().parse::<ReportKind>().unwrap(), kind);
        }
        assert_eq!("INV".parse::<ReportKind>().unwrap(), ReportKind::Inventory);
        assert!("dast".parse::<ReportKind>().is_err());
    }

    #[test]
    fn test_input_formats() {
        assert_eq!(ReportKind::Inventory.input_format(), InputFormat::Csv);
        assert_eq!(ReportKind::Sast.input_format(), InputFormat::Json);
        assert_eq!(ReportKind::Inspector.input_format(), InputFormat::Json);
    }

    #[test]
    fn test_fix_rate_statuses() {
        assert_eq!(ReportKind::Sast.fix_rate_statuses(), &["fixed", "open"]);
        assert_eq!(ReportKind::Sca.fix_rate_statuses(), &["fixed", "open", "reviewing"]);
        assert!(!ReportKind::Inventory.has_severity_breakdown());
    }

    #[test]
    fn test_count_specs_per_kind() {
        let sca: Vec<_> = ReportKind::Sca.count_specs().iter().map(|s| s.label).collect();
        assert_eq!(sca, vec!["CVE", "CWE Names", "Vuln Class"]);
        let inv: Vec<_> = ReportKind::Inventory.count_specs().iter().map(|s| s.column(".")).collect();
        assert_eq!(inv, vec!["Resource type", "Region"]);
        assert!(ReportKind::Inspector.count_specs().is_empty());
    }

    #[test]
    fn test_nested_columns_follow_separator() {
        let sast = ReportKind::Sast.count_specs();
        assert_eq!(sast[0].column("."), "rule.cwe_names");
        assert_eq!(sast[0].column("/"), "rule/cwe_names");
        let unwrapped: Vec<String> = ReportKind::Sca
            .unwrapped_columns()
            .iter()
            .map(|p| column_name(*p, "__"))
            .collect();
        assert_eq!(unwrapped, vec!["rule__vulnerability_classes", "rule__cwe_names"]);
        assert_eq!(column_name(&["created_at"], "/"), "created_at");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ReportKind::Sca).unwrap(), "\"sca\"");
        let parsed: ReportKind = serde_json::from_str("\"inventory\"").unwrap();
        assert_eq!(parsed, ReportKind::Inventory);
    }
}
