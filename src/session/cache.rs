use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::models::{ReportKind, ReportTable};

/// One loaded export, kept until another file of the same kind replaces it.
#[derive(Debug, Clone)]
pub struct CachedUpload {
    /// File name shown to the user.
    pub name: String,
    pub path: PathBuf,
    pub table: ReportTable,
    pub loaded_at: DateTime<Local>,
}

impl CachedUpload {
    pub fn new(path: PathBuf, table: ReportTable) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            path,
            table,
            loaded_at: Local::now(),
        }
    }
}

/// At most one cached upload per report kind.
#[derive(Debug, Default)]
pub struct UploadCache {
    uploads: HashMap<ReportKind, CachedUpload>,
}

impl UploadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an upload, returning the one it replaced.
    pub fn store(&mut self, kind: ReportKind, upload: CachedUpload) -> Option<CachedUpload> {
        self.uploads.insert(kind, upload)
    }

    pub fn get(&self, kind: ReportKind) -> Option<&CachedUpload> {
        self.uploads.get(&kind)
    }

    pub fn contains(&self, kind: ReportKind) -> bool {
        self.uploads.contains_key(&kind)
    }

    /// Cached uploads in report-kind order.
    pub fn entries(&self) -> Vec<(ReportKind, &CachedUpload)> {
        ReportKind::ALL
            .iter()
            .filter_map(|k| self.uploads.get(k).map(|u| (*k, u)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.uploads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uploads.is_empty()
    }
}
