use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use super::cache::{CachedUpload, UploadCache};
use crate::aggregate::summarize;
use crate::config::ViewSettings;
use crate::errors::ScanlensError;
use crate::ingest::load_report;
use crate::models::{DateWindow, ReportKind, ReportPage};

/// Which page the viewer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Report(ReportKind),
}

/// What happened when a file was handed to the viewer.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub name: String,
    pub rows: usize,
    /// Name of the cached upload this one replaced.
    pub replaced: Option<String>,
}

/// All per-session state: active page, date window, cached uploads.
#[derive(Debug)]
pub struct ViewSession {
    pub settings: ViewSettings,
    page: Page,
    window: DateWindow,
    today: NaiveDate,
    cache: UploadCache,
}

impl ViewSession {
    pub fn new(settings: ViewSettings, today: NaiveDate) -> Self {
        let window = settings.default_window(today);
        Self {
            settings,
            page: Page::Home,
            window,
            today,
            cache: UploadCache::new(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn set_page(&mut self, page: Page) {
        self.page = page;
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    pub fn set_window(&mut self, window: DateWindow) {
        info!(window = %window, "Date window changed");
        self.window = window;
    }

    pub fn reset_window(&mut self) {
        self.window = self.settings.default_window(self.today);
    }

    pub fn cache(&self) -> &UploadCache {
        &self.cache
    }

    /// Load a file for a report kind, replacing any cached upload of that kind.
    ///
    /// A file that fails to load leaves the existing cache entry untouched.
    pub fn upload(&mut self, kind: ReportKind, path: &Path) -> Result<UploadOutcome, ScanlensError> {
        let table = load_report(kind, path, &self.settings.load_options())?;
        let upload = CachedUpload::new(path.to_path_buf(), table);
        let outcome = UploadOutcome {
            name: upload.name.clone(),
            rows: upload.table.len(),
            replaced: None,
        };
        let replaced = self.cache.store(kind, upload).map(|old| old.name);
        Ok(UploadOutcome { replaced, ..outcome })
    }

    /// Recompute the page for a report kind from its cached upload.
    pub fn render(&self, kind: ReportKind) -> Result<ReportPage, ScanlensError> {
        match self.cache.get(kind) {
            None => Ok(ReportPage::waiting(kind)),
            Some(upload) => {
                let mut page = summarize(kind, &upload.table, &self.window, &self.settings)?;
                page.source = Some(upload.name.clone());
                Ok(page)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageBody;
    use std::io::Write;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    fn write_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_starts_on_home_with_default_window() {
        let session = ViewSession::new(ViewSettings::default(), today());
        assert_eq!(session.page(), Page::Home);
        assert_eq!(session.window(), DateWindow::trailing(today(), 30));
    }

    #[test]
    fn test_render_without_upload_is_waiting() {
        let session = ViewSession::new(ViewSettings::default(), today());
        let page = session.render(ReportKind::Sca).unwrap();
        assert!(matches!(page.body, PageBody::Waiting));
    }

    #[test]
    fn test_upload_then_render_and_replace() {
        let mut session = ViewSession::new(ViewSettings::default(), today());
        let first = write_file("Resource type,Region\nAWS::S3::Bucket,us-east-1\n");
        let second = write_file("Resource type,Region\nAWS::S3::Bucket,us-east-1\nAWS::EC2::VPC,us-west-2\n");

        let outcome = session.upload(ReportKind::Inventory, first.path()).unwrap();
        assert_eq!(outcome.rows, 1);
        assert!(outcome.replaced.is_none());

        let outcome = session.upload(ReportKind::Inventory, second.path()).unwrap();
        assert_eq!(outcome.rows, 2);
        assert!(outcome.replaced.is_some());

        let page = session.render(ReportKind::Inventory).unwrap();
        assert_eq!(page.data().unwrap().filtered_rows, 2);
        assert_eq!(page.source.as_deref(), Some(outcome.name.as_str()));
    }

    #[test]
    fn test_failed_upload_keeps_cached_file() {
        let mut session = ViewSession::new(ViewSettings::default(), today());
        let good = write_file("[]");
        let bad = write_file("not json");
        session.upload(ReportKind::Inspector, good.path()).unwrap();
        assert!(session.upload(ReportKind::Inspector, bad.path()).is_err());
        assert!(session.cache().contains(ReportKind::Inspector));
    }

    #[test]
    fn test_window_change_rerenders() {
        let mut session = ViewSession::new(ViewSettings::default(), today());
        let file = write_file(
            r#"[{"created_at": "2024-03-30 10:00:00", "severity": "high", "status": "fixed"}]"#,
        );
        session.upload(ReportKind::Sast, file.path()).unwrap();
        assert!(session.render(ReportKind::Sast).unwrap().is_ready());

        session.set_window(DateWindow::parse("2023-01-01", "2023-12-31").unwrap());
        let page = session.render(ReportKind::Sast).unwrap();
        assert!(matches!(page.body, PageBody::NoData));

        session.reset_window();
        assert!(session.render(ReportKind::Sast).unwrap().is_ready());
    }
}
