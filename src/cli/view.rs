use std::path::PathBuf;

use chrono::Local;
use tracing::info;

use crate::cli::commands::ViewArgs;
use crate::config::ViewSettings;
use crate::errors::ScanlensError;
use crate::models::{parse_date, DateWindow};
use crate::reporting::{render_page, render_page_json};
use crate::session::ViewSession;

pub fn handle_view(args: ViewArgs, mut settings: ViewSettings) -> Result<(), ScanlensError> {
    if let Some(rows) = args.rows {
        settings.max_rows = rows;
    }

    let mut session = ViewSession::new(settings, Local::now().date_naive());
    if args.start.is_some() || args.end.is_some() {
        session.set_window(resolve_window(session.window(), args.start.as_deref(), args.end.as_deref())?);
    }

    let path = PathBuf::from(&args.file);
    let outcome = session.upload(args.kind, &path)?;
    info!(kind = %args.kind, file = %outcome.name, rows = outcome.rows, "Rendering page");

    let page = session.render(args.kind)?;
    if args.json {
        println!("{}", render_page_json(&page)?);
    } else {
        print!("{}", render_page(&page, &session.settings));
    }
    Ok(())
}

/// Override either bound of the default window.
pub fn resolve_window(
    default: DateWindow,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<DateWindow, ScanlensError> {
    let start = start.map(parse_date).transpose()?.unwrap_or(default.start);
    let end = end.map(parse_date).transpose()?.unwrap_or(default.end);
    DateWindow::new(start, end)
}
