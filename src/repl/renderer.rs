use console::style;

use crate::models::DateWindow;
use crate::repl::commands::{CommandHelp, COMMAND_HELP};
use crate::session::{UploadCache, UploadOutcome};
use crate::utils::formatting::pluralize;

/// Render the help listing for all commands.
pub fn render_help(specific_command: Option<&str>) -> String {
    if let Some(cmd_name) = specific_command {
        if let Some(cmd) = COMMAND_HELP.iter().find(|c| c.name == cmd_name) {
            return format_command_detail(cmd);
        } else {
            return format!("{} Unknown command: /{}", style("✗").red(), cmd_name);
        }
    }

    let mut out = String::new();
    out.push_str(&format!("\n{}\n\n", style("Available commands:").white().bold()));
    for cmd in COMMAND_HELP {
        out.push_str(&format!(
            "  {:<16} {}\n",
            style(format!("/{}", cmd.name)).cyan().bold(),
            style(cmd.description).dim(),
        ));
    }
    out
}

fn format_command_detail(cmd: &CommandHelp) -> String {
    format!(
        "\n{}\n  {}\n\n  {}\n",
        style(format!("/{}", cmd.name)).cyan().bold(),
        style(cmd.description).dim(),
        style(cmd.usage).white(),
    )
}

/// Render the version info.
pub fn render_version() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = option_env!("GIT_HASH").unwrap_or("dev");
    let build_ts = option_env!("BUILD_TIMESTAMP").unwrap_or("unknown");

    format!(
        "\n  {} {}\n  {} {}\n  {} {}\n",
        style("Version:").dim(),
        style(version).white().bold(),
        style("Commit:").dim(),
        style(git_hash).white(),
        style("Built:").dim(),
        style(build_ts).white(),
    )
}

pub fn render_window(window: &DateWindow) -> String {
    format!("  {} {}", style("Date range:").dim(), style(window).white().bold())
}

/// Confirmation line after a file was loaded.
pub fn render_upload(outcome: &UploadOutcome) -> String {
    let mut line = render_success(&format!(
        "File uploaded: {} ({})",
        style(&outcome.name).white().bold(),
        pluralize(outcome.rows, "record", "records"),
    ));
    if let Some(old) = &outcome.replaced {
        line.push_str(&format!(" {}", style(format!("replaces {}", old)).dim()));
    }
    line
}

/// Render the per-kind upload cache.
pub fn render_uploads(cache: &UploadCache) -> String {
    if cache.is_empty() {
        return format!("\n  {}\n", style("No files uploaded yet.").dim());
    }

    let mut out = String::new();
    out.push_str(&format!("\n{}\n\n", style("Uploaded files:").white().bold()));
    for (kind, upload) in cache.entries() {
        out.push_str(&format!(
            "  {:<12} {}  {}\n",
            style(kind).cyan().bold(),
            style(&upload.name).white(),
            style(format!(
                "{} · {}",
                pluralize(upload.table.len(), "record", "records"),
                upload.loaded_at.format("%H:%M:%S")
            ))
            .dim(),
        ));
    }
    out
}

/// Print an error message to the REPL.
pub fn render_error(msg: &str) -> String {
    format!("{} {}", style("✗").red(), style(msg).red())
}

/// Print a success message.
pub fn render_success(msg: &str) -> String {
    format!("{} {}", style("✓").green(), msg)
}

/// Print an info message.
pub fn render_info(msg: &str) -> String {
    format!("{}", style(msg).dim())
}
