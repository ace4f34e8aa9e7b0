use std::path::PathBuf;

use chrono::Local;
use console::{style, Term};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use tracing::debug;

use crate::config::ViewSettings;
use crate::errors::ScanlensError;
use crate::models::{DateWindow, ReportKind};
use crate::reporting::render_page;
use crate::repl::banner;
use crate::repl::commands::{self, RangeAction, SlashCommand};
use crate::repl::completer::ReplHelper;
use crate::repl::renderer;
use crate::session::{Page, ViewSession};

pub struct ReplSession {
    view: ViewSession,
}

impl ReplSession {
    pub fn new(settings: ViewSettings) -> Self {
        Self {
            view: ViewSession::new(settings, Local::now().date_naive()),
        }
    }

    pub fn run(mut self) -> Result<(), ScanlensError> {
        banner::show_home();

        let config = Config::builder().auto_add_history(true).build();
        let mut editor: Editor<ReplHelper, DefaultHistory> = Editor::with_config(config)
            .map_err(|e| ScanlensError::Internal(format!("Failed to initialize REPL: {}", e)))?;
        editor.set_helper(Some(ReplHelper::default()));

        loop {
            let term_w = Term::stdout().size().1 as usize;
            let sep = format!("{}", style("─".repeat(term_w)).dim());
            let prompt = format!("{}\n{} ", sep, style(self.prompt_label()).cyan().bold());

            match editor.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    println!("{}", style("─".repeat(term_w)).dim());

                    match commands::parse_command(trimmed) {
                        Ok(cmd) => {
                            if self.handle_command(cmd) {
                                break;
                            }
                        }
                        Err(msg) => println!("{}", renderer::render_error(&msg)),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    println!("{}", renderer::render_error(&format!("Input error: {}", err)));
                    break;
                }
            }
        }

        println!("{}", renderer::render_info("Goodbye."));
        Ok(())
    }

    fn prompt_label(&self) -> String {
        match self.view.page() {
            Page::Home => "scanlens>".to_string(),
            Page::Report(kind) => format!("scanlens:{}>", kind),
        }
    }

    /// Run one command. Returns true when the shell should exit.
    fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        debug!(command = ?cmd, "Handling command");
        match cmd {
            SlashCommand::Home => {
                self.view.set_page(Page::Home);
                banner::show_home();
            }
            SlashCommand::Page { kind, file } => {
                if let Err(e) = self.open_page(kind, file) {
                    println!("{}", renderer::render_error(&e.to_string()));
                }
            }
            SlashCommand::Range { action } => {
                if let Err(e) = self.change_range(action) {
                    println!("{}", renderer::render_error(&e.to_string()));
                }
            }
            SlashCommand::Uploads => {
                print!("{}", renderer::render_uploads(self.view.cache()));
            }
            SlashCommand::Version => print!("{}", renderer::render_version()),
            SlashCommand::Clear => {
                let _ = Term::stdout().clear_screen();
            }
            SlashCommand::Help { command } => {
                print!("{}", renderer::render_help(command.as_deref()));
            }
            SlashCommand::Exit => return true,
        }
        false
    }

    fn open_page(&mut self, kind: ReportKind, file: Option<String>) -> Result<(), ScanlensError> {
        self.view.set_page(Page::Report(kind));

        match file {
            Some(file) => {
                let outcome = self.view.upload(kind, &PathBuf::from(file))?;
                println!("{}", renderer::render_upload(&outcome));
            }
            None => {
                if let Some(upload) = self.view.cache().get(kind) {
                    println!(
                        "{}",
                        renderer::render_info(&format!(
                            "Utilizing previously uploaded file: {}",
                            upload.name
                        ))
                    );
                }
            }
        }
        self.show_page(kind)
    }

    fn change_range(&mut self, action: RangeAction) -> Result<(), ScanlensError> {
        match action {
            RangeAction::Show => {
                println!("{}", renderer::render_window(&self.view.window()));
                return Ok(());
            }
            RangeAction::Set { start, end } => {
                self.view.set_window(DateWindow::parse(&start, &end)?);
            }
            RangeAction::Reset => self.view.reset_window(),
        }
        println!("{}", renderer::render_window(&self.view.window()));

        match self.view.page() {
            Page::Report(kind) if kind.is_date_filtered() => self.show_page(kind),
            _ => Ok(()),
        }
    }

    fn show_page(&self, kind: ReportKind) -> Result<(), ScanlensError> {
        let page = self.view.render(kind)?;
        print!("{}", render_page(&page, &self.view.settings));
        Ok(())
    }
}
