use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::repl::commands::COMMAND_NAMES;

const PAGE_COMMANDS: &[&str] = &["/sast", "/sca", "/inspector", "/ins", "/inventory", "/inv"];

pub struct ReplHelper {
    files: FilenameCompleter,
}

impl Default for ReplHelper {
    fn default() -> Self {
        Self {
            files: FilenameCompleter::new(),
        }
    }
}

impl Helper for ReplHelper {}
impl Validator for ReplHelper {}
impl Highlighter for ReplHelper {}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        command_hint(line)
    }
}

/// Remaining characters of the first command name matching a partial `/cmd`.
fn command_hint(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') || trimmed.contains(' ') {
        return None;
    }
    COMMAND_NAMES
        .iter()
        .find(|name| name.starts_with(trimmed) && **name != trimmed)
        .map(|name| name[trimmed.len()..].to_string())
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let trimmed = prefix.trim_start();

        if !trimmed.starts_with('/') {
            return Ok((0, vec![]));
        }

        // Past the command name: file paths for report pages, keywords elsewhere
        if let Some(space_idx) = trimmed.find(' ') {
            let cmd = &trimmed[..space_idx];
            if PAGE_COMMANDS.contains(&cmd) {
                return self.files.complete(line, pos, ctx);
            }

            let arg_prefix = trimmed[space_idx..].trim_start();
            let arg_start = pos - arg_prefix.len();
            let words: Vec<&str> = match cmd {
                "/range" => vec!["reset"],
                "/help" => COMMAND_NAMES.iter().map(|n| n.trim_start_matches('/')).collect(),
                _ => vec![],
            };
            let matches = words
                .into_iter()
                .filter(|w| w.starts_with(arg_prefix))
                .map(|w| Pair {
                    display: w.to_string(),
                    replacement: w.to_string(),
                })
                .collect();
            return Ok((arg_start, matches));
        }

        let start = pos - trimmed.len();
        let matches: Vec<Pair> = COMMAND_NAMES
            .iter()
            .filter(|name| name.starts_with(trimmed))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();

        Ok((start, matches))
    }
}
