use crate::models::ReportKind;

/// All slash commands supported by the REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Home,
    Page {
        kind: ReportKind,
        file: Option<String>,
    },
    Range {
        action: RangeAction,
    },
    Uploads,
    Version,
    Clear,
    Help {
        command: Option<String>,
    },
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeAction {
    Show,
    Set { start: String, end: String },
    Reset,
}

/// Description of a command for help display.
pub struct CommandHelp {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub static COMMAND_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "home",
        usage: "/home",
        description: "Show the welcome page",
    },
    CommandHelp {
        name: "sast",
        usage: "/sast [file.json]",
        description: "Semgrep SAST findings. With a file, upload it and replace the cached one.",
    },
    CommandHelp {
        name: "sca",
        usage: "/sca [file.json]",
        description: "Semgrep SCA (supply chain) findings",
    },
    CommandHelp {
        name: "inspector",
        usage: "/inspector [file.json]",
        description: "AWS Inspector findings as a flattened table",
    },
    CommandHelp {
        name: "inventory",
        usage: "/inventory [file.csv]",
        description: "AWS resource inventory pivoted by type and region",
    },
    CommandHelp {
        name: "range",
        usage: "/range [<start> <end> | reset]   dates as YYYY-MM-DD",
        description: "Show or change the date window for SAST and SCA pages",
    },
    CommandHelp {
        name: "uploads",
        usage: "/uploads",
        description: "List the files cached in this session",
    },
    CommandHelp {
        name: "version",
        usage: "/version",
        description: "Show version and build info",
    },
    CommandHelp {
        name: "clear",
        usage: "/clear",
        description: "Clear the terminal screen",
    },
    CommandHelp {
        name: "help",
        usage: "/help [command]",
        description: "Show help for all or a specific command",
    },
    CommandHelp {
        name: "exit",
        usage: "/exit",
        description: "Quit the viewer",
    },
];

/// All command names for tab completion.
pub static COMMAND_NAMES: &[&str] = &[
    "/home",
    "/sast",
    "/sca",
    "/inspector",
    "/inventory",
    "/range",
    "/uploads",
    "/version",
    "/clear",
    "/help",
    "/exit",
];

/// Parse a raw input line into a SlashCommand, or return an error message.
pub fn parse_command(input: &str) -> Result<SlashCommand, String> {
    let input = input.trim();
    if !input.starts_with('/') {
        return Err("Commands must start with /. Type /help for available commands.".into());
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.is_empty() {
        return Err("Empty command".into());
    }

    let cmd = parts[0];
    let args = &parts[1..];

    match cmd {
        "/home" => Ok(SlashCommand::Home),
        "/sast" | "/sca" | "/inspector" | "/ins" | "/inventory" | "/inv" => {
            let kind = cmd.trim_start_matches('/').parse::<ReportKind>()?;
            Ok(SlashCommand::Page {
                kind,
                file: parse_file(args),
            })
        }
        "/range" => parse_range(args),
        "/uploads" => Ok(SlashCommand::Uploads),
        "/version" => Ok(SlashCommand::Version),
        "/clear" => Ok(SlashCommand::Clear),
        "/help" => Ok(SlashCommand::Help {
            command: args.first().map(|s| s.trim_start_matches('/').to_string()),
        }),
        "/exit" | "/quit" | "/q" => Ok(SlashCommand::Exit),
        other => Err(format!("Unknown command: {}. Type /help for available commands.", other)),
    }
}

/// Paths may contain spaces; rejoin everything after the command. Surrounding
/// quotes are dropped.
fn parse_file(args: &[&str]) -> Option<String> {
    if args.is_empty() {
        return None;
    }
    let joined = args.join(" ");
    let unquoted = joined
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| joined.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(&joined);
    Some(unquoted.to_string())
}

fn parse_range(args: &[&str]) -> Result<SlashCommand, String> {
    let action = match args {
        [] => RangeAction::Show,
        ["reset"] => RangeAction::Reset,
        [start, end] => RangeAction::Set {
            start: start.to_string(),
            end: end.to_string(),
        },
        _ => return Err("Usage: /range [<start> <end> | reset]".into()),
    };
    Ok(SlashCommand::Range { action })
}
