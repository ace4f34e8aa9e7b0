use clap::{Args, Parser, Subcommand};

use crate::models::ReportKind;

#[derive(Parser)]
#[command(name = "scanlens", version, about = "Interactive viewer for security findings exports")]
pub struct Cli {
    /// Defaults to the interactive shell
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

impl Cli {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive shell
    Shell,
    /// Render one report page and exit
    View(ViewArgs),
    /// Print each record of a JSON export flattened, one object per line
    Flatten(FlattenArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ViewArgs {
    /// Report kind: sast, sca, inspector, inventory
    pub kind: ReportKind,

    /// Export file to load
    pub file: String,

    /// First day of the date window (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Last day of the date window (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Rows to show in the filtered data table
    #[arg(long)]
    pub rows: Option<usize>,
}

#[derive(Args, Clone)]
pub struct FlattenArgs {
    /// JSON export file
    pub file: String,

    /// Path separator for nested keys
    #[arg(short, long)]
    pub separator: Option<String>,

    /// Apply a report kind's list handling
    #[arg(short, long)]
    pub kind: Option<ReportKind>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub file: String,
}
