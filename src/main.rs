use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scanlens::cli::{self, Cli, Commands};
use scanlens::config::{discover_config, ViewSettings};
use scanlens::errors::ScanlensError;

fn main() {
    let cli = Cli::parse();

    // Initialize logging. Logs go to stderr so page output stays clean.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), ScanlensError> {
    // Validation reads only the named file, never the discovered config
    let command = match cli.command {
        Some(Commands::Validate(args)) => return cli::validate::handle_validate(args),
        other => other,
    };

    let config_path = cli.config.as_ref().map(PathBuf::from);
    let config = discover_config(config_path.as_deref())?;
    let settings = ViewSettings::from_config(&config);

    match command {
        None | Some(Commands::Shell) => cli::shell::handle_shell(settings),
        Some(Commands::View(args)) => cli::view::handle_view(args, settings),
        Some(Commands::Flatten(args)) => cli::flatten::handle_flatten(args, settings),
        Some(Commands::Validate(args)) => cli::validate::handle_validate(args),
    }
}
