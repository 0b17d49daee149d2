mod cli;
mod commands;
mod error;
mod render;
mod settings;

use clap::Parser;
use cli::{Cli, Command};
use error::CliError;
use settings::Settings;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = run(cli.command, &mut out).and_then(|()| out.flush().map_err(CliError::from));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Command, out: &mut impl Write) -> Result<(), CliError> {
    let settings = Settings::load();
    match command {
        Command::Solve(args) => commands::solve(&args, &settings, out),
        Command::Ingredients => Ok(render::write_ingredients(out)?),
        Command::Check { pool } => commands::check(&pool, out),
        Command::Settings(args) => commands::settings(&args, settings, out).map(|_| ()),
    }
}
