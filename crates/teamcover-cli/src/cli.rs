use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Find the smallest teams of producers that cover an ingredient recipe
#[derive(Debug, Parser)]
#[command(name = "teamcover", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve one or more recipes against a producer pool
    Solve(SolveArgs),
    /// List ingredients and their ranking values
    Ingredients,
    /// Load a producer pool and report what it can supply
    Check {
        /// Producer pool (JSON array of {label, ingredients})
        #[arg(short, long)]
        pool: PathBuf,
    },
    /// Show or change the stored defaults
    Settings(SettingsArgs),
}

#[derive(Debug, clap::Args)]
pub struct SolveArgs {
    /// Producer pool (JSON array of {label, ingredients})
    #[arg(short, long)]
    pub pool: PathBuf,

    /// Recipe as name=amount pairs, e.g. oil=22,corn=17; repeat to solve several
    #[arg(short, long = "recipe", required = true)]
    pub recipes: Vec<String>,

    /// Largest team to consider
    #[arg(short = 'n', long)]
    pub max_team_size: Option<usize>,

    /// Search time budget per recipe in milliseconds
    #[arg(short, long)]
    pub timeout_ms: Option<u64>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args)]
pub struct SettingsArgs {
    #[arg(long)]
    pub max_team_size: Option<usize>,

    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[arg(long)]
    pub json: Option<bool>,

    /// Write the resulting settings to the settings file
    #[arg(long)]
    pub save: bool,
}
