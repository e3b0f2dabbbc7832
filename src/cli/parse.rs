//! CLI parse: clap types for gamestate. No behavior; definitions only.

use crate::script::Step;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Gamestate CLI - run shop transactions and watch change notifications
#[derive(Parser)]
#[command(name = "gamestate")]
#[command(about = "Game state container with deferred, deduplicated change notifications")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (for config/config.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initial coins (overrides config)
    #[arg(long)]
    pub coins: Option<i64>,

    /// Initial stars (overrides config)
    #[arg(long)]
    pub stars: Option<i64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run shop steps, flushing on `flush` steps and once at the end
    Run {
        /// Steps: use-coins:N, buy-stars:S:C, unlock:ID:S, upgrade:ID:C, flush
        #[arg(required = true, value_parser = Step::parse)]
        steps: Vec<Step>,
    },
    /// Print the resolved configuration as TOML
    ShowConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
