//! CLI route: run context and command dispatch.

use crate::cli::parse::{Cli, Commands, OutputFormat};
use crate::cli::presentation::{format_config_toml, format_report_json, format_report_text};
use crate::config::{ConfigLoader, GameConfig};
use crate::context::GameContext;
use crate::error::GameError;
use crate::script::run_script;
use tracing::{debug, info};

/// Runtime context for CLI execution: resolved config and output format.
pub struct RunContext {
    config: GameConfig,
    format: OutputFormat,
}

impl RunContext {
    /// Resolve configuration from an explicit file or the workspace, then
    /// apply balance overrides from the command line.
    pub fn new(cli: &Cli) -> Result<Self, GameError> {
        let mut config = match cli.config {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&cli.workspace)?,
        };
        if let Some(coins) = cli.coins {
            config.initial.coins = coins;
        }
        if let Some(stars) = cli.stars {
            config.initial.stars = stars;
        }
        config.validate()?;

        Ok(Self::with_config(config, cli.format))
    }

    pub fn with_config(config: GameConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, GameError> {
        match command {
            Commands::Run { steps } => {
                debug!(steps = steps.len(), "Running script");
                let mut context = GameContext::from_config(&self.config);
                let report = run_script(&mut context, steps);
                info!(flushes = report.flushes.len(), "Run completed");
                match self.format {
                    OutputFormat::Json => format_report_json(&report),
                    OutputFormat::Text => Ok(format_report_text(&report)),
                }
            }
            Commands::ShowConfig => format_config_toml(&self.config),
        }
    }
}
