//! Configuration System
//!
//! Layered configuration for the host: built-in defaults, the user-level file,
//! workspace files, an explicit file, then `GAMESTATE__*` environment
//! variables. Only the initial balances and logging are configurable; game
//! state itself is never persisted.

use crate::error::GameError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge;
mod sources;

pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Balances applied when the game context is (re)initialized
    #[serde(default)]
    pub initial: InitialBalances,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Starting currency balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialBalances {
    #[serde(default = "default_coins")]
    pub coins: i64,

    #[serde(default)]
    pub stars: i64,
}

fn default_coins() -> i64 {
    10
}

impl Default for InitialBalances {
    fn default() -> Self {
        Self {
            coins: default_coins(),
            stars: 0,
        }
    }
}

impl InitialBalances {
    pub fn validate(&self) -> Result<(), String> {
        if self.coins < 0 {
            return Err(format!("Initial coins cannot be negative: {}", self.coins));
        }
        if self.stars < 0 {
            return Err(format!("Initial stars cannot be negative: {}", self.stars));
        }
        Ok(())
    }
}

impl GameConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), GameError> {
        self.initial.validate().map_err(GameError::ConfigError)?;
        self.logging.validate().map_err(GameError::ConfigError)?;
        Ok(())
    }
}

/// Loads [`GameConfig`] from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global file, workspace files and environment.
    pub fn load(workspace_root: &Path) -> Result<GameConfig, GameError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        Self::finish(builder.add_source(env_source()).build()?)
    }

    /// Load defaults and a single explicit file (plus environment).
    pub fn load_from_file(path: &Path) -> Result<GameConfig, GameError> {
        if !path.exists() {
            return Err(GameError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let built = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true))
            .add_source(env_source())
            .build()?;
        Self::finish(built)
    }

    /// User-level config file location, if `HOME` is set.
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_config_path()
    }

    fn finish(built: Config) -> Result<GameConfig, GameError> {
        let config: GameConfig = built.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("GAMESTATE")
        .separator("__")
        .try_parsing(true)
}
