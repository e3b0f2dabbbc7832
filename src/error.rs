//! Error types for the game state container and its host surfaces.

use thiserror::Error;

/// Rejected state mutations. The operation is aborted with no partial
/// mutation and no change mark.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Repeated character: id {0}")]
    DuplicateCharacter(u32),

    #[error("No character to upgrade: id {0}")]
    UnknownCharacter(u32),

    #[error("Character roster cannot be absent")]
    MissingRoster,

    #[error("{currency} balance {balance} cannot absorb {amount}")]
    BalanceOverflow {
        currency: &'static str,
        balance: i64,
        amount: i64,
    },
}

/// Crate-level errors for configuration, scripting and output.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid step '{step}': {reason}")]
    Script { step: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<config::ConfigError> for GameError {
    fn from(err: config::ConfigError) -> Self {
        GameError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for GameError {
    fn from(err: toml::ser::Error) -> Self {
        GameError::Serialization(err.to_string())
    }
}
