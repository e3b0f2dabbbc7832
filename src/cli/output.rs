//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::GameError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &GameError) -> String {
    match e {
        GameError::Script { .. } => format!("{} (see `gamestate run --help`)", e),
        _ => e.to_string(),
    }
}
