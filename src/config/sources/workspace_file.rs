//! Workspace config file source: config/config.toml, then config/{env}.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_ENV: &str = "development";

/// Workspace config files in the order they are layered.
pub fn workspace_config_paths(workspace_root: &Path) -> [PathBuf; 2] {
    let env_name = std::env::var("GAMESTATE_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());
    let dir = workspace_root.join("config");
    [dir.join("config.toml"), dir.join(format!("{}.toml", env_name))]
}

/// Layer whichever workspace config files exist onto `builder`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let layered = workspace_config_paths(workspace_root)
        .into_iter()
        .fold(builder, |builder, path| {
            if !path.is_file() {
                debug!(config_path = %path.display(), "No workspace configuration file");
                return builder;
            }
            builder.add_source(File::from(path).required(false))
        });
    Ok(layered)
}
