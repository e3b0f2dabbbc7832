//! Merge rules: defaults first, every later source overrides.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("initial.coins", 10_i64)?
        .set_default("initial.stars", 0_i64)?
        .set_default("logging.level", "info")
}
