//! Command handlers -- one module per subcommand

pub mod browse;
pub mod config;

use std::path::Path;

use tracing::debug;

use shelf_core::config::ShelfConfig;

use crate::error::CliError;

/// Load the effective configuration for a command.
///
/// A missing file is not an error here: defaults plus `SHELF_*` environment
/// overrides are used instead. Parse and validation errors still fail.
pub async fn load_config(path: &Path) -> Result<ShelfConfig, CliError> {
    if tokio::fs::try_exists(path).await? {
        return Ok(ShelfConfig::load(path).await?);
    }

    debug!(path = %path.display(), "config file not found, using defaults");
    let mut config = ShelfConfig::default();
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}
