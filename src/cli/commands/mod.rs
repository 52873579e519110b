//! Subcommand implementations.

/// Configure command handler.
pub mod configure;

/// Web server command handler.
pub mod serve;

/// One-shot translation command handler.
pub mod translate;

use anyhow::Result;

use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};

/// Loads the config file and merges the CLI overrides into it.
pub(crate) fn load_resolved(options: &ResolveOptions) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load_or_default()?;
    resolve_config(options, &config_file)
}
