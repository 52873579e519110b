//! XDG-style path utilities for configuration and cache directories.
//!
//! XDG Base Directory conventions are preferred over OS-specific
//! locations on every platform.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "voxlate";

/// Returns the configuration directory for voxlate.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/voxlate` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/voxlate` otherwise
pub fn config_dir() -> Result<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Returns the cache directory for voxlate.
///
/// Resolution order:
/// 1. `$XDG_CACHE_HOME/voxlate` if `XDG_CACHE_HOME` is set
/// 2. `~/.cache/voxlate` otherwise
pub fn cache_dir() -> Result<PathBuf> {
    xdg_dir("XDG_CACHE_HOME", ".cache")
}

fn xdg_dir(env_var: &str, home_fallback: &str) -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var(env_var)
        && !xdg.is_empty()
    {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }

    let home = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home.join(home_fallback).join(APP_DIR))
}
