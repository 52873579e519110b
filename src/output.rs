//! Process-wide terminal output settings.
//!
//! Translations go to stdout so they can be piped. Spinners, audio notes and
//! warnings go to stderr. `--quiet` hides everything on stderr except
//! warnings and errors, and `NO_COLOR` turns styling off.

use std::sync::OnceLock;

static SETTINGS: OnceLock<OutputConfig> = OnceLock::new();

#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub quiet: bool,
    pub no_color: bool,
}

impl OutputConfig {
    /// Settings for this run: `quiet` from the command line, colors from
    /// the `NO_COLOR` convention (<https://no-color.org/>).
    pub fn from_env(quiet: bool) -> Self {
        Self {
            quiet,
            no_color: std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
        }
    }
}

/// Installs the settings. Only the first call has any effect.
pub fn init(config: OutputConfig) {
    let _ = SETTINGS.set(config);
}

pub fn config() -> &'static OutputConfig {
    SETTINGS.get_or_init(|| OutputConfig::from_env(false))
}

pub fn is_quiet() -> bool {
    config().quiet
}

pub fn is_no_color() -> bool {
    config().no_color
}

/// Prints progress or an audio note to stderr unless `--quiet` is set.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Prints to stderr even in quiet mode.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_keeps_quiet_flag() {
        assert!(OutputConfig::from_env(true).quiet);
        assert!(!OutputConfig::from_env(false).quiet);
    }
}
