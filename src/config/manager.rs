use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths;
use crate::translation::{LanguageError, default_selection, speech_code, validate_language};

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_SPEECH_ENDPOINT: &str = "https://translate.google.com";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8501";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default settings in the `[voxlate]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoxlateConfig {
    /// Languages selected when none are given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

/// Settings for the generative translation service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl GeminiConfig {
    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }

    /// Gets the API key, preferring the environment variable over the config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(self.api_key_env())
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|k| !k.is_empty())
    }
}

/// Settings for the speech synthesis service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slow: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addr: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/voxlate/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub voxlate: VoxlateConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Resolved configuration after merging CLI arguments, config file and defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Languages to translate into when the caller gives none.
    pub languages: Vec<String>,
    pub gemini_endpoint: String,
    pub model: String,
    /// The API key, read once at startup.
    pub api_key: Option<String>,
    /// Where the API key is expected to come from (for error messages).
    pub api_key_env: String,
    pub gemini_timeout: Duration,
    pub speech_endpoint: String,
    pub speech_timeout: Duration,
    /// Request slowed-down speech.
    pub slow: bool,
    pub addr: String,
    pub cache_enabled: bool,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Target languages; empty means "not given".
    pub languages: Vec<String>,
    pub model: Option<String>,
    /// `--slow`; only ever turns slow speech on.
    pub slow: bool,
    /// `--cache`; only ever turns the cache on.
    pub cache: bool,
    pub addr: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values, which take
/// precedence over built-in defaults.
///
/// # Errors
///
/// Returns [`LanguageError::Unknown`] for a bad CLI language and
/// [`LanguageError::UnknownInConfig`] for a bad language in the file.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let languages = if options.languages.is_empty() {
        let configured = config_file
            .voxlate
            .languages
            .clone()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(default_selection);
        if let Some(bad) = configured.iter().find(|l| speech_code(l).is_none()) {
            return Err(LanguageError::UnknownInConfig(bad.clone()).into());
        }
        configured
    } else {
        for lang in &options.languages {
            validate_language(lang)?;
        }
        options.languages.clone()
    };

    let gemini = &config_file.gemini;
    let speech = &config_file.speech;

    Ok(ResolvedConfig {
        languages,
        gemini_endpoint: gemini
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
        model: options
            .model
            .clone()
            .or_else(|| gemini.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        api_key: gemini.get_api_key(),
        api_key_env: gemini.api_key_env().to_string(),
        gemini_timeout: Duration::from_secs(gemini.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        speech_endpoint: speech
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_SPEECH_ENDPOINT.to_string()),
        speech_timeout: Duration::from_secs(speech.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        slow: options.slow || speech.slow.unwrap_or(false),
        addr: options
            .addr
            .clone()
            .or_else(|| config_file.server.addr.clone())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string()),
        cache_enabled: options.cache || config_file.cache.enabled.unwrap_or(false),
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/voxlate/config.toml`
    /// or `~/.config/voxlate/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// Loads the config file, or returns defaults when it does not exist.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
