mod manager;

pub use manager::{
    CacheConfig, ConfigFile, ConfigManager, DEFAULT_ADDR, DEFAULT_API_KEY_ENV,
    DEFAULT_GEMINI_ENDPOINT, DEFAULT_MODEL, DEFAULT_SPEECH_ENDPOINT, DEFAULT_TIMEOUT_SECS,
    GeminiConfig, ResolveOptions, ResolvedConfig, ServerConfig, SpeechConfig, VoxlateConfig,
    resolve_config,
};
