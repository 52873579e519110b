use anyhow::Result;

use crate::config::ResolveOptions;
use crate::pipeline::Translator;
use crate::web::{self, AppState};

pub struct ServeOptions {
    pub addr: Option<String>,
    pub languages: Vec<String>,
    pub model: Option<String>,
    pub slow: bool,
    pub cache: bool,
}

/// Starts the web page. The API key is checked here, before binding, so a
/// missing key fails at startup rather than on the first request.
pub async fn run_serve(options: ServeOptions) -> Result<()> {
    let config = super::load_resolved(&ResolveOptions {
        languages: options.languages,
        model: options.model,
        slow: options.slow,
        cache: options.cache,
        addr: options.addr,
    })?;

    let translator = Translator::from_config(&config)?;
    tracing::info!(
        model = %config.model,
        cache = config.cache_enabled,
        slow = config.slow,
        "translator ready"
    );

    let state = AppState {
        translator,
        default_languages: config.languages.clone(),
    };
    web::serve(&config.addr, state).await
}
