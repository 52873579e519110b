//! The translate-then-speak flow shared by the CLI and the web page.
//!
//! One request runs strictly in order: build the prompt, call the generator,
//! parse the reply, then synthesize speech for each entry one at a time.
//! A generator failure aborts the request with no partial results; a speech
//! failure only affects its own entry.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::cache::{CacheManager, CachedGenerator, CachedSynthesizer};
use crate::config::ResolvedConfig;
use crate::speech::{GoogleTts, SpeechOutcome, SpeechSynthesizer, speak};
use crate::translation::{
    GeminiClient, ServiceError, TextGenerator, TranslationRequest, Translations, build_prompt,
    parse_translations,
};

/// One parsed translation and what happened when speaking it.
#[derive(Debug)]
pub struct LanguageResult {
    pub language: String,
    pub text: String,
    pub speech: SpeechOutcome,
}

/// Everything produced for one request, in reply order.
#[derive(Debug, Default)]
pub struct TranslationReport {
    pub entries: Vec<LanguageResult>,
}

impl TranslationReport {
    /// True when the reply contained no parseable lines.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn audio_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.speech.audio().is_some())
            .count()
    }
}

#[derive(Clone)]
pub struct Translator {
    generator: Arc<dyn TextGenerator>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    slow: bool,
}

impl Translator {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        slow: bool,
    ) -> Self {
        Self {
            generator,
            synthesizer,
            slow,
        }
    }

    /// Builds the Gemini + Google TTS translator described by `config`,
    /// wrapped in the cache layer when it is enabled.
    ///
    /// Fails when no API key is available.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        if config.api_key.is_none() {
            return Err(ServiceError::MissingApiKey {
                env_var: config.api_key_env.clone(),
            }
            .into());
        }

        let gemini = GeminiClient::new(
            config.gemini_endpoint.clone(),
            config.model.clone(),
            config.api_key.clone(),
            config.api_key_env.clone(),
            config.gemini_timeout,
        )
        .context("Failed to build translation client")?;
        let tts = GoogleTts::new(config.speech_endpoint.clone(), config.speech_timeout)
            .context("Failed to build speech client")?;

        if !config.cache_enabled {
            return Ok(Self::new(Arc::new(gemini), Arc::new(tts), config.slow));
        }

        let cache = Arc::new(CacheManager::new()?);
        Ok(Self::new(
            Arc::new(CachedGenerator::new(gemini, Arc::clone(&cache))),
            Arc::new(CachedSynthesizer::new(tts, cache)),
            config.slow,
        ))
    }

    /// Requests translations and parses the reply.
    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<Translations, ServiceError> {
        request.validate()?;

        let prompt = build_prompt(&request.source_text, &request.target_languages);
        let reply = self.generator.generate(&prompt).await?;
        let translations = parse_translations(&reply);

        if translations.is_empty() {
            tracing::warn!(
                reply_len = reply.len(),
                "translation reply contained no 'Language: Translation' lines"
            );
        } else {
            tracing::debug!(entries = translations.len(), "parsed translation reply");
        }

        Ok(translations)
    }

    /// Speaks one translation.
    pub async fn speak(&self, language: &str, text: &str) -> SpeechOutcome {
        speak(self.synthesizer.as_ref(), language, text, self.slow).await
    }

    /// Translates, then speaks every entry sequentially.
    pub async fn run(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationReport, ServiceError> {
        let translations = self.translate(request).await?;

        let mut report = TranslationReport::default();
        for (language, text) in translations {
            let speech = self.speak(&language, &text).await;
            report.entries.push(LanguageResult {
                language,
                text,
                speech,
            });
        }

        Ok(report)
    }
}
