//! Opt-in memoization wrappers around the generator and the synthesizer.
//!
//! A cache failure never fails the request: it is logged and the wrapped
//! service is called as if the cache were absent.

use async_trait::async_trait;
use std::sync::Arc;

use super::CacheManager;
use crate::speech::{AudioClip, SpeechSynthesizer, SynthesisError};
use crate::translation::{ServiceError, TextGenerator};

pub struct CachedGenerator<G> {
    inner: G,
    cache: Arc<CacheManager>,
}

impl<G: TextGenerator> CachedGenerator<G> {
    pub const fn new(inner: G, cache: Arc<CacheManager>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<G: TextGenerator> TextGenerator for CachedGenerator<G> {
    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        let model = self.inner.model();

        match self.cache.get_response(model, prompt) {
            Ok(Some(cached)) => {
                tracing::debug!(model, "translation reply served from cache");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "translation cache lookup failed"),
        }

        let reply = self.inner.generate(prompt).await?;

        if let Err(err) = self.cache.put_response(model, prompt, &reply) {
            tracing::warn!(error = %err, "failed to store translation reply in cache");
        }

        Ok(reply)
    }
}

pub struct CachedSynthesizer<S> {
    inner: S,
    cache: Arc<CacheManager>,
}

impl<S: SpeechSynthesizer> CachedSynthesizer<S> {
    pub const fn new(inner: S, cache: Arc<CacheManager>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<S: SpeechSynthesizer> SpeechSynthesizer for CachedSynthesizer<S> {
    async fn synthesize(
        &self,
        text: &str,
        locale: &str,
        slow: bool,
    ) -> Result<AudioClip, SynthesisError> {
        match self.cache.get_speech(text, locale, slow) {
            Ok(Some(bytes)) => {
                tracing::debug!(locale, "speech served from cache");
                return Ok(AudioClip::new(bytes));
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "speech cache lookup failed"),
        }

        let clip = self.inner.synthesize(text, locale, slow).await?;

        if let Err(err) = self.cache.put_speech(text, locale, slow, &clip.bytes) {
            tracing::warn!(error = %err, "failed to store speech in cache");
        }

        Ok(clip)
    }
}
