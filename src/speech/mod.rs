//! Speech synthesis for translated text.

mod chunk;
mod client;

pub use chunk::{MAX_CHUNK_CHARS, split_text};
pub use client::{AudioClip, GoogleTts, SpeechSynthesizer, SynthesisError};

use crate::translation::speech_code;

/// Result of trying to produce audio for one language.
#[derive(Debug)]
pub enum SpeechOutcome {
    /// Audio was synthesized.
    Audio(AudioClip),
    /// The language has no speech code; nothing was requested.
    Unavailable,
    /// The speech service failed for this language only.
    Failed(SynthesisError),
}

impl SpeechOutcome {
    pub const fn audio(&self) -> Option<&AudioClip> {
        match self {
            Self::Audio(clip) => Some(clip),
            _ => None,
        }
    }
}

/// Looks up the speech code for `language` and synthesizes `text` with it.
///
/// Languages outside the catalog give [`SpeechOutcome::Unavailable`] without
/// calling the synthesizer.
pub async fn speak(
    synthesizer: &dyn SpeechSynthesizer,
    language: &str,
    text: &str,
    slow: bool,
) -> SpeechOutcome {
    let Some(locale) = speech_code(language) else {
        tracing::warn!(language, "no speech code for language");
        return SpeechOutcome::Unavailable;
    };

    match synthesizer.synthesize(text, locale, slow).await {
        Ok(clip) => SpeechOutcome::Audio(clip),
        Err(err) => {
            tracing::warn!(language, error = %err, "speech synthesis failed");
            SpeechOutcome::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSynthesizer {
        calls: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl SpeechSynthesizer for RecordingSynthesizer {
        async fn synthesize(
            &self,
            text: &str,
            locale: &str,
            _slow: bool,
        ) -> Result<AudioClip, SynthesisError> {
            self.calls
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push((text.to_string(), locale.to_string()));
            if self.fail {
                Err(SynthesisError::Status { status: 429 })
            } else {
                Ok(AudioClip::new(b"mp3".to_vec()))
            }
        }
    }

    impl RecordingSynthesizer {
        fn calls(&self) -> Vec<(String, String)> {
            self.calls
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .clone()
        }
    }

    #[tokio::test]
    async fn test_known_language_is_synthesized_with_its_code() {
        let synth = RecordingSynthesizer::default();
        let outcome = speak(&synth, "Chinese", "你好", false).await;

        assert!(outcome.audio().is_some());
        assert_eq!(synth.calls(), vec![("你好".to_string(), "zh-CN".to_string())]);
    }

    #[tokio::test]
    async fn test_unknown_language_is_unavailable_without_call() {
        let synth = RecordingSynthesizer::default();
        let outcome = speak(&synth, "Klingon", "Qapla'", false).await;

        assert!(matches!(outcome, SpeechOutcome::Unavailable));
        assert!(synth.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_reported_not_raised() {
        let synth = RecordingSynthesizer {
            fail: true,
            ..Default::default()
        };
        let outcome = speak(&synth, "French", "Bonjour", false).await;

        assert!(matches!(
            outcome,
            SpeechOutcome::Failed(SynthesisError::Status { status: 429 })
        ));
    }
}
