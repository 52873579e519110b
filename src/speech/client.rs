use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::chunk::{MAX_CHUNK_CHARS, split_text};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Failure to synthesize audio for one language. Never aborts other languages.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("No text to speak")]
    EmptyText,

    #[error("Invalid speech endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("Failed to reach the speech service: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Speech service returned status {status}")]
    Status { status: u16 },

    #[error("Speech service returned no audio")]
    EmptyAudio,
}

/// Encoded audio for one translation, held in memory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
}

impl AudioClip {
    pub const MIME: &'static str = "audio/mpeg";

    pub const fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// `data:` URI for embedding the clip in an inline audio player.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", Self::MIME, STANDARD.encode(&self.bytes))
    }
}

/// A service that speaks text in a given locale.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(
        &self,
        text: &str,
        locale: &str,
        slow: bool,
    ) -> Result<AudioClip, SynthesisError>;
}

/// Client for the Google Translate text-to-speech endpoint.
pub struct GoogleTts {
    client: Client,
    endpoint: String,
}

impl GoogleTts {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, endpoint })
    }

    fn chunk_url(&self, chunk: &str, locale: &str, slow: bool) -> Result<Url, SynthesisError> {
        let speed = if slow { "0.3" } else { "1" };
        let base = format!("{}/translate_tts", self.endpoint.trim_end_matches('/'));

        Ok(Url::parse_with_params(
            &base,
            &[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", locale),
                ("q", chunk),
                ("ttsspeed", speed),
            ],
        )?)
    }

    async fn synthesize_chunk(
        &self,
        chunk: &str,
        locale: &str,
        slow: bool,
    ) -> Result<Vec<u8>, SynthesisError> {
        let url = self.chunk_url(chunk, locale, slow)?;

        let response = self
            .client
            .get(url)
            .header("Referer", "https://translate.google.com/")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SynthesisError::Status {
                status: response.status().as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(
        &self,
        text: &str,
        locale: &str,
        slow: bool,
    ) -> Result<AudioClip, SynthesisError> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        tracing::debug!(locale, chunks = chunks.len(), "synthesizing speech");

        // MP3 frames from consecutive responses can simply be concatenated.
        let mut audio = Vec::new();
        for chunk in &chunks {
            audio.extend(self.synthesize_chunk(chunk, locale, slow).await?);
        }

        if audio.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        Ok(AudioClip::new(audio))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> GoogleTts {
        GoogleTts::new("https://tts.example".to_string(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_data_uri() {
        let clip = AudioClip::new(vec![0xFF, 0xF3, 0x44]);
        assert_eq!(clip.to_data_uri(), "data:audio/mpeg;base64,//NE");
    }

    #[test]
    fn test_chunk_url_encodes_text() {
        let url = client().chunk_url("¿Qué tal?", "es", false).unwrap();
        assert_eq!(url.path(), "/translate_tts");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("tl".to_string(), "es".to_string())));
        assert!(pairs.contains(&("q".to_string(), "¿Qué tal?".to_string())));
        assert!(pairs.contains(&("ttsspeed".to_string(), "1".to_string())));
    }

    #[test]
    fn test_chunk_url_slow_speed() {
        let url = client().chunk_url("Hola", "es", true).unwrap();
        assert!(url.query().unwrap().contains("ttsspeed=0.3"));
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected_without_request() {
        let err = client().synthesize("   ", "es", false).await.unwrap_err();
        assert!(matches!(err, SynthesisError::EmptyText));
    }
}
