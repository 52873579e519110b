use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::time::Duration;

/// Failure of the translation call. Aborts the whole translate action.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("API key not configured. Set the {env_var} environment variable")]
    MissingApiKey { env_var: String },

    #[error("Invalid translation request: {0}")]
    InvalidRequest(&'static str),

    #[error("Failed to reach the translation service: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Translation service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode translation service response: {0}")]
    Decode(String),

    #[error("Translation service returned no text ({0})")]
    EmptyResponse(String),
}

/// A service that turns one prompt into one freeform text reply.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model identifier sent with every request.
    fn model(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, ServiceError>;
}

/// Source text plus the ordered set of languages to translate it into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_text: String,
    pub target_languages: Vec<String>,
}

impl TranslationRequest {
    /// Creates a request, dropping repeated languages but keeping first-seen order.
    pub fn new<I, S>(source_text: impl Into<String>, target_languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut languages: Vec<String> = Vec::new();
        for lang in target_languages {
            let lang = lang.into();
            if !languages.contains(&lang) {
                languages.push(lang);
            }
        }

        Self {
            source_text: source_text.into(),
            target_languages: languages,
        }
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.source_text.trim().is_empty() {
            return Err(ServiceError::InvalidRequest("source text is empty"));
        }
        if self.target_languages.is_empty() {
            return Err(ServiceError::InvalidRequest("no target languages selected"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl GeminiClient {
    pub fn new(
        endpoint: String,
        model: String,
        api_key: Option<String>,
        api_key_env: String,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint,
            model,
            api_key,
            api_key_env,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ServiceError::MissingApiKey {
                env_var: self.api_key_env.clone(),
            })?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Cow::Borrowed(prompt),
                }],
            }],
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "requesting translation");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status { status, body });
        }

        let raw = response.text().await?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&raw).map_err(|e| ServiceError::Decode(e.to_string()))?;

        extract_text(parsed)
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, ServiceError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map_or_else(|| "no candidates".to_string(), |r| format!("blocked: {r}"));
        return Err(ServiceError::EmptyResponse(reason));
    };

    let Some(content) = candidate.content else {
        let reason = candidate
            .finish_reason
            .map_or_else(|| "no content".to_string(), |r| format!("finish reason: {r}"));
        return Err(ServiceError::EmptyResponse(reason));
    };

    // An empty string is a valid reply; the parser turns it into an empty map.
    Ok(content.parts.into_iter().filter_map(|p| p.text).collect())
}
