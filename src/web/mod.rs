//! The browser front end: one page with a text box, a language grid and
//! a results area with playable audio.

mod page;

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use tokio::net::TcpListener;

use crate::input::MAX_INPUT_SIZE;
use crate::pipeline::Translator;
use crate::translation::{TranslationRequest, speech_code};

pub use page::{Notice, PageView, render};

#[derive(Clone)]
pub struct AppState {
    pub translator: Translator,
    /// Languages checked when the page is first opened.
    pub default_languages: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/translate", post(translate))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

/// Binds `addr` and serves the page until Ctrl+C.
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local = listener.local_addr()?;

    tracing::info!(%local, "Listening on http://{local}");
    crate::status!("Serving on http://{local} (Ctrl+C to stop)");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown requested");
    }
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render(&PageView {
        selected: &state.default_languages,
        ..Default::default()
    }))
}

#[derive(Debug, Default)]
struct TranslateForm {
    text: String,
    languages: Vec<String>,
}

impl TranslateForm {
    /// Reads the urlencoded body. Unknown `lang` values are dropped so only
    /// catalog languages ever reach the prompt.
    fn parse(body: &[u8]) -> Self {
        let mut form = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "text" => form.text = value.into_owned(),
                "lang" if speech_code(&value).is_some() => {
                    if !form.languages.iter().any(|l| *l == value) {
                        form.languages.push(value.into_owned());
                    }
                }
                _ => {}
            }
        }
        form
    }
}

async fn translate(State(state): State<AppState>, body: Bytes) -> Html<String> {
    let form = TranslateForm::parse(&body);
    let mut view = PageView {
        text: &form.text,
        selected: &form.languages,
        ..Default::default()
    };

    if form.text.trim().is_empty() || form.languages.is_empty() {
        view.notices.push(Notice::Warning(
            "Enter some text and select at least one language".to_string(),
        ));
        return Html(render(&view));
    }

    if form.text.len() > MAX_INPUT_SIZE {
        view.notices.push(Notice::Warning(format!(
            "Text is too long (limit is {} KB)",
            MAX_INPUT_SIZE / 1024
        )));
        return Html(render(&view));
    }

    tracing::info!(
        chars = form.text.chars().count(),
        languages = form.languages.len(),
        "translation requested"
    );

    let request = TranslationRequest::new(form.text.trim(), &form.languages);
    match state.translator.run(&request).await {
        Ok(report) => {
            view.notices
                .push(Notice::Success("Translation completed!".to_string()));
            if report.is_empty() {
                view.notices.push(Notice::Warning(
                    "The reply contained no 'Language: Translation' lines".to_string(),
                ));
            }
            tracing::info!(
                entries = report.entries.len(),
                audio = report.audio_count(),
                "translation finished"
            );
            Html(render(&PageView {
                report: Some(&report),
                ..view
            }))
        }
        Err(e) => {
            tracing::warn!(error = %e, "translation failed");
            view.notices
                .push(Notice::Error(format!("Translation error: {e}")));
            Html(render(&view))
        }
    }
}
