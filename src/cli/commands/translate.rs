use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ResolveOptions;
use crate::fs::{atomic_write, audio_path};
use crate::input::InputSource;
use crate::pipeline::{LanguageResult, Translator};
use crate::speech::SpeechOutcome;
use crate::translation::TranslationRequest;
use crate::ui::{Spinner, Style};
use crate::{status, warn};

pub struct TranslateOptions {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub languages: Vec<String>,
    pub model: Option<String>,
    pub slow: bool,
    pub cache: bool,
    pub save_audio: Option<PathBuf>,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let config = super::load_resolved(&ResolveOptions {
        languages: options.languages,
        model: options.model,
        slow: options.slow,
        cache: options.cache,
        addr: None,
    })?;

    let translator = Translator::from_config(&config)?;
    let source_text = InputSource::from_args(options.text, options.file).read()?;
    let request = TranslationRequest::new(source_text, &config.languages);

    if let Some(dir) = &options.save_audio {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    let spinner = Spinner::new("Translating...");
    let translations = translator.translate(&request).await;
    spinner.stop();
    let translations = translations?;

    if translations.is_empty() {
        status!("{} Translation completed!", Style::success("✓"));
        warn!(
            "{} The reply contained no 'Language: Translation' lines",
            Style::warning("Warning:")
        );
        return Ok(());
    }

    let mut audio_count = 0;
    for (language, text) in translations {
        let spinner = Spinner::new(&format!("Generating audio for {language}..."));
        let speech = translator.speak(&language, &text).await;
        spinner.stop();

        let entry = LanguageResult {
            language,
            text,
            speech,
        };
        print_entry(&entry);

        if entry.speech.audio().is_some() {
            audio_count += 1;
        }
        if let Some(dir) = &options.save_audio {
            save_entry_audio(dir, &entry)?;
        }
    }

    status!("{} Translation completed!", Style::success("✓"));
    if options.save_audio.is_some() {
        status!(
            "  {}",
            Style::secondary(format!("{audio_count} audio file(s) written"))
        );
    }

    Ok(())
}

fn print_entry(entry: &LanguageResult) {
    println!("{}: {}", Style::header(&entry.language), entry.text);

    match &entry.speech {
        SpeechOutcome::Audio(clip) => {
            status!(
                "  {}",
                Style::secondary(format!("♪ audio ready ({} bytes)", clip.bytes.len()))
            );
        }
        SpeechOutcome::Unavailable => {
            warn!(
                "  {} Text-to-speech not available for {}",
                Style::warning("!"),
                entry.language
            );
        }
        SpeechOutcome::Failed(e) => {
            warn!(
                "  {} Error generating audio: {e}",
                Style::error("✗")
            );
        }
    }
}

fn save_entry_audio(dir: &Path, entry: &LanguageResult) -> Result<()> {
    let Some(clip) = entry.speech.audio() else {
        return Ok(());
    };

    let path = audio_path(dir, &entry.language);
    atomic_write(&path, &clip.bytes)?;
    status!(
        "  {} {}",
        Style::label("saved"),
        Style::secondary(path.display())
    );

    Ok(())
}
