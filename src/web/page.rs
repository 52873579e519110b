//! HTML rendering for the single translator page.
//!
//! The whole page is rebuilt from the current form values on every request.

use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

use crate::pipeline::{LanguageResult, TranslationReport};
use crate::speech::{AudioClip, SpeechOutcome};
use crate::translation::LANGUAGES;

const GRID_COLUMNS: usize = 5;

/// A banner shown above the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    const fn class(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Warning(_) => "warning",
            Self::Error(_) => "error",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Warning(m) | Self::Error(m) => m,
        }
    }
}

/// Everything needed to draw the page.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub text: &'a str,
    pub selected: &'a [String],
    pub notices: Vec<Notice>,
    pub report: Option<&'a TranslationReport>,
}

pub fn render(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(16 * 1024);

    html.push_str(HEAD);
    html.push_str(
        "<h1>🌐 Multilingual Translator with Voice</h1>\n\
         <p class=\"subtitle\">Translate English text to multiple languages with voice output</p>\n",
    );

    render_form(&mut html, view.text, view.selected);

    for notice in &view.notices {
        let _ = writeln!(
            html,
            "<div class=\"notice {}\">{}</div>",
            notice.class(),
            encode_text(notice.message())
        );
    }

    if let Some(report) = view.report {
        for entry in &report.entries {
            render_entry(&mut html, entry);
        }
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, text: &str, selected: &[String]) {
    let _ = writeln!(
        html,
        "<form method=\"post\" action=\"/translate\" \
         onsubmit=\"var b=this.querySelector('button');b.textContent='Translating...';b.disabled=true;\">\n\
         <label for=\"text\">Enter English text to translate</label>\n\
         <textarea id=\"text\" name=\"text\" rows=\"6\">{}</textarea>\n\
         <h2>Select target languages</h2>\n\
         <div class=\"languages\" style=\"grid-template-columns: repeat({GRID_COLUMNS}, 1fr)\">",
        encode_text(text)
    );

    for (name, _) in LANGUAGES {
        let checked = if selected.iter().any(|s| s == name) {
            " checked"
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<label><input type=\"checkbox\" name=\"lang\" value=\"{}\"{checked}> {}</label>",
            encode_double_quoted_attribute(name),
            encode_text(name)
        );
    }

    html.push_str("</div>\n<button type=\"submit\">Translate</button>\n</form>\n");
}

fn render_entry(html: &mut String, entry: &LanguageResult) {
    let language = encode_text(&entry.language);
    let _ = writeln!(
        html,
        "<details open>\n<summary>{language}</summary>\n<p class=\"translation\">{}</p>",
        encode_text(&entry.text)
    );

    match &entry.speech {
        SpeechOutcome::Audio(clip) => {
            let _ = writeln!(
                html,
                "<audio controls autoplay>\n<source src=\"{}\" type=\"{}\">\n</audio>",
                clip.to_data_uri(),
                AudioClip::MIME
            );
        }
        SpeechOutcome::Unavailable => {
            let _ = writeln!(
                html,
                "<div class=\"notice warning\">Text-to-speech not available for {language}</div>"
            );
        }
        SpeechOutcome::Failed(err) => {
            let _ = writeln!(
                html,
                "<div class=\"notice error\">Error generating audio: {}</div>",
                encode_text(&err.to_string())
            );
        }
    }

    html.push_str("</details>\n");
}

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Multilingual Translator</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 0; background: #fafafa; color: #222; }
  main { max-width: 1100px; margin: 0 auto; padding: 2rem; }
  .subtitle { color: #555; }
  textarea { width: 100%; box-sizing: border-box; font: inherit; padding: .5rem; }
  .languages { display: grid; gap: .4rem; margin-bottom: 1rem; }
  button { background: #ff4b4b; color: #fff; border: 0; border-radius: .4rem; padding: .6rem 1.4rem; font: inherit; cursor: pointer; }
  button:disabled { opacity: .6; cursor: progress; }
  .notice { border-radius: .4rem; padding: .75rem 1rem; margin: 1rem 0; }
  .success { background: #e6f4ea; color: #1e6b34; }
  .warning { background: #fff8e1; color: #7a5b00; }
  .error { background: #fdecea; color: #a4262c; }
  details { background: #fff; border: 1px solid #ddd; border-radius: .4rem; padding: .5rem 1rem; margin: .75rem 0; }
  summary { font-weight: 600; cursor: pointer; }
  .translation { white-space: pre-wrap; }
</style>
</head>
<body>
<main>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::SynthesisError;
    use crate::translation::default_selection;

    fn entry(language: &str, text: &str, speech: SpeechOutcome) -> LanguageResult {
        LanguageResult {
            language: language.to_string(),
            text: text.to_string(),
            speech,
        }
    }

    #[test]
    fn test_form_checks_selected_languages_only() {
        let selected = default_selection();
        let html = render(&PageView {
            selected: &selected,
            ..Default::default()
        });

        assert!(html.contains(r#"value="Spanish" checked>"#));
        assert!(html.contains(r#"value="Portuguese" checked>"#));
        assert!(html.contains(r#"value="Russian">"#));
        assert_eq!(html.matches("type=\"checkbox\"").count(), LANGUAGES.len());
        assert_eq!(html.matches(" checked>").count(), 5);
    }

    #[test]
    fn test_text_and_notices_are_escaped() {
        let html = render(&PageView {
            text: "</textarea><script>",
            notices: vec![Notice::Error("Translation error: <oops>".to_string())],
            ..Default::default()
        });

        assert!(html.contains("&lt;/textarea&gt;&lt;script&gt;"));
        assert!(html.contains("Translation error: &lt;oops&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_entries_render_each_speech_outcome() {
        let report = TranslationReport {
            entries: vec![
                entry(
                    "Spanish",
                    "Hola",
                    SpeechOutcome::Audio(AudioClip::new(vec![0xFF, 0xF3, 0x44])),
                ),
                entry("Klingon", "Qapla'", SpeechOutcome::Unavailable),
                entry(
                    "French",
                    "Bonjour",
                    SpeechOutcome::Failed(SynthesisError::Status { status: 503 }),
                ),
            ],
        };
        let html = render(&PageView {
            report: Some(&report),
            ..Default::default()
        });

        assert_eq!(html.matches("<details open>").count(), 3);
        assert!(html.contains("<summary>Spanish</summary>"));
        assert!(html.contains(r#"<source src="data:audio/mpeg;base64,//NE" type="audio/mpeg">"#));
        assert!(html.contains("Text-to-speech not available for Klingon"));
        assert!(html.contains("Error generating audio: Speech service returned status 503"));
    }
}
