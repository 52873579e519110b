//! The fixed language catalog and its speech-locale codes.

use crate::ui::Style;

/// Number of catalog entries selected when the user has not chosen any.
pub const DEFAULT_SELECTION_LEN: usize = 5;

/// Language names offered for translation, paired with the speech-locale
/// code used when synthesizing audio for them.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("Spanish", "es"),
    ("French", "fr"),
    ("German", "de"),
    ("Italian", "it"),
    ("Portuguese", "pt"),
    ("Russian", "ru"),
    ("Japanese", "ja"),
    ("Chinese", "zh-CN"),
    ("Korean", "ko"),
    ("Arabic", "ar"),
    ("Hindi", "hi"),
    ("Dutch", "nl"),
    ("Swedish", "sv"),
    ("Greek", "el"),
    ("Turkish", "tr"),
    ("Urdu", "ur"),
    ("Bengali", "bn"),
    ("Thai", "th"),
    ("Vietnamese", "vi"),
    ("Polish", "pl"),
    ("Ukrainian", "uk"),
    ("Farsi", "fa"),
    ("Hebrew", "he"),
    ("Malay", "ms"),
    ("Indonesian", "id"),
    // Spoken with the English voice.
    ("Gemini", "en"),
];

/// Returns the speech-locale code for a language name.
///
/// Lookup is exact and case-sensitive: labels emitted by the model that do
/// not match a catalog name have no speech code.
pub fn speech_code(language: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, code)| *code)
}

/// Returns the catalog names pre-selected in a fresh form.
pub fn default_selection() -> Vec<String> {
    LANGUAGES
        .iter()
        .take(DEFAULT_SELECTION_LEN)
        .map(|(name, _)| (*name).to_string())
        .collect()
}

/// Prints the catalog with speech codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported languages"));
    for (name, code) in LANGUAGES {
        println!("  {:12} {}", Style::value(name), Style::secondary(code));
    }
}

/// A language name outside the catalog.
#[derive(Debug, thiserror::Error)]
pub enum LanguageError {
    /// Given with `--lang` on the command line.
    #[error(
        "Invalid language: '{0}'\n\n\
         Valid languages: Spanish, French, German, Italian, Portuguese, ...\n\
         Run 'voxlate languages' to see the full list."
    )]
    Unknown(String),

    /// Listed under `[voxlate] languages` in config.toml.
    #[error(
        "Invalid language in config file: '{0}'\n\n\
         Fix `[voxlate] languages` or run 'voxlate configure'.\n\
         Run 'voxlate languages' to see the full list."
    )]
    UnknownInConfig(String),
}

/// Validates that the given language name is in the catalog.
///
/// # Errors
///
/// Returns [`LanguageError::Unknown`] if the name is not one of the catalog entries.
pub fn validate_language(language: &str) -> Result<(), LanguageError> {
    if speech_code(language).is_some() {
        Ok(())
    } else {
        Err(LanguageError::Unknown(language.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_26_entries() {
        assert_eq!(LANGUAGES.len(), 26);
    }

    #[test]
    fn test_speech_code_known() {
        assert_eq!(speech_code("Spanish"), Some("es"));
        assert_eq!(speech_code("French"), Some("fr"));
        assert_eq!(speech_code("Chinese"), Some("zh-CN"));
        assert_eq!(speech_code("Gemini"), Some("en"));
    }

    #[test]
    fn test_speech_code_unknown() {
        assert_eq!(speech_code("Klingon"), None);
        assert_eq!(speech_code(""), None);
        assert_eq!(speech_code("spanish"), None); // Case sensitive
    }

    #[test]
    fn test_default_selection_is_first_five() {
        assert_eq!(
            default_selection(),
            vec!["Spanish", "French", "German", "Italian", "Portuguese"]
        );
    }

    #[test]
    fn test_validate_language() {
        assert!(validate_language("Japanese").is_ok());
        assert!(validate_language("Klingon").is_err());
        assert!(validate_language("").is_err());
    }

    #[test]
    fn test_validate_language_error_names_the_language() {
        let Err(err) = validate_language("Elvish") else {
            panic!("expected an error");
        };
        assert!(matches!(err, LanguageError::Unknown(ref l) if l == "Elvish"));
        assert!(err.to_string().starts_with("Invalid language: 'Elvish'"));
    }
}
