mod client;
mod language;
mod parser;
mod prompt;

pub use client::{GeminiClient, ServiceError, TextGenerator, TranslationRequest};
pub use language::{
    DEFAULT_SELECTION_LEN, LANGUAGES, LanguageError, default_selection, print_languages, speech_code,
    validate_language,
};
pub use parser::{
    ParseReport, Translations, parse_entry, parse_translations, parse_translations_strict,
    tokenize_lines,
};
pub use prompt::{PROMPT_TEMPLATE, build_prompt, prompt_hash};
