use sha2::{Digest, Sha256};

pub const PROMPT_TEMPLATE: &str = "Translate the following English text into these languages: {languages}\n\
     \n\
     Text: {text}\n\
     \n\
     Format the response as:\n\
     Language: Translation";

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_prompt<S: AsRef<str>>(text: &str, languages: &[S]) -> String {
    // {languages} and {text} are placeholders for string replacement, not format arguments
    let languages = languages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");

    PROMPT_TEMPLATE
        .replace("{languages}", &languages)
        .replace("{text}", text)
}

/// Hash of the prompt template, so cached responses are invalidated when it changes.
pub fn prompt_hash() -> String {
    let mut hasher = Sha256::new();
    hasher.update(PROMPT_TEMPLATE.as_bytes());
    hex::encode(hasher.finalize())
}
