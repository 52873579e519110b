//! Parser turning the model's freeform reply into a language → translation map.
//!
//! Parsing is best-effort and never fails. It runs in two stages:
//!
//! 1. [`tokenize_lines`] splits the reply into trimmed, non-blank lines.
//! 2. [`parse_entry`] splits a line at its first `:` into label and value.
//!    Lines without a `:` are dropped.
//!
//! Labels are not checked against the requested languages, and any line that
//! contains a colon becomes an entry. A translation which itself contains a
//! colon on a line of its own is therefore mis-split. [`parse_translations_strict`]
//! exists so tests can detect replies that degraded this way.

const SEPARATOR: char = ':';

/// Insertion-ordered mapping from language label to translated text.
///
/// Inserting an existing label replaces its text but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    entries: Vec<(String, String)>,
}

impl Translations {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, language: String, text: String) {
        if let Some(entry) = self.entries.iter_mut().find(|(l, _)| *l == language) {
            entry.1 = text;
        } else {
            self.entries.push((language, text));
        }
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == language)
            .map(|(_, t)| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, t)| (l.as_str(), t.as_str()))
    }
}

impl IntoIterator for Translations {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Translations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut translations = Self::new();
        for (language, text) in iter {
            translations.insert(language.into(), text.into());
        }
        translations
    }
}

/// Splits a reply into trimmed lines, skipping blank ones.
pub fn tokenize_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(str::trim).filter(|line| !line.is_empty())
}

/// Splits a line at the first separator into a trimmed `(label, value)` pair.
///
/// Returns `None` for lines without a separator. Further separators stay in
/// the value.
pub fn parse_entry(line: &str) -> Option<(&str, &str)> {
    line.split_once(SEPARATOR)
        .map(|(label, value)| (label.trim(), value.trim()))
}

/// Parses a reply into translations, dropping lines that are not entries.
pub fn parse_translations(text: &str) -> Translations {
    tokenize_lines(text).filter_map(parse_entry).collect()
}

/// Why a reply did not cleanly match the requested languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error(
    "malformed translation reply ({})",
    describe(.dropped_lines, .missing, .unexpected, *.empty)
)]
pub struct ParseReport {
    /// Non-blank lines dropped for having no separator.
    pub dropped_lines: Vec<String>,
    /// Requested languages with no entry in the reply.
    pub missing: Vec<String>,
    /// Labels in the reply that were not requested.
    pub unexpected: Vec<String>,
    /// The reply produced no entries at all.
    pub empty: bool,
}

impl ParseReport {
    fn is_clean(&self) -> bool {
        self.dropped_lines.is_empty()
            && self.missing.is_empty()
            && self.unexpected.is_empty()
            && !self.empty
    }
}

fn describe(dropped: &[String], missing: &[String], unexpected: &[String], empty: bool) -> String {
    let mut problems = Vec::new();
    if empty {
        problems.push("no entries parsed".to_string());
    }
    if !dropped.is_empty() {
        problems.push(format!("{} line(s) dropped", dropped.len()));
    }
    if !missing.is_empty() {
        problems.push(format!("missing: {}", missing.join(", ")));
    }
    if !unexpected.is_empty() {
        problems.push(format!("unexpected: {}", unexpected.join(", ")));
    }
    problems.join("; ")
}

/// Strict variant of [`parse_translations`] for tests and diagnostics.
///
/// Fails when any non-blank line is dropped, when nothing is parsed, or when
/// the labels differ from `expected`.
pub fn parse_translations_strict<S: AsRef<str>>(
    text: &str,
    expected: &[S],
) -> Result<Translations, ParseReport> {
    let mut translations = Translations::new();
    let mut report = ParseReport::default();

    for line in tokenize_lines(text) {
        match parse_entry(line) {
            Some((label, value)) => translations.insert(label.to_string(), value.to_string()),
            None => report.dropped_lines.push(line.to_string()),
        }
    }

    report.empty = translations.is_empty();
    report.missing = expected
        .iter()
        .map(AsRef::as_ref)
        .filter(|lang| translations.get(lang).is_none())
        .map(str::to_string)
        .collect();
    report.unexpected = translations
        .languages()
        .filter(|label| !expected.iter().any(|e| e.as_ref() == *label))
        .map(str::to_string)
        .collect();

    if report.is_clean() {
        Ok(translations)
    } else {
        Err(report)
    }
}
