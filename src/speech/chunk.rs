//! Splitting long text into pieces the speech endpoint accepts.

/// Longest piece, in characters, sent in a single speech request.
pub const MAX_CHUNK_CHARS: usize = 100;

const PUNCTUATION: &[char] = &[
    '.', '!', '?', ';', ':', ',', '\n', '。', '！', '？', '；', '，', '、', '؟', '،', '।',
];

/// Splits text into trimmed pieces of at most `max_chars` characters.
///
/// A piece ends after the last punctuation mark that fits, otherwise at the
/// last whitespace, otherwise in the middle of the word. Blank input yields
/// no pieces.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut remaining = text.trim();

    while remaining.chars().count() > max_chars {
        // Byte offset of the first character that no longer fits.
        let limit = remaining
            .char_indices()
            .nth(max_chars)
            .map_or(remaining.len(), |(i, _)| i);
        let window = &remaining[..limit];

        let cut = window
            .char_indices()
            .rev()
            .find(|(_, c)| PUNCTUATION.contains(c))
            .map(|(i, c)| i + c.len_utf8())
            .or_else(|| {
                window
                    .char_indices()
                    .rev()
                    .find(|(i, c)| *i > 0 && c.is_whitespace())
                    .map(|(i, _)| i)
            })
            .unwrap_or(limit);

        let piece = remaining[..cut].trim();
        if !piece.is_empty() {
            chunks.push(piece.to_string());
        }
        remaining = remaining[cut..].trim_start();
    }

    if !remaining.is_empty() {
        chunks.push(remaining.to_string());
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_text("  Hola  ", MAX_CHUNK_CHARS), vec!["Hola"]);
    }

    #[test]
    fn test_blank_text_has_no_chunks() {
        assert!(split_text("", MAX_CHUNK_CHARS).is_empty());
        assert!(split_text("  \n ", MAX_CHUNK_CHARS).is_empty());
    }

    #[test]
    fn test_splits_after_punctuation() {
        let chunks = split_text("One two. Three four five.", 12);
        assert_eq!(chunks, vec!["One two.", "Three four", "five."]);
    }

    #[test]
    fn test_splits_at_whitespace_without_punctuation() {
        let chunks = split_text("alpha beta gamma delta", 11);
        assert_eq!(chunks, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn test_hard_splits_long_words() {
        let chunks = split_text("abcdefghij", 4);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 60 three-byte characters fit into one 100-character chunk.
        let text = "あ".repeat(60);
        assert_eq!(split_text(&text, MAX_CHUNK_CHARS), vec![text.clone()]);
    }

    #[test]
    fn test_multibyte_hard_split_stays_on_char_boundary() {
        let text = "こんにちは世界";
        let chunks = split_text(text, 3);
        assert_eq!(chunks, vec!["こんに", "ちは世", "界"]);
    }

    #[test]
    fn test_every_chunk_respects_limit() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(10);
        for chunk in split_text(&text, MAX_CHUNK_CHARS) {
            assert!(chunk.chars().count() <= MAX_CHUNK_CHARS, "{chunk}");
        }
    }
}
