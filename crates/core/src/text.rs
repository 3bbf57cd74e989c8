//! Text Normalization
//!
//! Turns raw student email text into a canonical sequence of terms:
//! diacritics stripped, lowercased, punctuation collapsed, stop words removed.
//! Every function here is pure.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Stop words dropped from every token stream.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "how", "i", "in",
    "is", "it", "my", "of", "on", "or", "so", "that", "the", "to", "we", "what", "when",
    "where", "which", "who", "will", "with", "you", "your",
];

/// Returns true if `term` is in the stop-word set.
pub fn is_stop_word(term: &str) -> bool {
    // STOP_WORDS is sorted
    STOP_WORDS.binary_search(&term).is_ok()
}

/// Return a normalized representation of `text`.
///
/// Diacritics are removed via NFKD decomposition, the text is lowercased, and
/// every run of characters outside `[a-z0-9]` becomes a single space. The
/// result is trimmed.
pub fn normalize_text(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let mut out = String::with_capacity(folded.len());
    let mut pending_space = false;
    for ch in folded.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }
    out
}

/// Tokenize `text` into normalized word tokens with stop words removed.
///
/// Empty or whitespace-only input yields an empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return Vec::new();
    }
    normalized
        .split_whitespace()
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}
