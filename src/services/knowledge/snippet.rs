//! Snippet Extraction
//!
//! Picks a short, citable excerpt from reference content.

use std::collections::HashSet;
use std::sync::OnceLock;

use email_advising_core::tokenize;
use regex::Regex;

fn sentence_end() -> Option<&'static Regex> {
    static SENTENCE_END: OnceLock<Option<Regex>> = OnceLock::new();
    SENTENCE_END
        .get_or_init(|| Regex::new(r"[.!?]\s+").ok())
        .as_ref()
}

/// Split `content` into trimmed, non-empty sentences.
///
/// A sentence ends after `.`, `!` or `?` when followed by whitespace.
pub fn split_sentences(content: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    if let Some(re) = sentence_end() {
        for end in re.find_iter(content) {
            // Keep the punctuation, drop the whitespace
            sentences.push(content[start..end.start() + 1].trim());
            start = end.end();
        }
    }
    sentences.push(content[start..].trim());
    sentences.retain(|sentence| !sentence.is_empty());
    sentences
}

/// Build a snippet of at most `max_chars` characters (plus `...` when cut).
///
/// The first sentence sharing a token with `query_tokens` wins. Otherwise the
/// leading content is used, cut at a word boundary.
pub fn build_snippet(content: &str, query_tokens: &HashSet<String>, max_chars: usize) -> String {
    for sentence in split_sentences(content) {
        if tokenize(sentence)
            .iter()
            .any(|token| query_tokens.contains(token))
        {
            return truncate_chars(sentence, max_chars).trim().to_string();
        }
    }

    let trimmed = content.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let head = truncate_chars(trimmed, max_chars);
    let head = match head.rfind(' ') {
        Some(pos) => &head[..pos],
        None => head,
    };
    format!("{}...", head)
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
