//! Metadata
//!
//! Placeholder rendering for subjects and bodies, and extraction of contextual
//! fields (term, student id, email) from the raw query text.

use std::collections::BTreeMap;

use regex::{Captures, Regex};

/// Render `{key}` and `{key|default}` placeholders from `values`.
///
/// A placeholder with no value and no default is left verbatim.
pub fn render_template(template: &str, values: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find(['{', '}']).filter(|&i| after.as_bytes()[i] == b'}') else {
            out.push('{');
            rest = after;
            continue;
        };

        let inner = &after[..close];
        let (name, default) = match inner.split_once('|') {
            Some((name, default)) => (name.trim(), Some(default)),
            None => (inner.trim(), None),
        };

        match (values.get(name), default) {
            (Some(value), _) if !name.is_empty() => out.push_str(value),
            (_, Some(default)) if !name.is_empty() => out.push_str(default),
            _ => {
                out.push('{');
                out.push_str(inner);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Term,
    StudentId,
    StudentEmail,
}

impl Field {
    const ALL: [Field; 3] = [Field::Term, Field::StudentId, Field::StudentEmail];

    fn key(self) -> &'static str {
        match self {
            Field::Term => "term",
            Field::StudentId => "student_id",
            Field::StudentEmail => "student_email",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Field::Term => r"(?i)\b(fall|spring|summer|winter)\s+(20\d{2})\b",
            Field::StudentId => r"\b([A-Za-z]?\d{7,9})\b",
            Field::StudentEmail => r"\b([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})\b",
        }
    }

    fn render(self, caps: &Captures<'_>) -> String {
        match self {
            Field::Term => {
                let season = caps[1].to_lowercase();
                let mut chars = season.chars();
                let season = match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => season,
                };
                format!("{} {}", season, &caps[2])
            }
            Field::StudentId => caps[1].to_uppercase(),
            Field::StudentEmail => caps[1].to_string(),
        }
    }
}

/// Pulls contextual fields out of free text.
pub struct MetadataExtractor {
    patterns: Vec<(Field, Regex)>,
}

impl MetadataExtractor {
    pub fn new() -> Self {
        let patterns = Field::ALL
            .into_iter()
            .filter_map(|field| match Regex::new(field.pattern()) {
                Ok(regex) => Some((field, regex)),
                Err(e) => {
                    tracing::warn!(field = field.key(), error = %e, "Skipping metadata pattern");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    /// Every field found in `text`, first occurrence wins.
    pub fn extract(&self, text: &str) -> BTreeMap<String, String> {
        self.patterns
            .iter()
            .filter_map(|(field, regex)| {
                regex
                    .captures(text)
                    .map(|caps| (field.key().to_string(), field.render(&caps)))
            })
            .collect()
    }

    /// Add extracted fields that `metadata` does not already carry.
    pub fn fill_missing(&self, text: &str, metadata: &mut BTreeMap<String, String>) {
        for (key, value) in self.extract(text) {
            metadata.entry(key).or_insert(value);
        }
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}
