//! Personal Content Detector
//!
//! Keywords match on word boundaries so short terms do not fire inside longer
//! words; phrases match anywhere. Both are case-insensitive.

use regex::Regex;

use super::{GuardrailConfig, GuardrailResult};

/// Built-in sensitive keywords.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    // Mental health
    "anxiety",
    "depression",
    "depressed",
    "stressed",
    "overwhelmed",
    "therapy",
    "counseling",
    "counselor",
    "suicidal",
    "suicide",
    "mental health",
    "panic attack",
    "eating disorder",
    // Medical
    "hospitalized",
    "hospitalization",
    "medical leave",
    "illness",
    "disability",
    "accommodation",
    // Financial
    "financial aid",
    "hardship",
    "can't afford",
    "tuition help",
    "financial hardship",
    // Family and personal emergencies
    "family emergency",
    "bereavement",
    "death in family",
    "grief",
    "domestic violence",
    "restraining order",
    "homelessness",
    "homeless",
    "abuse",
    // Discrimination and safety
    "harassment",
    "discrimination",
    "title ix",
    "assault",
    "crisis",
    // Academic distress
    "dropping out",
    "failing",
    "academic probation",
    "suspension",
];

/// Built-in distress phrases.
pub const DEFAULT_PHRASES: &[&str] = &[
    "i don't know what to do",
    "i need help urgently",
    "i'm struggling",
    "i am struggling",
    "i can't cope",
    "i cant cope",
    "please help me",
    "i feel hopeless",
    "i'm in crisis",
    "i am in crisis",
    "i have nowhere to turn",
    "i feel like giving up",
    "i can't take it anymore",
    "i cant take it anymore",
    "i need someone to talk to",
    "i'm not okay",
    "i am not okay",
    "i don't feel safe",
    "i dont feel safe",
];

struct KeywordPattern {
    keyword: String,
    regex: Regex,
}

/// Compiled sensitive-content scanner.
///
/// Immutable after construction and safe to share across threads.
pub struct PersonalContentDetector {
    keywords: Vec<KeywordPattern>,
    phrases: Vec<(String, String)>,
}

impl PersonalContentDetector {
    /// Build a detector from explicit lists.
    ///
    /// An empty list falls back to the corresponding default list.
    pub fn new(keywords: Vec<String>, phrases: Vec<String>) -> Self {
        let keywords = if keywords.is_empty() {
            to_owned(DEFAULT_KEYWORDS)
        } else {
            keywords
        };
        let phrases = if phrases.is_empty() {
            to_owned(DEFAULT_PHRASES)
        } else {
            phrases
        };

        let keywords = keywords
            .into_iter()
            .filter_map(|keyword| {
                let pattern = format!(r"\b{}\b", regex::escape(&fold(&keyword)));
                match Regex::new(&pattern) {
                    Ok(regex) => Some(KeywordPattern { keyword, regex }),
                    Err(e) => {
                        tracing::warn!(keyword = %keyword, error = %e, "Skipping guardrail keyword");
                        None
                    }
                }
            })
            .collect();

        let phrases = phrases
            .into_iter()
            .map(|phrase| {
                let needle = fold(&phrase);
                (phrase, needle)
            })
            .collect();

        Self { keywords, phrases }
    }

    /// Build a detector from optional overrides.
    pub fn from_config(config: &GuardrailConfig) -> Self {
        Self::new(
            config.keywords.clone().unwrap_or_default(),
            config.phrases.clone().unwrap_or_default(),
        )
    }

    /// Configured keywords, in declaration order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|k| k.keyword.as_str())
    }

    /// Configured phrases, in declaration order.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(|(phrase, _)| phrase.as_str())
    }

    /// Scan `text` for sensitive content.
    pub fn check(&self, text: &str) -> GuardrailResult {
        let haystack = fold(text);

        let matched_keywords: Vec<String> = self
            .keywords
            .iter()
            .filter(|k| k.regex.is_match(&haystack))
            .map(|k| k.keyword.clone())
            .collect();

        let matched_phrases: Vec<String> = self
            .phrases
            .iter()
            .filter(|(_, needle)| !needle.is_empty() && haystack.contains(needle.as_str()))
            .map(|(phrase, _)| phrase.clone())
            .collect();

        GuardrailResult {
            is_personal: !matched_keywords.is_empty() || !matched_phrases.is_empty(),
            matched_keywords,
            matched_phrases,
        }
    }
}

impl Default for PersonalContentDetector {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

fn to_owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Lowercase and fold typographic apostrophes to ASCII.
fn fold(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}
