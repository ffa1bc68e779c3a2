use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tables;

/// Grammatical tag marker: 1-4 uppercase letters and a period, starting on a word boundary.
/// Shared by tag extraction and the highlighter so both agree on what a marker is.
pub(crate) static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{1,4}\.").expect("tag pattern is valid"));

// --- Vocabulary Entry ---

/// One row of the word list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub characters: String,
    pub pinyin: String,
    /// English gloss, possibly carrying tag markers such as `V.` or `N.`.
    pub meaning: String,
    /// Markers found in `meaning`, in order of appearance (duplicates kept).
    pub tags: Vec<String>,
    /// Subtopic label, e.g. "Greetings".
    pub dimension: String,
    /// Topic category derived from `dimension`.
    pub category: String,
}

impl Entry {
    /// Builds an entry, deriving `tags` from the meaning and `category` from the dimension.
    pub fn new(
        characters: impl Into<String>,
        pinyin: impl Into<String>,
        meaning: impl Into<String>,
        dimension: impl Into<String>,
    ) -> Self {
        let meaning = meaning.into();
        let dimension = dimension.into();
        Entry {
            characters: characters.into(),
            pinyin: pinyin.into(),
            tags: extract_tags(&meaning),
            category: tables::category_for(&dimension).to_string(),
            meaning,
            dimension,
        }
    }

    /// Whether the entry's tags contain `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Extracts all tag markers from a gloss, left to right.
pub fn extract_tags(meaning: &str) -> Vec<String> {
    TAG_PATTERN
        .find_iter(meaning)
        .map(|m| m.as_str().to_string())
        .collect()
}
