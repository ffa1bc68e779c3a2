//! Filtering the vocabulary by grammar, topic and free-text search.
//!
//! Callers own a [`Criteria`] value and pass it on every call; nothing here
//! keeps state between calls. Each criterion left at `None` is skipped, and a
//! selection that names something unknown is treated the same way (with a
//! warning), so the filter never fails.

use crate::Vocabulary;
use crate::models::Entry;
use crate::similarity;
use crate::tables::{self, GrammarGroup};
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fuzzy search accepts a field whose similarity to the query is above this.
pub const FUZZY_THRESHOLD: f64 = 0.70;

/// User-selected filters. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    /// Grammar group name, e.g. "Verbs". Takes precedence over `tag`.
    pub group: Option<String>,
    /// Single tag, given as a marker ("V.") or its label ("Verb").
    pub tag: Option<String>,
    pub category: Option<String>,
    /// Subtopic; only meaningful within the selected category.
    pub dimension: Option<String>,
    pub search: Option<String>,
    /// Match the search text as a whole word instead of fuzzily.
    pub whole_word: bool,
}

/// The grammar criterion after resolving names against the static tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GrammarSelection {
    #[default]
    All,
    Group(&'static GrammarGroup),
    Tag(&'static str),
}

impl GrammarSelection {
    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            GrammarSelection::All => true,
            GrammarSelection::Group(group) => group.matches(&entry.tags),
            GrammarSelection::Tag(tag) => entry.has_tag(tag),
        }
    }
}

impl Criteria {
    /// Resolves the grammar selection. A group wins over a tag; unknown names fall back to All.
    pub fn grammar(&self, vocab: &Vocabulary) -> GrammarSelection {
        if let Some(name) = self.group.as_deref() {
            match tables::group(name) {
                Some(group) => return GrammarSelection::Group(group),
                None => warn!("Unknown grammar group '{}', ignoring", name),
            }
        }
        if let Some(tag) = self.tag.as_deref() {
            let marker = tables::tag_descriptions()
                .find(|(marker, _)| *marker == tag)
                .map(|(marker, _)| marker)
                .or_else(|| vocab.tag_for_label(tag));
            match marker {
                Some(marker) => return GrammarSelection::Tag(marker),
                None => warn!("Unknown grammatical tag '{}', ignoring", tag),
            }
        }
        GrammarSelection::All
    }

    fn category(&self) -> Option<&str> {
        let category = self.category.as_deref()?;
        if tables::is_known_category(category) {
            Some(category)
        } else {
            warn!("Unknown category '{}', ignoring", category);
            None
        }
    }

    fn dimension(&self, vocab: &Vocabulary, category: Option<&str>) -> Option<&str> {
        let dimension = self.dimension.as_deref()?;
        if vocab.dimensions(category).contains(&dimension) {
            Some(dimension)
        } else {
            warn!(
                "Dimension '{}' is not available in category {:?}, ignoring",
                dimension, category
            );
            None
        }
    }

    /// Whether any criterion other than search is set.
    pub fn has_selection(&self) -> bool {
        self.group.is_some() || self.tag.is_some() || self.category.is_some() || self.dimension.is_some()
    }
}

/// Lowercases and strips combining marks, so "Nǐ HǍO" compares equal to "ni hao".
pub fn fold_for_search(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// A prepared free-text query.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    folded: String,
    // Present in whole-word mode.
    word: Option<Regex>,
}

impl SearchQuery {
    /// Prepares `text` for matching. Blank text yields `None`, meaning no search.
    pub fn new(text: &str, whole_word: bool) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let folded = fold_for_search(text);
        let word = if whole_word {
            let pattern = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(&folded));
            match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("Cannot build whole-word search for '{}': {}", text, e);
                    return None;
                }
            }
        } else {
            None
        };
        Some(SearchQuery { folded, word })
    }

    /// Tests one field.
    pub fn matches_field(&self, field: &str) -> bool {
        let field = fold_for_search(field);
        match &self.word {
            Some(re) => re.is_match(&field),
            None => {
                field.contains(&self.folded)
                    || similarity::ratio(&self.folded, &field) > FUZZY_THRESHOLD
            }
        }
    }

    /// An entry matches if its characters, pinyin or meaning does.
    pub fn matches(&self, entry: &Entry) -> bool {
        [&entry.characters, &entry.pinyin, &entry.meaning]
            .into_iter()
            .any(|field| self.matches_field(field))
    }
}

/// Returns the entries satisfying every active criterion, in dataset order.
pub fn filter<'v>(vocab: &'v Vocabulary, criteria: &Criteria) -> Vec<&'v Entry> {
    let grammar = criteria.grammar(vocab);
    let category = criteria.category();
    let dimension = criteria.dimension(vocab, category);
    let search = criteria
        .search
        .as_deref()
        .and_then(|text| SearchQuery::new(text, criteria.whole_word));

    let matched: Vec<&Entry> = vocab
        .entries()
        .iter()
        .filter(|e| grammar.matches(e))
        .filter(|e| category.is_none_or(|c| e.category == c))
        .filter(|e| dimension.is_none_or(|d| e.dimension == d))
        .filter(|e| search.as_ref().is_none_or(|q| q.matches(e)))
        .collect();

    debug!(
        "Filter {:?} matched {} of {} entries",
        criteria,
        matched.len(),
        vocab.len()
    );
    matched
}
