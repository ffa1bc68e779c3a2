// Declare modules
pub mod data;
pub mod error;
pub mod filter;
pub mod highlight;
pub mod models;
pub mod parse;
pub mod similarity;
pub mod tables;

// Re-export key types for easier use
pub use error::{Result, ZidianError};
pub use filter::{Criteria, GrammarSelection, SearchQuery, filter};
pub use highlight::{TagSegment, extract_tag_segment, highlight, highlight_target};
pub use models::Entry;

use log::{debug, info};
use once_cell::sync::OnceCell;
use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

/// Options for loading the word list.
#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    /// Optional path to a specific word list (.xlsx or .csv).
    /// If None, the default file is looked up (see [`data::locate_word_list`]).
    pub data_path: Option<PathBuf>,
    /// Sheet to read from a workbook. Defaults to [`data::WORD_LIST_SHEET`].
    pub sheet_name: Option<String>,
}

/// The loaded word list. Immutable once built.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: Vec<Entry>,
    // Every marker occurring in at least one entry.
    present_tags: HashSet<String>,
}

impl Vocabulary {
    /// Builds a vocabulary from already-loaded entries.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let present_tags = entries
            .iter()
            .flat_map(|e| e.tags.iter().cloned())
            .collect();
        Vocabulary {
            entries,
            present_tags,
        }
    }

    /// Loads the word list using default options.
    pub fn load() -> Result<Self> {
        Self::load_with_options(&LoadOptions::default())
    }

    /// Loads the word list with specific options.
    pub fn load_with_options(options: &LoadOptions) -> Result<Self> {
        let path = data::locate_word_list(options.data_path.as_deref())?;
        let sheet = options
            .sheet_name
            .as_deref()
            .unwrap_or(data::WORD_LIST_SHEET);
        let entries = parse::load_entries(&path, sheet)?;
        let vocab = Self::from_entries(entries);
        info!(
            "Vocabulary ready: {} entries, {} distinct tags",
            vocab.len(),
            vocab.present_tags.len()
        );
        Ok(vocab)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // --- Selection Options ---

    /// Grammar group names, in display order.
    pub fn groups(&self) -> impl Iterator<Item = &'static str> {
        tables::GRAMMAR_GROUPS.iter().map(|g| g.name)
    }

    /// Whether any entry carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.present_tags.contains(tag)
    }

    /// Sorted labels of the tags that occur in the word list.
    pub fn tag_labels(&self) -> Vec<&'static str> {
        tables::tag_descriptions()
            .filter(|(marker, _)| self.has_tag(marker))
            .map(|(_, label)| label)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Marker selected by a tag label, considering only tags that occur in the word list.
    pub fn tag_for_label(&self, label: &str) -> Option<&'static str> {
        tables::tag_for_label(label, |marker| self.has_tag(marker))
    }

    /// Sorted categories present in the word list.
    pub fn categories(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted dimensions present within `category`, or in the whole list for `None`.
    pub fn dimensions(&self, category: Option<&str>) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| category.is_none_or(|c| e.category == c))
            .map(|e| e.dimension.as_str())
            .filter(|d| !d.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Entries matching `criteria`, in word list order.
    pub fn filter(&self, criteria: &Criteria) -> Vec<&Entry> {
        filter::filter(self, criteria)
    }
}

/// Loads the vocabulary on first use and hands out the same instance afterwards.
///
/// A failed load is not remembered; the next call tries again.
#[derive(Debug, Default)]
pub struct VocabularyCache {
    options: LoadOptions,
    cell: OnceCell<Vocabulary>,
}

impl VocabularyCache {
    pub fn new(options: LoadOptions) -> Self {
        VocabularyCache {
            options,
            cell: OnceCell::new(),
        }
    }

    /// Returns the vocabulary, loading it if this is the first call.
    pub fn get(&self) -> Result<&Vocabulary> {
        self.cell.get_or_try_init(|| {
            debug!("Vocabulary not loaded yet, loading with {:?}", self.options);
            Vocabulary::load_with_options(&self.options)
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const WORDS_CSV: &str = "Characters,Pinyin,Meaning,Dimension\n\
        你好,nǐ hǎo,V. to greet someone,Greetings\n\
        和,hé,CONJ. and CONS. then,Dating\n\
        汽车,qìchē,N. car,Transport\n\
        飞机,fēijī,N. airplane,Catching a Flight\n";

    fn greeting_only() -> Vocabulary {
        Vocabulary::from_entries(vec![Entry::new(
            "你好",
            "nǐ hǎo",
            "V. to greet someone",
            "Greetings",
        )])
    }

    #[test]
    fn test_greeting_scenario() {
        let vocab = greeting_only();
        let entry = &vocab.entries()[0];
        assert_eq!(entry.category, "Social Interactions");
        assert_eq!(entry.tags, vec!["V."]);

        let verbs = Criteria {
            group: Some("Verbs".into()),
            ..Default::default()
        };
        assert_eq!(vocab.filter(&verbs), vec![entry]);

        let travel = Criteria {
            category: Some("Travel".into()),
            ..Default::default()
        };
        assert!(vocab.filter(&travel).is_empty());

        let search = Criteria {
            search: Some("hao".into()),
            ..Default::default()
        };
        assert_eq!(vocab.filter(&search), vec![entry]);

        let selection = verbs.grammar(&vocab);
        assert_eq!(
            highlight(entry, &selection).map(|s| s.text()),
            Some("V. to greet someone")
        );
    }

    #[test]
    fn test_selection_options() {
        let vocab = Vocabulary::from_entries(vec![
            Entry::new("和", "hé", "CONJ. and CONS. then", "Dating"),
            Entry::new("汽车", "qìchē", "N. car", "Transport"),
            Entry::new("飞机", "fēijī", "N. airplane", "Catching a Flight"),
            Entry::new("星星", "xīngxing", "N. star", ""),
        ]);

        assert_eq!(vocab.groups().next(), Some("Verbs"));
        assert_eq!(vocab.groups().count(), 8);
        assert_eq!(vocab.tag_labels(), vec!["Conjunction", "Noun"]);
        assert_eq!(vocab.tag_for_label("Conjunction"), Some("CONJ."));
        assert_eq!(vocab.tag_for_label("Verb"), None);
        assert_eq!(
            vocab.categories(),
            vec!["Other", "Social Interactions", "Travel"]
        );
        assert_eq!(
            vocab.dimensions(Some("Travel")),
            vec!["Catching a Flight", "Transport"]
        );
        assert_eq!(
            vocab.dimensions(None),
            vec!["Catching a Flight", "Dating", "Transport"]
        );
        assert!(vocab.dimensions(Some("Health")).is_empty());
    }

    #[test]
    fn test_load_with_options_reads_csv() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("words.csv");
        fs::write(&path, WORDS_CSV).unwrap();

        let options = LoadOptions {
            data_path: Some(path),
            sheet_name: None,
        };
        let result = Vocabulary::load_with_options(&options);
        assert!(result.is_ok(), "Loading failed: {:?}", result.err());
        let vocab = result.unwrap();
        assert_eq!(vocab.len(), 4);
        assert!(vocab.has_tag("CONS."));
        assert!(!vocab.has_tag("V.O."));
    }

    #[test]
    fn test_cache_loads_once() {
        let _ = env_logger::builder().is_test(true).try_init();
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("words.csv");
        fs::write(&path, WORDS_CSV).unwrap();

        let cache = VocabularyCache::new(LoadOptions {
            data_path: Some(path.clone()),
            sheet_name: None,
        });
        assert!(!cache.is_loaded());
        let first = cache.get().expect("first load");
        assert!(cache.is_loaded());

        // The file is never read again once loaded.
        fs::remove_file(&path).unwrap();
        let second = cache.get().expect("cached load");
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.len(), 4);
    }

    #[test]
    fn test_cache_retries_after_failed_load() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("later.csv");
        let cache = VocabularyCache::new(LoadOptions {
            data_path: Some(path.clone()),
            sheet_name: None,
        });

        assert!(matches!(cache.get(), Err(ZidianError::DataFileNotFound(_))));
        assert!(!cache.is_loaded());

        fs::write(&path, WORDS_CSV).unwrap();
        assert_eq!(cache.get().map(Vocabulary::len).ok(), Some(4));
    }

    #[test]
    fn test_missing_required_column_fails_load() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("words.csv");
        fs::write(&path, "Characters,Pinyin,Meaning\n你好,nǐ hǎo,V. hi\n").unwrap();

        let options = LoadOptions {
            data_path: Some(path),
            sheet_name: None,
        };
        assert!(matches!(
            Vocabulary::load_with_options(&options),
            Err(ZidianError::MissingColumn("dimension"))
        ));
    }
}
