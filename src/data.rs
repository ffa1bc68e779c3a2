//! Locating the word list on disk.
//!
//! The word list is a static workbook shipped alongside the application. It is
//! looked up in the current directory first and then in the user's data
//! directory; nothing is ever downloaded or written.

use crate::error::{Result, ZidianError};
use directories_next::ProjectDirs;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Subdirectory name within user's data directory
pub const ZIDIAN_SUBDIR: &str = "zidian-rs";
/// File name of the bundled word list.
pub const WORD_LIST_FILENAME: &str = "HelloChinese Word List_edited_2025.xlsx";
/// Sheet holding the word list inside the workbook.
pub const WORD_LIST_SHEET: &str = "HelloChinese";

/// Gets the project's data directory path.
pub fn get_data_dir() -> Result<PathBuf> {
    let proj_dirs =
        ProjectDirs::from("org", "ZidianRs", ZIDIAN_SUBDIR).ok_or(ZidianError::DataDirNotFound)?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

/// Returns the first existing path among `candidates`.
fn first_existing(candidates: &[PathBuf]) -> Option<&Path> {
    candidates
        .iter()
        .inspect(|p| debug!("Looking for word list at {:?}", p))
        .find(|p| p.is_file())
        .map(PathBuf::as_path)
}

/// Resolves the word list path.
///
/// An explicit path must exist. Without one, the default file name is looked
/// up in the working directory and then in the data directory.
pub fn locate_word_list(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            info!("Using word list at {:?}", path);
            return Ok(path.to_path_buf());
        }
        return Err(ZidianError::DataFileNotFound(path.display().to_string()));
    }

    let mut candidates = vec![PathBuf::from(WORD_LIST_FILENAME)];
    // A missing data directory only removes a candidate.
    if let Ok(dir) = get_data_dir() {
        candidates.push(dir.join(WORD_LIST_FILENAME));
    }

    match first_existing(&candidates) {
        Some(path) => {
            info!("Found word list: {:?}", path);
            Ok(path.to_path_buf())
        }
        None => Err(ZidianError::DataFileNotFound(WORD_LIST_FILENAME.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_path_is_used_when_present() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("words.csv");
        fs::write(&path, "Characters,Pinyin,Meaning,Dimension\n").unwrap();

        let located = locate_word_list(Some(&path));
        assert!(located.is_ok(), "Lookup failed: {:?}", located.err());
        assert_eq!(located.unwrap(), path);
    }

    #[test]
    fn test_missing_explicit_path_is_fatal() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing.xlsx");

        match locate_word_list(Some(&path)) {
            Err(ZidianError::DataFileNotFound(p)) => assert!(p.ends_with("missing.xlsx")),
            other => panic!("Expected DataFileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_first_existing_skips_missing_candidates() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let present = temp_dir.path().join("b.xlsx");
        fs::write(&present, b"").unwrap();
        let candidates = vec![temp_dir.path().join("a.xlsx"), present.clone()];

        assert_eq!(first_existing(&candidates), Some(present.as_path()));
        assert_eq!(first_existing(&candidates[..1]), None);
    }
}
