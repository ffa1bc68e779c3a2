use crate::error::{Result, ZidianError};
use crate::models::Entry;
use calamine::{Data, Reader, open_workbook_auto};
use log::{debug, info, warn};
use std::path::Path;

/// Accepted header spellings for each required column, matched case-insensitively.
const CHARACTERS_HEADERS: &[&str] = &["Characters / Traditional", "Characters"];
const PINYIN_HEADERS: &[&str] = &["Pinyin"];
const MEANING_HEADERS: &[&str] = &["Meaning"];
const DIMENSION_HEADERS: &[&str] = &["Dimension"];

/// Positions of the required columns within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    characters: usize,
    pinyin: usize,
    meaning: usize,
    dimension: usize,
}

impl Columns {
    fn resolve(header: &[String]) -> Result<Self> {
        let find = |name: &'static str, aliases: &[&str]| {
            header
                .iter()
                .position(|h| aliases.iter().any(|a| h.trim().eq_ignore_ascii_case(a)))
                .ok_or(ZidianError::MissingColumn(name))
        };
        Ok(Columns {
            characters: find("characters", CHARACTERS_HEADERS)?,
            pinyin: find("pinyin", PINYIN_HEADERS)?,
            meaning: find("meaning", MEANING_HEADERS)?,
            dimension: find("dimension", DIMENSION_HEADERS)?,
        })
    }
}

/// Returns the trimmed cell at `idx`, or `None` if it is missing or blank.
fn cell(row: &[Option<String>], idx: usize) -> Option<&str> {
    row.get(idx)
        .and_then(|c| c.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
}

/// Builds entries from a header and its data rows.
/// Rows lacking characters, pinyin or meaning are dropped; a blank dimension is kept as "".
pub fn entries_from_rows<I>(header: &[String], rows: I) -> Result<Vec<Entry>>
where
    I: IntoIterator<Item = Vec<Option<String>>>,
{
    let cols = Columns::resolve(header)?;
    let mut entries = Vec::new();
    let mut dropped = 0usize;

    for row in rows {
        match (
            cell(&row, cols.characters),
            cell(&row, cols.pinyin),
            cell(&row, cols.meaning),
        ) {
            (Some(characters), Some(pinyin), Some(meaning)) => {
                let dimension = cell(&row, cols.dimension).unwrap_or_default();
                entries.push(Entry::new(characters, pinyin, meaning, dimension));
            }
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!("Dropped {} incomplete rows", dropped);
    }
    Ok(entries)
}

fn data_to_cell(data: &Data) -> Option<String> {
    match data {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Reads `sheet` from a spreadsheet workbook.
fn read_workbook(path: &Path, sheet: &str) -> Result<Vec<Entry>> {
    let mut workbook = open_workbook_auto(path)?;
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(ZidianError::SheetNotFound(sheet.to_string()));
    }
    let range = workbook.worksheet_range(sheet)?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(data_to_cell).collect::<Vec<_>>());
    let header: Vec<String> = rows
        .next()
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect();

    entries_from_rows(&header, rows)
}

/// Reads a CSV export of the word list. The first record is the header.
fn read_csv(path: &Path) -> Result<Vec<Entry>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;
    let header: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        match record {
            Ok(record) => rows.push(record.iter().map(|c| Some(c.to_string())).collect()),
            // A single unreadable record is treated like an incomplete row.
            Err(e) => warn!("Skipping unreadable CSV record {}: {}", line + 1, e),
        }
    }

    entries_from_rows(&header, rows)
}

/// Loads all complete entries from a word list file, picking the reader by extension.
pub fn load_entries(path: &Path, sheet: &str) -> Result<Vec<Entry>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let entries = match extension.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path, sheet)?,
        _ => return Err(ZidianError::UnsupportedFormat(path.display().to_string())),
    };
    info!("Loaded {} entries from {:?}", entries.len(), path);
    Ok(entries)
}
