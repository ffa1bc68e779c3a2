use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, ZidianError>;

/// Enum representing all possible errors in the zidian_rs library.
#[derive(Error, Debug)]
pub enum ZidianError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Data directory not found or could not be determined")]
    DataDirNotFound,

    #[error("Required data file not found: {0}")]
    DataFileNotFound(String),

    #[error("Sheet not found in workbook: {0}")]
    SheetNotFound(String),

    #[error("Required column missing from word list: {0}")]
    MissingColumn(&'static str), // Canonical column name, e.g. "meaning"

    #[error("Unsupported word list format: {0}")]
    UnsupportedFormat(String),
}
