//! Error types for traffic capture ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort ingestion. Row-level problems never surface here.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Input Selection ===
    /// No input paths were given.
    #[error("no input files given")]
    NoInputs,

    /// Directory given as input contains no CSV files.
    #[error("no CSV files found in directory {path}")]
    EmptyDirectory { path: PathBuf },

    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File starts with a byte-order mark for an encoding we do not read.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Schema Errors ===
    /// Required field not found in the header row.
    #[error(
        "required field '{field}' not found in {path} (available fields: {})",
        .available.join(", ")
    )]
    MissingField {
        field: String,
        path: PathBuf,
        available: Vec<String>,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
