//! Error types for feed file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or reading feed files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open a data file.
    #[error("failed to open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // === Record Errors ===
    /// A record could not be decoded.
    #[error("failed to read record in {path}{}: {message}", line_suffix(.line))]
    Record {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },
}

impl IngestError {
    /// Line number of the failing record, if known.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::Record { line, .. } => *line,
            _ => None,
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|line| format!(" at line {line}"))
        .unwrap_or_default()
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
