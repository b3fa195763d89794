//! Error types for income table ingestion.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Why a load produced no table.
///
/// `NotFound`, `EmptyFile`, `FileTooLarge` and `Io` do not depend on the text
/// encoding and stop the load before any candidate is tried.
/// `UnreadableEncoding` is only returned after every candidate failed.
#[derive(Debug, Error)]
pub enum LoadFailure {
    // === File System Errors ===
    /// The path does not resolve to an existing file.
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read the file for a reason other than absence.
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is too large ({size} bytes, limit {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File is empty or has no header row.
    #[error("file is empty: {path}")]
    EmptyFile { path: PathBuf },

    // === Decoding Errors ===
    /// The file exists but no candidate encoding produced a table.
    #[error("could not read {path} with any of the encodings {}", AttemptList(.attempts))]
    UnreadableEncoding {
        path: PathBuf,
        attempts: Vec<FailedAttempt>,
    },
}

impl LoadFailure {
    /// Returns true when the failure means the path itself is wrong.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Encoding labels that were tried before giving up, in order.
    pub fn attempted_encodings(&self) -> Vec<&'static str> {
        match self {
            Self::UnreadableEncoding { attempts, .. } => {
                attempts.iter().map(|attempt| attempt.encoding).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// One discarded candidate and the reason it was discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    pub encoding: &'static str,
    pub error: AttemptError,
}

/// Reasons a single encoding attempt is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// Bytes are not valid in the candidate encoding.
    #[error("bytes are not valid {encoding}")]
    Decode { encoding: &'static str },

    /// The decoded text is not well-formed delimited data.
    #[error("malformed delimited text at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// A data row has more fields than the header.
    #[error("row {row} has {found} fields, header has {expected}")]
    RowTooLong {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// The decoded text has no header row.
    #[error("no header row")]
    NoHeader,
}

struct AttemptList<'a>(&'a [FailedAttempt]);

impl fmt::Display for AttemptList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, attempt) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(attempt.encoding)?;
        }
        f.write_str("]")
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, LoadFailure>;
