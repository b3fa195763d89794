//! File reading and delimited-text parsing.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{AttemptError, LoadFailure, Result};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Header and rows of a parsed file, before header normalization and type
/// inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// Data rows; a row may be shorter than `headers` but never longer.
    pub rows: Vec<Vec<String>>,
}

/// Reads the whole file after checking it against `max_size`.
pub fn read_source(path: &Path, max_size: u64) -> Result<Vec<u8>> {
    let metadata = fs::metadata(path).map_err(|e| io_failure(path, e))?;

    if metadata.len() > max_size {
        return Err(LoadFailure::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    fs::read(path).map_err(|e| io_failure(path, e))
}

fn io_failure(path: &Path, error: std::io::Error) -> LoadFailure {
    if error.kind() == std::io::ErrorKind::NotFound {
        LoadFailure::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        LoadFailure::Io {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Parses decoded text with a header row.
///
/// Quoted fields may contain the delimiter. Blank lines are skipped. Rows
/// shorter than the header are kept as-is; a row longer than the header
/// fails the whole parse.
pub fn parse_delimited(text: &str, delimiter: u8) -> std::result::Result<RawTable, AttemptError> {
    if let Some(line) = unterminated_quote(text, delimiter) {
        return Err(AttemptError::Parse {
            line,
            message: "quoted field is never closed".to_string(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(parse_error)?.clone();
    if headers.is_empty() {
        return Err(AttemptError::NoHeader);
    }
    let expected = headers.len();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(parse_error)?;
        if record.len() > expected {
            return Err(AttemptError::RowTooLong {
                row: index + 1,
                found: record.len(),
                expected,
            });
        }
        rows.push(record_to_vec(&record));
    }

    Ok(RawTable {
        headers: record_to_vec(&headers),
        rows,
    })
}

/// Line on which a quoted field opens without a closing quote.
///
/// The csv reader ends such a field silently at end of input, taking every
/// following line with it. Quotes follow the reader's defaults: `"` opens a
/// quoted field only at the start of a field and `""` inside one is an
/// escaped quote.
fn unterminated_quote(text: &str, delimiter: u8) -> Option<u64> {
    let mut line = 1u64;
    let mut open_since: Option<u64> = None;
    let mut at_field_start = true;
    let mut bytes = text.bytes().peekable();
    while let Some(byte) = bytes.next() {
        if open_since.is_some() {
            if byte == b'"' {
                if bytes.peek() == Some(&b'"') {
                    bytes.next();
                } else {
                    open_since = None;
                }
            }
        } else if byte == b'"' && at_field_start {
            open_since = Some(line);
            at_field_start = false;
        } else {
            at_field_start = byte == delimiter || byte == b'\n' || byte == b'\r';
        }
        if byte == b'\n' {
            line += 1;
        }
    }
    open_since
}

fn record_to_vec(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

fn parse_error(error: csv::Error) -> AttemptError {
    AttemptError::Parse {
        line: error.position().map_or(0, csv::Position::line),
        message: error.to_string(),
    }
}
