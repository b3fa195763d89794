//! Multi-encoding table loading.
//!
//! A load walks the candidate encodings in order. Each attempt reopens and
//! rereads the file, decodes it strictly, parses it and builds the table; the
//! first attempt that gets through all three steps wins. Failures that do not
//! depend on the encoding (missing file, unreadable file, empty file) end the
//! load immediately.

use std::path::{Path, PathBuf};

use tracing::{debug, info, info_span, warn};

use crate::csv::{MAX_CSV_FILE_SIZE, parse_delimited, read_source};
use crate::encoding::{DEFAULT_CANDIDATES, EncodingCandidate};
use crate::error::{AttemptError, FailedAttempt, LoadFailure};
use crate::table::Table;

/// Outcome of a load. The loader never panics or returns early through an
/// error path; every failure is a `Failure` value.
#[derive(Debug)]
pub enum LoadResult {
    Success {
        table: Table,
        encoding_used: EncodingCandidate,
    },
    Failure {
        reason: LoadFailure,
    },
}

/// A successfully loaded table and the encoding that decoded it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    pub table: Table,
    pub encoding_used: EncodingCandidate,
}

impl LoadResult {
    pub fn encoding_used(&self) -> Option<EncodingCandidate> {
        match self {
            Self::Success { encoding_used, .. } => Some(*encoding_used),
            Self::Failure { .. } => None,
        }
    }

    pub fn table(&self) -> Option<&Table> {
        match self {
            Self::Success { table, .. } => Some(table),
            Self::Failure { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason } => Some(reason),
        }
    }

    /// Converts into a `Result` for `?`-style callers.
    pub fn into_result(self) -> Result<LoadedTable, LoadFailure> {
        match self {
            Self::Success {
                table,
                encoding_used,
            } => Ok(LoadedTable {
                table,
                encoding_used,
            }),
            Self::Failure { reason } => Err(reason),
        }
    }
}

impl From<LoadFailure> for LoadResult {
    fn from(reason: LoadFailure) -> Self {
        Self::Failure { reason }
    }
}

/// Loads comma-delimited tables whose text encoding is not known up front.
#[derive(Debug, Clone)]
pub struct TabularDataLoader {
    candidates: Vec<EncodingCandidate>,
    delimiter: u8,
    max_file_size: u64,
}

impl Default for TabularDataLoader {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATES.to_vec(),
            delimiter: b',',
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }
}

impl TabularDataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the candidate list. Order is priority order; duplicates are
    /// dropped so each encoding is tried at most once.
    #[must_use]
    pub fn with_candidates(
        mut self,
        candidates: impl IntoIterator<Item = EncodingCandidate>,
    ) -> Self {
        let mut unique: Vec<EncodingCandidate> = Vec::new();
        for candidate in candidates {
            if !unique.contains(&candidate) {
                unique.push(candidate);
            }
        }
        self.candidates = unique;
        self
    }

    /// Set custom delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the file size limit in bytes.
    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn candidates(&self) -> &[EncodingCandidate] {
        &self.candidates
    }

    /// Loads the table at `path`, trying each candidate encoding in order.
    pub fn load(&self, path: impl AsRef<Path>) -> LoadResult {
        let path = path.as_ref();
        let span = info_span!("load", path = %path.display());
        let _guard = span.enter();

        if self.candidates.is_empty()
            && let Err(reason) = read_source(path, self.max_file_size)
        {
            return reason.into();
        }

        let mut attempts = Vec::with_capacity(self.candidates.len());
        for &candidate in &self.candidates {
            let bytes = match read_source(path, self.max_file_size) {
                Ok(bytes) => bytes,
                Err(reason) => {
                    warn!(error = %reason, "stopping load");
                    return reason.into();
                }
            };
            if bytes.is_empty() {
                return empty_file(path);
            }

            debug!(encoding = %candidate, bytes = bytes.len(), "trying encoding");
            match attempt(&bytes, candidate, self.delimiter) {
                Ok(table) => {
                    info!(
                        encoding = %candidate,
                        rows = table.row_count(),
                        columns = table.column_count(),
                        "loaded table"
                    );
                    return LoadResult::Success {
                        table,
                        encoding_used: candidate,
                    };
                }
                // Decoded fine but nothing to parse; no other encoding changes that.
                Err(AttemptError::NoHeader) => return empty_file(path),
                Err(error) => {
                    warn!(encoding = %candidate, %error, "discarding attempt");
                    attempts.push(FailedAttempt {
                        encoding: candidate.label(),
                        error,
                    });
                }
            }
        }

        LoadFailure::UnreadableEncoding {
            path: path.to_path_buf(),
            attempts,
        }
        .into()
    }
}

/// Loads `path` with the default candidates and settings.
pub fn load(path: impl AsRef<Path>) -> LoadResult {
    TabularDataLoader::default().load(path)
}

fn attempt(
    bytes: &[u8],
    candidate: EncodingCandidate,
    delimiter: u8,
) -> Result<Table, AttemptError> {
    let text = candidate.decode(bytes).ok_or(AttemptError::Decode {
        encoding: candidate.label(),
    })?;
    let raw = parse_delimited(&text, delimiter)?;
    Ok(Table::from_raw(raw))
}

fn empty_file(path: &Path) -> LoadResult {
    let path: PathBuf = path.to_path_buf();
    warn!(path = %path.display(), "file has no header row");
    LoadFailure::EmptyFile { path }.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_with_candidates_dedupes() {
        let loader = TabularDataLoader::new().with_candidates([
            EncodingCandidate::Utf8,
            EncodingCandidate::Cp949,
            EncodingCandidate::Utf8,
        ]);
        assert_eq!(
            loader.candidates(),
            &[EncodingCandidate::Utf8, EncodingCandidate::Cp949]
        );
    }

    #[test]
    fn test_empty_file() {
        let file = create_temp_csv(b"");
        let result = load(file.path());
        assert!(matches!(
            result.failure(),
            Some(LoadFailure::EmptyFile { .. })
        ));
    }

    #[test]
    fn test_blank_lines_only() {
        let file = create_temp_csv(b"\n\n");
        let result = load(file.path());
        assert!(matches!(
            result.failure(),
            Some(LoadFailure::EmptyFile { .. })
        ));
    }

    #[test]
    fn test_no_candidates() {
        let file = create_temp_csv(b"A\n1\n");
        let result = TabularDataLoader::new()
            .with_candidates(Vec::<EncodingCandidate>::new())
            .load(file.path());
        match result.failure() {
            Some(LoadFailure::UnreadableEncoding { attempts, .. }) => assert!(attempts.is_empty()),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_custom_delimiter() {
        let file = create_temp_csv(b"A;B\n1;2\n");
        let loaded = TabularDataLoader::new()
            .with_delimiter(b';')
            .load(file.path())
            .into_result()
            .unwrap();
        assert_eq!(loaded.table.column_names(), vec!["A", "B"]);
        assert_eq!(loaded.encoding_used, EncodingCandidate::Utf8Sig);
    }

    #[test]
    fn test_size_limit() {
        let file = create_temp_csv(b"A,B\n1,2\n");
        let result = TabularDataLoader::new()
            .with_max_file_size(2)
            .load(file.path());
        assert!(matches!(
            result.failure(),
            Some(LoadFailure::FileTooLarge { .. })
        ));
    }
}
