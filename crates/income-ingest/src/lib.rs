//! Income statistics table ingestion.
//!
//! This crate loads comma-delimited statistics tables whose text encoding is
//! not known ahead of time (published Korean datasets ship as UTF-8 with a
//! byte-order mark, or in a legacy Korean code page).
//!
//! # Features
//!
//! - **Encoding fallback**: try `utf-8-sig`, `cp949`, `euc-kr`, `utf-8` in order
//! - **Numeric normalization**: strip `,` thousands separators before type inference
//! - **Header cleanup**: trimmed, unique column names
//! - **Failure taxonomy**: "file not found" is distinct from "no encoding fits"
//!
//! # Example
//!
//! ```ignore
//! use income_ingest::{LoadResult, load};
//!
//! match load("국세청_근로소득 백분위(천분위) 자료_20241231.csv") {
//!     LoadResult::Success { table, encoding_used } => {
//!         println!("{} rows via {encoding_used}", table.row_count());
//!     }
//!     LoadResult::Failure { reason } => eprintln!("{reason}"),
//! }
//! ```

mod csv;
mod encoding;
mod error;
mod loader;
mod numeric;
mod table;

// === Error Types ===
pub use error::{AttemptError, FailedAttempt, LoadFailure, Result};

// === Encodings ===
pub use encoding::{DEFAULT_CANDIDATES, EncodingCandidate};

// === Loading ===
pub use self::csv::{MAX_CSV_FILE_SIZE, normalize_header, normalize_headers};
pub use loader::{LoadResult, LoadedTable, TabularDataLoader, load};

// === Table Model ===
pub use numeric::{MISSING_MARKERS, Number, is_missing, is_numeric, parse_number, strip_grouping};
pub use table::{Column, ColumnData, ColumnKind, Table};
