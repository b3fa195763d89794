//! CSV reading utilities.

mod header;
mod reader;

pub use header::{normalize_header, normalize_headers};
pub use reader::{MAX_CSV_FILE_SIZE, RawTable, parse_delimited, read_source};
