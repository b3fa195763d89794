//! Analysis of loaded income tables.
//!
//! Computes the numbers a dashboard shows for a table: headline metrics,
//! per-column summary statistics, histogram buckets for one numeric column
//! and an optional kernel density estimate. Nothing here draws anything.

mod density;
mod describe;
mod error;
mod histogram;
mod selection;

pub use density::GaussianKde;
pub use describe::{ColumnSummary, describe, describe_table};
pub use error::{AnalysisError, EmptyNumericSelection, Result};
pub use histogram::{Bucket, DEFAULT_BINS, Histogram, MAX_BINS, MIN_BINS, check_bins};
pub use selection::{TableMetrics, column_histogram, numeric_column, numeric_selection};
