//! Error types for table analysis.

use thiserror::Error;

/// No column of the table was inferred as numeric.
///
/// Callers disable statistics and histograms when they see this; it does not
/// mean the load failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no numeric columns available for analysis")]
pub struct EmptyNumericSelection;

/// Errors that can occur while analysing a loaded table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Column not found in the table.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// Column holds text values.
    #[error("column '{column}' is not numeric")]
    NotNumeric { column: String },

    /// Histogram bucket count outside the supported range.
    #[error("bin count {bins} is outside {min}..={max}")]
    BinsOutOfRange { bins: usize, min: usize, max: usize },

    /// Polars failed while computing a statistic.
    #[error("cannot summarize column '{column}': {message}")]
    Compute { column: String, message: String },

    /// Column has no present values.
    #[error("column '{column}' has no values")]
    NoValues { column: String },

    #[error(transparent)]
    EmptyNumericSelection(#[from] EmptyNumericSelection),
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
