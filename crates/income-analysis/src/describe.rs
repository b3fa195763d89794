//! Per-column summary statistics.

use income_ingest::{Column, Table};
use polars::prelude::{ChunkQuantile, DataType, PolarsError, QuantileMethod};
use serde::Serialize;

use crate::error::{AnalysisError, EmptyNumericSelection, Result};

/// Summary of one numeric column after dropping absent values.
///
/// Statistics that are undefined for the number of present values are
/// `None` (everything but `count` for an empty column, `std` for a single
/// value).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (ddof = 1).
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Summarizes one numeric column.
pub fn describe(column: &Column) -> Result<ColumnSummary> {
    if !column.is_numeric() {
        return Err(AnalysisError::NotNumeric {
            column: column.name().to_string(),
        });
    }
    summarize(column)
}

/// Summarizes every numeric column in table order.
pub fn describe_table(table: &Table) -> Result<Vec<ColumnSummary>> {
    let numeric: Vec<&Column> = table
        .columns()
        .iter()
        .filter(|column| column.is_numeric())
        .collect();
    if numeric.is_empty() {
        return Err(EmptyNumericSelection.into());
    }
    numeric.into_iter().map(summarize).collect()
}

fn summarize(column: &Column) -> Result<ColumnSummary> {
    let name = column.name();
    let series = column
        .to_series()
        .cast(&DataType::Float64)
        .map_err(|e| compute_error(name, &e))?
        .drop_nulls();
    let values = series.f64().map_err(|e| compute_error(name, &e))?;
    let quartile = |q: f64| {
        values
            .quantile(q, QuantileMethod::Linear)
            .map_err(|e| compute_error(name, &e))
    };

    let count = series.len();
    Ok(ColumnSummary {
        column: name.to_string(),
        count,
        mean: series.mean(),
        // a single value has no sample deviation
        std: if count < 2 { None } else { series.std(1) },
        min: series.min::<f64>().map_err(|e| compute_error(name, &e))?,
        q25: quartile(0.25)?,
        median: quartile(0.5)?,
        q75: quartile(0.75)?,
        max: series.max::<f64>().map_err(|e| compute_error(name, &e))?,
    })
}

fn compute_error(column: &str, error: &PolarsError) -> AnalysisError {
    AnalysisError::Compute {
        column: column.to_string(),
        message: error.to_string(),
    }
}
