//! Numeric column selection and table-level metrics.

use income_ingest::{Column, Table};
use serde::Serialize;

use crate::density::GaussianKde;
use crate::error::{AnalysisError, EmptyNumericSelection, Result};
use crate::histogram::Histogram;

/// Headline counts shown above the statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableMetrics {
    pub rows: usize,
    pub columns: usize,
    pub numeric_columns: usize,
}

impl TableMetrics {
    pub fn of(table: &Table) -> Self {
        Self {
            rows: table.row_count(),
            columns: table.column_count(),
            numeric_columns: table.numeric_column_names().len(),
        }
    }
}

/// Names of the columns that numeric analysis can use, in table order.
///
/// Text columns are never included.
pub fn numeric_selection(
    table: &Table,
) -> std::result::Result<Vec<&str>, EmptyNumericSelection> {
    let names = table.numeric_column_names();
    if names.is_empty() {
        Err(EmptyNumericSelection)
    } else {
        Ok(names)
    }
}

/// Looks up a column that numeric analysis can use.
pub fn numeric_column<'a>(table: &'a Table, name: &str) -> Result<&'a Column> {
    let column = table
        .column(name)
        .ok_or_else(|| AnalysisError::ColumnNotFound {
            column: name.to_string(),
        })?;
    if !column.is_numeric() {
        return Err(AnalysisError::NotNumeric {
            column: name.to_string(),
        });
    }
    Ok(column)
}

/// Builds the histogram for `name`, optionally with density values.
///
/// When `column` is `None` the first numeric column is used.
pub fn column_histogram(
    table: &Table,
    column: Option<&str>,
    bins: usize,
    with_density: bool,
) -> Result<Histogram> {
    let name = match column {
        Some(name) => name,
        None => numeric_selection(table)?[0],
    };
    let column = numeric_column(table, name)?;
    let values = column.present_numbers();
    let histogram = Histogram::compute(column.name(), &values, bins)?;
    if with_density {
        let kde = GaussianKde::fit(&values);
        Ok(histogram.with_density(kde.as_ref()))
    } else {
        Ok(histogram)
    }
}
