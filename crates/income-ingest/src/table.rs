//! Loaded table model and column type inference.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, PlSmallStr, PolarsResult, Series};
use serde::Serialize;

use crate::csv::{RawTable, normalize_headers};
use crate::numeric::{Number, is_missing, parse_number};

/// Inferred kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

/// Values of one column. `None` marks an absent cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ColumnData {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Integer(_) => ColumnKind::Integer,
            Self::Float(_) => ColumnKind::Float,
            Self::Text(_) => ColumnKind::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Integer(values) => values.len(),
            Self::Float(values) => values.len(),
            Self::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named, uniformly typed column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    #[serde(flatten)]
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    /// Numeric values as `f64`, `None` for absent cells and text columns.
    pub fn numeric_values(&self) -> Option<Vec<Option<f64>>> {
        match &self.data {
            ColumnData::Integer(values) => {
                Some(values.iter().map(|v| v.map(|v| v as f64)).collect())
            }
            ColumnData::Float(values) => Some(values.clone()),
            ColumnData::Text(_) => None,
        }
    }

    /// Present numeric values only.
    pub fn present_numbers(&self) -> Vec<f64> {
        self.numeric_values()
            .map(|values| values.into_iter().flatten().collect())
            .unwrap_or_default()
    }

    /// Number of absent cells.
    pub fn null_count(&self) -> usize {
        match &self.data {
            ColumnData::Integer(values) => values.iter().filter(|v| v.is_none()).count(),
            ColumnData::Float(values) => values.iter().filter(|v| v.is_none()).count(),
            ColumnData::Text(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }

    /// The column as a Polars series; absent cells become nulls.
    pub fn to_series(&self) -> Series {
        let name = PlSmallStr::from(self.name.as_str());
        match &self.data {
            ColumnData::Integer(values) => Series::new(name, values.as_slice()),
            ColumnData::Float(values) => Series::new(name, values.as_slice()),
            ColumnData::Text(values) => Series::new(name, values.as_slice()),
        }
    }
}

/// An immutable table produced by one load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Builds a table from parsed rows: normalizes headers, pads short rows
    /// with absent cells and infers every column's kind.
    pub(crate) fn from_raw(raw: RawTable) -> Self {
        let names = normalize_headers(raw.headers.iter().map(String::as_str));
        let row_count = raw.rows.len();

        let columns = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let cells: Vec<Option<&str>> = raw
                    .rows
                    .iter()
                    .map(|row| row.get(index).map(String::as_str))
                    .collect();
                Column::new(name, infer_column(&cells))
            })
            .collect();

        Self { columns, row_count }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Names of numeric columns in table order.
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|column| column.is_numeric())
            .map(Column::name)
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Converts the table into a Polars DataFrame for previewing.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let columns = self
            .columns
            .iter()
            .map(|column| column.to_series().into_column())
            .collect();
        DataFrame::new(columns)
    }
}

/// Infers the kind of one column from its cells (`None` = missing field in a
/// short row).
///
/// Separator stripping happens inside `parse_number`, so "1,234" counts as
/// numeric here. A column with no present values is `Float`.
fn infer_column(cells: &[Option<&str>]) -> ColumnData {
    let mut parsed = Vec::with_capacity(cells.len());
    let mut all_int = true;
    let mut all_numeric = true;
    for cell in cells {
        match present(*cell) {
            None => parsed.push(None),
            Some(value) => match parse_number(value) {
                Some(number) => {
                    all_int &= matches!(number, Number::Int(_));
                    parsed.push(Some(number));
                }
                None => {
                    all_numeric = false;
                    break;
                }
            },
        }
    }

    if !all_numeric {
        return ColumnData::Text(
            cells
                .iter()
                .map(|cell| present(*cell).map(str::to_string))
                .collect(),
        );
    }

    let any_present = parsed.iter().any(Option::is_some);
    if all_int && any_present {
        ColumnData::Integer(
            parsed
                .into_iter()
                .map(|number| match number {
                    Some(Number::Int(v)) => Some(v),
                    _ => None,
                })
                .collect(),
        )
    } else {
        ColumnData::Float(
            parsed
                .into_iter()
                .map(|number| number.map(Number::as_f64))
                .collect(),
        )
    }
}

fn present(cell: Option<&str>) -> Option<&str> {
    cell.filter(|value| !is_missing(value))
}
