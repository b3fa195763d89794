use std::path::PathBuf;

use serde::Serialize;

use income_analysis::{ColumnSummary, Histogram, TableMetrics};
use income_ingest::{EncodingCandidate, LoadFailure, Table};

/// Everything the `show` command displays for a loaded table.
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub file: PathBuf,
    pub encoding: EncodingCandidate,
    pub metrics: TableMetrics,
    pub numeric_columns: Vec<String>,
    pub summaries: Vec<ColumnSummary>,
    pub histogram: Option<Histogram>,
    /// Features that were skipped and why.
    pub notices: Vec<String>,
    #[serde(skip)]
    pub table: Table,
}

impl DashboardReport {
    pub fn numeric_enabled(&self) -> bool {
        !self.numeric_columns.is_empty()
    }
}

#[derive(Debug)]
pub enum ShowOutcome {
    Report(Box<DashboardReport>),
    LoadFailed(LoadFailure),
}
