use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use income_analysis::{
    AnalysisError, TableMetrics, column_histogram, describe_table, numeric_selection,
};
use income_ingest::{DEFAULT_CANDIDATES, EncodingCandidate, LoadResult, TabularDataLoader};

use crate::cli::ShowArgs;
use crate::summary::apply_table_style;
use crate::types::{DashboardReport, ShowOutcome};

pub fn run_encodings() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Priority", "Encoding", "Accepts"]);
    apply_table_style(&mut table);
    for (index, candidate) in DEFAULT_CANDIDATES.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            candidate.label().to_string(),
            encoding_description(*candidate).to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn encoding_description(candidate: EncodingCandidate) -> &'static str {
    match candidate {
        EncodingCandidate::Utf8Sig => "UTF-8, leading byte-order mark removed",
        EncodingCandidate::Cp949 => "Windows code page 949 (Unified Hangul Code)",
        EncodingCandidate::EucKr => "EUC-KR, KS X 1001 characters only",
        EncodingCandidate::Utf8 => "UTF-8, byte-order mark kept",
    }
}

/// Loads the file and computes everything the dashboard shows.
///
/// A failed load is an outcome, not an error: the caller reports it to the
/// user. Errors are reserved for invalid requests such as an unknown column.
pub fn run_show(args: &ShowArgs) -> Result<ShowOutcome> {
    let span = info_span!("show", file = %args.file.display());
    let _guard = span.enter();

    let mut loader = TabularDataLoader::new();
    if !args.encodings.is_empty() {
        loader = loader.with_candidates(args.encodings.iter().copied());
    }

    let (table, encoding) = match loader.load(&args.file) {
        LoadResult::Success {
            table,
            encoding_used,
        } => (table, encoding_used),
        LoadResult::Failure { reason } => return Ok(ShowOutcome::LoadFailed(reason)),
    };

    let metrics = TableMetrics::of(&table);
    info!(
        rows = metrics.rows,
        numeric_columns = metrics.numeric_columns,
        encoding = %encoding,
        "table ready"
    );

    let mut notices = Vec::new();
    let numeric_columns: Vec<String> = match numeric_selection(&table) {
        Ok(names) => names.into_iter().map(str::to_string).collect(),
        Err(empty) => {
            warn!("{empty}; statistics and histogram disabled");
            notices.push("no numeric columns to analyse".to_string());
            Vec::new()
        }
    };

    let (summaries, histogram) = if numeric_columns.is_empty() {
        (Vec::new(), None)
    } else {
        let summaries = describe_table(&table).context("cannot summarize numeric columns")?;
        let histogram = match column_histogram(&table, args.column.as_deref(), args.bins, args.kde)
        {
            Ok(histogram) => Some(histogram),
            Err(AnalysisError::NoValues { column }) => {
                warn!(column = %column, "histogram skipped, column has no values");
                notices.push(format!("column '{column}' has no values to plot"));
                None
            }
            Err(error) => {
                return Err(error).with_context(|| {
                    format!(
                        "cannot build histogram (numeric columns: {})",
                        numeric_columns.join(", ")
                    )
                });
            }
        };
        (summaries, histogram)
    };

    Ok(ShowOutcome::Report(Box::new(DashboardReport {
        file: args.file.clone(),
        encoding,
        metrics,
        numeric_columns,
        summaries,
        histogram,
        notices,
        table,
    })))
}
