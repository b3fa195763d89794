use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use income_analysis::{ColumnSummary, Histogram};
use income_ingest::LoadFailure;

use crate::types::DashboardReport;

pub fn print_report(report: &DashboardReport, preview: Option<usize>) -> Result<()> {
    println!(
        "Loaded {} (encoding: {})",
        report.file.display(),
        report.encoding
    );
    print_metrics(report);

    if let Some(rows) = preview {
        let frame = report
            .table
            .to_dataframe()
            .context("failed to build preview")?;
        println!();
        println!("Preview:");
        println!("{}", frame.head(Some(rows)));
    }

    if report.numeric_enabled() {
        print_statistics(&report.summaries);
    }
    if let Some(histogram) = &report.histogram {
        print_histogram(histogram);
    }
    for notice in &report.notices {
        eprintln!("warning: {notice}");
    }
    Ok(())
}

pub fn print_json(report: &DashboardReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    println!("{json}");
    Ok(())
}

pub fn print_load_failure(reason: &LoadFailure) {
    eprintln!("{}", load_failure_message(reason));
}

/// Message for a failed load, telling a wrong path apart from an unreadable
/// file.
pub fn load_failure_message(reason: &LoadFailure) -> String {
    match reason {
        LoadFailure::NotFound { path } => format!(
            "error: file not found: {}\nCheck the path or pass the file to load as an argument.",
            path.display()
        ),
        LoadFailure::UnreadableEncoding { path, attempts } => {
            let mut message = format!(
                "error: could not read {} with any supported encoding\nTried: {}",
                path.display(),
                reason.attempted_encodings().join(", ")
            );
            for attempt in attempts {
                message.push_str(&format!("\n- {}: {}", attempt.encoding, attempt.error));
            }
            message
        }
        other => format!("error: {other}"),
    }
}

fn print_metrics(report: &DashboardReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Numeric columns"),
    ]);
    apply_table_style(&mut table);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(group_digits(report.metrics.rows as i64)),
        Cell::new(report.metrics.columns),
        count_cell(report.metrics.numeric_columns),
    ]);
    println!("{table}");
}

fn print_statistics(summaries: &[ColumnSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Mean"),
        header_cell("Std"),
        header_cell("Min"),
        header_cell("25%"),
        header_cell("50%"),
        header_cell("75%"),
        header_cell("Max"),
    ]);
    apply_wide_table_style(&mut table);
    for index in 1..9 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.column)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(group_digits(summary.count as i64)),
            stat_cell(summary.mean),
            stat_cell(summary.std),
            stat_cell(summary.min),
            stat_cell(summary.q25),
            stat_cell(summary.median),
            stat_cell(summary.q75),
            stat_cell(summary.max),
        ]);
    }
    println!();
    println!("Statistics:");
    println!("{table}");
}

fn print_histogram(histogram: &Histogram) {
    let with_density = histogram.buckets.iter().any(|b| b.density.is_some());
    let mut headers = vec![header_cell("Range"), header_cell("Count")];
    if with_density {
        headers.push(header_cell("Density"));
    }

    let mut table = Table::new();
    table.set_header(headers);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    if with_density {
        align_column(&mut table, 2, CellAlignment::Right);
    }

    let max_count = histogram.max_count();
    for bucket in &histogram.buckets {
        let count = if bucket.count > 0 && bucket.count == max_count {
            Cell::new(bucket.count)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(bucket.count)
        };
        let mut row = vec![
            Cell::new(format!(
                "{} - {}",
                format_stat(Some(bucket.lower)),
                format_stat(Some(bucket.upper))
            )),
            count,
        ];
        if with_density {
            row.push(match bucket.density {
                Some(density) => Cell::new(format!("{density:.3e}")),
                None => dim_cell("-"),
            });
        }
        table.add_row(row);
    }
    println!();
    println!(
        "Histogram of {} ({} values, {} buckets):",
        histogram.column,
        histogram.total,
        histogram.buckets.len()
    );
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_wide_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}

fn stat_cell(value: Option<f64>) -> Cell {
    match value {
        Some(_) => Cell::new(format_stat(value)),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

/// Formats a statistic with thousands separators; whole numbers keep no
/// fraction, everything else gets two decimals.
pub(crate) fn format_stat(value: Option<f64>) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };
    if !value.is_finite() {
        return value.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return group_digits(value as i64);
    }
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    let grouped = whole.parse::<i64>().map_or_else(|_| whole.to_string(), group_digits);
    format!("{sign}{grouped}.{fraction}")
}

fn group_digits(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
