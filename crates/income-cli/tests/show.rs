//! Tests for the `show` command and argument parsing.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use income_cli::cli::{Cli, Command, DEFAULT_DATASET, OutputFormatArg, ShowArgs};
use income_cli::commands::run_show;
use income_cli::summary::load_failure_message;
use income_cli::types::{DashboardReport, ShowOutcome};
use income_ingest::EncodingCandidate;
use tempfile::TempDir;

const PERCENTILES: &str = "\
구분,인원,총급여
상위 0.1%,\"2,000\",\"1,500,000\"
상위 1%,\"18,000\",\"450,000\"
상위 10%,\"180,000\",\"120,000\"
";

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn show_args(file: &Path) -> ShowArgs {
    ShowArgs {
        file: file.to_path_buf(),
        column: None,
        encodings: Vec::new(),
        bins: 10,
        kde: false,
        preview: None,
        format: OutputFormatArg::Table,
    }
}

fn expect_report(outcome: ShowOutcome) -> Box<DashboardReport> {
    match outcome {
        ShowOutcome::Report(report) => report,
        ShowOutcome::LoadFailed(reason) => panic!("load failed: {reason}"),
    }
}

#[test]
fn show_builds_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "income.csv", PERCENTILES.as_bytes());

    let report = expect_report(run_show(&show_args(&path)).unwrap());
    assert_eq!(report.encoding, EncodingCandidate::Utf8Sig);
    assert_eq!(report.metrics.rows, 3);
    assert_eq!(report.numeric_columns, vec!["인원", "총급여"]);
    assert_eq!(report.summaries.len(), 2);

    let histogram = report.histogram.as_ref().expect("histogram");
    assert_eq!(histogram.column, "인원");
    assert_eq!(histogram.buckets.len(), 10);
    assert_eq!(histogram.total, 3);
    assert!(report.notices.is_empty());
}

#[test]
fn show_with_selected_column_and_density() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "income.csv", PERCENTILES.as_bytes());
    let args = ShowArgs {
        column: Some("총급여".to_string()),
        kde: true,
        ..show_args(&path)
    };

    let report = expect_report(run_show(&args).unwrap());
    let histogram = report.histogram.as_ref().expect("histogram");
    assert_eq!(histogram.column, "총급여");
    assert!(histogram.buckets.iter().all(|b| b.density.is_some()));
}

#[test]
fn show_missing_file_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");

    match run_show(&show_args(&path)).unwrap() {
        ShowOutcome::LoadFailed(reason) => assert!(reason.is_not_found()),
        ShowOutcome::Report(_) => panic!("expected a failed load"),
    }
}

#[test]
fn show_undecodable_file_lists_tried_encodings() {
    let dir = tempfile::tempdir().unwrap();
    // 0xFF is not a valid byte in any candidate encoding
    let path = write_file(&dir, "binary.csv", b"A,B\n\xFF\xFF,1\n");

    let reason = match run_show(&show_args(&path)).unwrap() {
        ShowOutcome::LoadFailed(reason) => reason,
        ShowOutcome::Report(_) => panic!("expected a failed load"),
    };
    assert!(!reason.is_not_found());

    let message = load_failure_message(&reason);
    assert!(message.contains("binary.csv"));
    assert!(message.contains("any supported encoding"));
    assert!(message.contains("Tried: utf-8-sig, cp949, euc-kr, utf-8"));
    assert!(!message.contains("not found"));
}

#[test]
fn missing_file_message_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");

    let ShowOutcome::LoadFailed(reason) = run_show(&show_args(&path)).unwrap() else {
        panic!("expected a failed load");
    };
    let message = load_failure_message(&reason);
    assert!(message.starts_with("error: file not found"));
    assert!(message.contains("absent.csv"));
    assert!(!message.contains("Tried:"));
}

#[test]
fn show_uses_requested_encodings_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "income.csv", PERCENTILES.as_bytes());
    let args = ShowArgs {
        encodings: vec![EncodingCandidate::Utf8],
        ..show_args(&path)
    };

    let report = expect_report(run_show(&args).unwrap());
    assert_eq!(report.encoding, EncodingCandidate::Utf8);
}

#[test]
fn show_text_only_table_skips_numeric_features() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "regions.csv", "지역,비고\n서울,수도\n".as_bytes());

    let report = expect_report(run_show(&show_args(&path)).unwrap());
    assert!(!report.numeric_enabled());
    assert!(report.summaries.is_empty());
    assert!(report.histogram.is_none());
    assert_eq!(report.notices.len(), 1);
}

#[test]
fn show_unknown_column_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "income.csv", PERCENTILES.as_bytes());
    let args = ShowArgs {
        column: Some("없는열".to_string()),
        ..show_args(&path)
    };

    let error = run_show(&args).unwrap_err();
    assert!(format!("{error:#}").contains("없는열"));
}

#[test]
fn report_serializes_encoding_label() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "income.csv", PERCENTILES.as_bytes());

    let report = expect_report(run_show(&show_args(&path)).unwrap());
    let json = serde_json::to_value(&*report).unwrap();
    assert_eq!(json["encoding"], "utf-8-sig");
    assert_eq!(json["metrics"]["numeric_columns"], 2);
    assert!(json.get("table").is_none());
}

#[test]
fn parse_show_defaults() {
    let cli = Cli::try_parse_from(["income-dash", "show"]).unwrap();
    let Command::Show(args) = cli.command else {
        panic!("expected show");
    };
    assert_eq!(args.file, PathBuf::from(DEFAULT_DATASET));
    assert_eq!(args.bins, 30);
    assert!(!args.kde);
    assert_eq!(args.format, OutputFormatArg::Table);
}

#[test]
fn parse_rejects_bins_out_of_range() {
    assert!(Cli::try_parse_from(["income-dash", "show", "--bins", "4"]).is_err());
    assert!(Cli::try_parse_from(["income-dash", "show", "--bins", "101"]).is_err());

    let cli = Cli::try_parse_from(["income-dash", "show", "--bins", "100", "--kde"]).unwrap();
    let Command::Show(args) = cli.command else {
        panic!("expected show");
    };
    assert_eq!(args.bins, 100);
    assert!(args.kde);
}

#[test]
fn parse_encoding_overrides() {
    let cli = Cli::try_parse_from([
        "income-dash",
        "show",
        "--encoding",
        "EUC_KR",
        "--encoding",
        "cp949",
    ])
    .unwrap();
    let Command::Show(args) = cli.command else {
        panic!("expected show");
    };
    assert_eq!(
        args.encodings,
        vec![EncodingCandidate::EucKr, EncodingCandidate::Cp949]
    );

    assert!(Cli::try_parse_from(["income-dash", "show", "--encoding", "latin-1"]).is_err());
}
