use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bottlecount_core::config::parse_start_date;
use bottlecount_core::{
    build_report, filter_dates, filter_trials, prepare_file, Aggregates, CsvSink, EnrichedRecord,
    PipelineError, PreparedData, Report, ReportConfig, ReportSink, TableSink, XlsxSink,
};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const NO_DATA_MESSAGE: &str = "Ooops! Problem with the data.";

#[derive(Parser, Debug)]
#[command(author, version, about = "Bottle-return receipt log reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the spreadsheet report for a receipt log
    Report(ReportArgs),
    /// Print the aggregate tables for a receipt log
    Summary(SummaryArgs),
    /// Show how the lines of a receipt log were handled
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Receipt log exported from the machine
    #[arg(short, long)]
    input: PathBuf,
    /// TOML configuration file (falls back to BOTTLECOUNT_CONFIG, then defaults)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PeriodArgs {
    /// First day of the report period, YYYY-MM-DD
    #[arg(long)]
    start_date: Option<String>,
}

#[derive(Args, Debug)]
struct ReportArgs {
    #[command(flatten)]
    input: InputArgs,
    #[command(flatten)]
    period: PeriodArgs,
    /// Workbook to write; defaults to `<input>_output.xlsx`
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Also write one CSV file per section into this directory
    #[arg(long)]
    csv_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    #[command(flatten)]
    input: InputArgs,
    #[command(flatten)]
    period: PeriodArgs,
    /// Print the aggregates as JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Print the line counts and diagnostics as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Summary(args) => handle_summary(args),
        Command::Check(args) => handle_check(args),
    }
}

fn handle_report(args: ReportArgs) -> Result<()> {
    let (config, prepared) = load(&args.input)?;
    let tickets = select_tickets(&config, &prepared, &args.period)?;
    let report = report_or_bail(&tickets)?;

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input.input));
    XlsxSink::new(&output)
        .write(&report)
        .with_context(|| format!("failed to write workbook {}", output.display()))?;

    if let Some(dir) = args.csv_dir {
        CsvSink::new(&dir)
            .write(&report)
            .with_context(|| format!("failed to write CSV files to {}", dir.display()))?;
    }

    println!("{}", output.display());
    Ok(())
}

fn handle_summary(args: SummaryArgs) -> Result<()> {
    let (config, prepared) = load(&args.input)?;
    let tickets = select_tickets(&config, &prepared, &args.period)?;
    write_summary(&tickets, args.json, io::stdout().lock())
}

fn write_summary<W: Write>(tickets: &[EnrichedRecord], json: bool, mut out: W) -> Result<()> {
    let report = report_or_bail(tickets)?;

    if json {
        let aggregates = Aggregates::compute(tickets);
        writeln!(out, "{}", serde_json::to_string_pretty(&aggregates)?)?;
        return Ok(());
    }

    TableSink::new(out).with_records(false).write(&report)?;
    Ok(())
}

fn handle_check(args: CheckArgs) -> Result<()> {
    let (_, prepared) = load(&args.input)?;
    write_check(&prepared, args.json, io::stdout().lock())
}

fn write_check<W: Write>(prepared: &PreparedData, json: bool, mut out: W) -> Result<()> {
    let summary = prepared.summary();

    if json {
        let document = serde_json::json!({
            "summary": summary,
            "errors": prepared.errors,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
        return Ok(());
    }

    writeln!(out, "accepted: {}", summary.accepted)?;
    writeln!(out, "filtered (outside accepted years): {}", summary.filtered)?;
    writeln!(out, "skipped: {}", summary.skipped)?;
    writeln!(out, "errors: {}", summary.errors)?;
    for error in &prepared.errors {
        writeln!(out, "  {error}")?;
    }
    Ok(())
}

fn load(args: &InputArgs) -> Result<(ReportConfig, PreparedData)> {
    let config =
        ReportConfig::resolve(args.config.as_deref()).context("failed to load configuration")?;
    let prepared = prepare_file(&args.input, &config.year_filter())
        .with_context(|| format!("failed to prepare {}", args.input.display()))?;
    if !prepared.errors.is_empty() {
        warn!(
            errors = prepared.errors.len(),
            "Some lines could not be parsed; run `check` for details"
        );
    }
    Ok((config, prepared))
}

fn select_tickets(
    config: &ReportConfig,
    prepared: &PreparedData,
    period: &PeriodArgs,
) -> Result<Vec<EnrichedRecord>> {
    let start = match period.start_date.as_deref() {
        Some(value) => parse_start_date(value)?,
        None => config.default_start()?,
    };
    let end = config.period_end()?;

    let tickets = filter_trials(&filter_dates(&prepared.records, start, end));
    info!(
        %start,
        %end,
        tickets = tickets.len(),
        "Selected tickets for report"
    );
    Ok(tickets)
}

fn report_or_bail(tickets: &[EnrichedRecord]) -> Result<Report> {
    match build_report(tickets) {
        Ok(report) => Ok(report),
        Err(PipelineError::EmptyResultSet) => bail!(NO_DATA_MESSAGE),
        Err(err) => Err(err.into()),
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push("_output.xlsx");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_appends_suffix() {
        assert_eq!(
            default_output_path(Path::new("uploads/receipts.txt")),
            PathBuf::from("uploads/receipts.txt_output.xlsx")
        );
    }

    #[test]
    fn cli_parses_report_arguments() {
        let cli = Cli::try_parse_from([
            "bottlecount",
            "report",
            "--input",
            "receipts.txt",
            "--start-date",
            "2017-03-01",
            "--csv-dir",
            "out",
        ])
        .expect("arguments should parse");

        match cli.command {
            Command::Report(args) => {
                assert_eq!(args.input.input, PathBuf::from("receipts.txt"));
                assert_eq!(args.period.start_date.as_deref(), Some("2017-03-01"));
                assert_eq!(args.csv_dir, Some(PathBuf::from("out")));
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn empty_selection_bails_with_no_data_message() {
        let err = report_or_bail(&[]).unwrap_err();
        assert_eq!(err.to_string(), NO_DATA_MESSAGE);
    }

    #[test]
    fn check_json_reports_counts_and_diagnostics() {
        let content = "Container            No      Cnt     Amount\n\
                       2017-01-02_08:15:42.120  No 1000 Cnt 1 Amount 10 \n\
                       2018-01-01_00:00:01.000  No 1007 Cnt 2 Amount 20 \n\
                       2017-04-10_18:50:00.000  No 1005 Amount 30 \n";
        let prepared =
            bottlecount_core::prepare_data(content, &bottlecount_core::YearFilter::default())
                .expect("prepare failed");

        let mut out = Vec::new();
        write_check(&prepared, true, &mut out).expect("check failed");
        let document: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");

        assert_eq!(document["summary"]["accepted"], 1);
        assert_eq!(document["summary"]["filtered"], 1);
        assert_eq!(document["summary"]["skipped"], 1);
        assert_eq!(document["summary"]["errors"], 1);
        let errors = document["errors"].as_array().expect("errors array");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].as_str().unwrap().starts_with("line 4: "));
    }

    #[test]
    fn empty_selection_bails_for_every_summary_format() {
        for json in [false, true] {
            let mut out = Vec::new();
            let err = write_summary(&[], json, &mut out).unwrap_err();
            assert_eq!(err.to_string(), NO_DATA_MESSAGE);
            assert!(out.is_empty(), "json={json} wrote output for an empty selection");
        }
    }
}
