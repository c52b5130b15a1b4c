//! # kpiscan
//!
//! Command-line interface for per-group KPI anomaly detection.

use std::path::{Path, PathBuf};

use anomaly_facade::{AnomalyPipeline, DetectionConfig, DetectionConfigBuilder, Reducer, RunConfig};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use report::{ReportOptions, TerminalReporter};
use table_facade::Workbook;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kpiscan")]
#[command(about = "Flag KPI groups that leave their forecast band after a change point", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sheets of a workbook (a CSV file has one)
    Sheets {
        /// Input file (CSV or spreadsheet)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List the columns of a sheet
    Columns {
        /// Input file (CSV or spreadsheet)
        #[arg(short, long)]
        input: PathBuf,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// Detect anomalous groups
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Input file (CSV or spreadsheet)
    #[arg(short, long)]
    input: PathBuf,

    /// Sheet to analyse; repeat to analyse several (default: first sheet)
    #[arg(short, long)]
    sheet: Vec<String>,

    /// Grouping column, e.g. a cell or site name
    #[arg(short, long)]
    group: Option<String>,

    /// Time column (default: first column)
    #[arg(short, long)]
    time: Option<String>,

    /// KPI column (default: second column)
    #[arg(short, long)]
    kpi: Option<String>,

    /// Reducer for MRBTS/LNBTS/NRBTS grouping columns (sum, mean, median)
    #[arg(long)]
    agg: Option<Reducer>,

    /// Anomalies are counted from this timestamp on (default: 2025-05-06 12:00:00)
    #[arg(long)]
    change_point: Option<String>,

    /// Minimum anomaly count to report a group, 1 to 20 (default: 3)
    #[arg(long)]
    threshold: Option<i64>,

    /// JSON file with "forecast" and "detection" settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

/// Read a `--config` file.
fn load_config(path: &Path) -> Result<RunConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Apply command-line flags on top of the file configuration.
fn detection_config(base: DetectionConfig, args: &RunArgs) -> Result<DetectionConfig> {
    let mut builder = DetectionConfigBuilder::from_config(base);
    if let Some(group) = &args.group {
        builder = builder.group_column(group);
    }
    if let Some(time) = &args.time {
        builder = builder.time_column(time);
    }
    if let Some(kpi) = &args.kpi {
        builder = builder.kpi_column(kpi);
    }
    if let Some(reducer) = args.agg {
        builder = builder.reducer(reducer);
    }
    if let Some(change_point) = &args.change_point {
        builder = builder.change_point_str(change_point)?;
    }
    if let Some(threshold) = args.threshold {
        builder = builder.threshold(threshold);
    }
    Ok(builder.build()?)
}

fn run_sheets(input: &Path) -> Result<()> {
    let workbook = Workbook::open(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;
    for name in workbook.sheet_names() {
        println!("{}", name);
    }
    Ok(())
}

fn run_columns(input: &Path, sheet: Option<&str>) -> Result<()> {
    let mut workbook = Workbook::open(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;
    let table = workbook.select(sheet)?;
    for (idx, column) in table.columns().iter().enumerate() {
        println!("{:>3}  {}", idx, column);
    }
    Ok(())
}

fn run_detect(args: RunArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RunConfig::default(),
    };
    let detection = detection_config(config.detection, &args)?;
    let pipeline = AnomalyPipeline::with_defaults(config.forecast)?;

    let mut workbook = Workbook::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;

    let sheets: Vec<Option<&str>> = if args.sheet.is_empty() {
        vec![None]
    } else {
        args.sheet.iter().map(|s| Some(s.as_str())).collect()
    };
    let options = ReportOptions {
        charts: !args.no_charts,
        json: args.json,
        ..ReportOptions::default()
    };

    for sheet in sheets {
        if let (Some(name), false) = (sheet, args.json) {
            println!("== {} ==", name);
        }
        let table = workbook.select(sheet)?;
        tracing::info!(sheet = sheet.unwrap_or("<first>"), rows = table.row_count(), "analysing sheet");
        let mut reporter =
            TerminalReporter::stdio(options).group_label(&detection.group_column);
        pipeline.run(table, &detection, &mut reporter)?;
        if let Some(e) = reporter.take_error() {
            return Err(e).context("Failed to write report");
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sheets { input } => run_sheets(&input),
        Commands::Columns { input, sheet } => run_columns(&input, sheet.as_deref()),
        Commands::Run(args) => run_detect(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
