//! CLI entry point for the billing reporter.
//!
//! Downloads a billing CSV export from blob storage and writes per-run
//! aggregate cost reports grouped by subscription, meter category, account
//! and month.

use anyhow::Result;
use billing_reporter::config::Settings;
use billing_reporter::fetch::auth::sas::has_sas_signature;
use billing_reporter::fetch::{BasicClient, auth::SasToken, fetch_source};
use billing_reporter::loader::{derive_periods, load_billing_csv};
use billing_reporter::output::{RunSummary, print_json, print_preview};
use billing_reporter::paths::{RunPaths, run_timestamp};
use billing_reporter::report::{GroupKey, grand_total, write_cost_report};
use clap::Parser;
use std::ffi::OsStr;
use std::path::Path;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "billing_reporter")]
#[command(about = "Transform a billing export into aggregate cost reports", long_about = None)]
struct Cli {
    /// Blob url with SAS token (falls back to STORAGE_URL)
    #[arg(short, long)]
    source: Option<String>,

    /// Location to write reports (falls back to OUT_FOLDER)
    #[arg(short, long)]
    out: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/billing_reporter.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("billing_reporter.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let settings = Settings::resolve(cli.source, cli.out)?;

    run(&settings).await
}

/// Runs one fetch → load → derive → report cycle. Any step's error aborts
/// the run, leaving already-created directories and files in place.
#[tracing::instrument(skip(settings), fields(out_dir = %settings.out_dir))]
async fn run(settings: &Settings) -> Result<()> {
    let timestamp = run_timestamp();
    let paths = RunPaths::new(Path::new(&settings.out_dir), &timestamp);
    paths.create_dirs()?;

    fetch(&settings.source, &paths).await?;

    let mut rows = load_billing_csv(&paths.billing_file)?;
    derive_periods(&mut rows)?;
    print_preview(&rows);

    let reports = vec![
        write_cost_report(
            &rows,
            GroupKey::Subscription,
            &paths.report_dir,
            "cost_by_subscription.csv",
        )?,
        write_cost_report(
            &rows,
            GroupKey::MeterCategory,
            &paths.report_dir,
            "cost_by_meter_cat.csv",
        )?,
        write_cost_report(
            &rows,
            GroupKey::Account,
            &paths.report_dir,
            "cost_by_account.csv",
        )?,
        write_cost_report(&rows, GroupKey::Month, &paths.report_dir, "cost_by_month.csv")?,
    ];

    let summary = RunSummary {
        timestamp,
        rows_loaded: rows.len(),
        grand_total: grand_total(&rows),
        reports,
    };
    print_json(&summary)?;

    Ok(())
}

/// Stages the billing export, attaching `AZURE_SAS_TOKEN` from the
/// environment when the source URL does not already carry a signature.
#[tracing::instrument(skip_all)]
async fn fetch(source: &str, paths: &RunPaths) -> Result<()> {
    let sas_token = std::env::var("AZURE_SAS_TOKEN")
        .ok()
        .filter(|t| !t.is_empty());

    match sas_token {
        Some(token) if !has_sas_signature(source) => {
            let client = SasToken {
                inner: BasicClient::new(),
                token,
            };
            fetch_source(&client, source, &paths.billing_file).await?;
        }
        _ => {
            let client = BasicClient::new();
            fetch_source(&client, source, &paths.billing_file).await?;
        }
    }

    Ok(())
}
