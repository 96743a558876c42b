//! Entry point for the weekly program extractor.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load configuration from `conf/config.toml` and apply flag overrides.
//! - Run headless when an EPUB path is given, otherwise open the picker window.

mod app;

use crate::app::run_app;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};
use vym_core::ExtractError;
use vym_core::config::{AppConfig, DocumentOrder, OutputFormat, load_config, serialize_config};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

/// Extract weekly meeting programs from an EPUB workbook into a spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "vym-extractor", version)]
struct Cli {
    /// EPUB file to process; opens the file picker when omitted
    #[arg(value_name = "EPUB")]
    input: Option<PathBuf>,

    /// Output file (defaults to output.path from the config)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Output format; inferred from --output's extension when omitted
    #[arg(short, long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Order in which documents are read from the archive
    #[arg(long, value_enum)]
    order: Option<CliDocumentOrder>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf/config.toml")]
    config: PathBuf,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Xlsx,
    Text,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(format: CliOutputFormat) -> Self {
        match format {
            CliOutputFormat::Xlsx => OutputFormat::Xlsx,
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDocumentOrder {
    Archive,
    Spine,
}

impl From<CliDocumentOrder> for DocumentOrder {
    fn from(order: CliDocumentOrder) -> Self {
        match order {
            CliDocumentOrder::Archive => DocumentOrder::Archive,
            CliDocumentOrder::Spine => DocumentOrder::Spine,
        }
    }
}

fn main() {
    let reload_handle = init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli, &reload_handle) {
        match err.downcast_ref::<ExtractError>() {
            Some(extract_err) => {
                error!("{err:?}");
                eprintln!("error: {}: {}", extract_err.kind(), extract_err);
            }
            None => error!("{err:?}"),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, reload_handle: &ReloadHandle) -> Result<()> {
    let mut config = load_config(&cli.config);
    apply_overrides(&mut config, &cli);
    set_log_level(reload_handle, config.log_level.as_filter_str());

    if cli.print_config {
        print!("{}", serialize_config(&config)?);
        return Ok(());
    }

    match cli.input {
        Some(path) => run_headless(&path, &config),
        None => {
            info!(output = %config.output.path, "Opening file picker");
            run_app(config).context("Failed to start the GUI")
        }
    }
}

fn run_headless(path: &Path, config: &AppConfig) -> Result<()> {
    let summary = vym_core::run(path, config)?;
    println!(
        "Wrote {} entries from {} to {}",
        summary.entries,
        path.display(),
        summary.output_path.display()
    );
    Ok(())
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(order) = cli.order {
        config.document_order = order.into();
    }
    if let Some(output) = &cli.output {
        config.output.path = output.to_string_lossy().into_owned();
        if let Some(format) = OutputFormat::from_path(output) {
            config.output.format = format;
        }
    }
    if let Some(format) = cli.format {
        if cli.output.is_some() {
            config.output.format = format.into();
        } else {
            config.output.set_format(format.into());
        }
    }
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    }
}
