//! # recargo
//!
//! Command-line card surcharge calculator.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments (clap)                                              │
//! │  2. Load settings: defaults → recargo.toml / --config → RECARGO__* env  │
//! │  3. Init tracing on stderr (RUST_LOG, else settings.log_level)          │
//! │  4. Load + validate the catalog (--catalog, else settings.catalog_path) │
//! │  5. Run the command, print table or JSON on stdout                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Examples
//! ```text
//! recargo calcular --plan 3 --monto 10000 --recargo 20
//! recargo calcular --plan 3 --monto 10000 --auto --json
//! recargo recargo --plan 3 --monto 10000 --simplificado
//! recargo escenarios --plan 1 --monto 10000 --max 15
//! recargo planes --empresa 2
//! ```

mod catalog_file;
mod commands;
mod error;
mod output;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::catalog_file::load_catalog;
use crate::commands::Command;
use crate::error::{CliError, ErrorCode, ErrorReport};
use crate::output::render;
use crate::settings::{OutputFormat, Settings};

#[derive(Debug, Parser)]
#[command(name = "recargo", version, about = "Card surcharge calculator")]
struct Cli {
    /// Settings file (default: ./recargo.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog file, overrides `catalog_path` from settings
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    match run(&cli, &mut format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_failure(&err, format),
    }
}

fn run(cli: &Cli, format: &mut OutputFormat) -> anyhow::Result<()> {
    let settings = Settings::load(cli.config.as_deref()).map_err(CliError::from)?;
    if !cli.json {
        *format = settings.output_format;
    }
    init_tracing(&settings.log_level);

    let catalog_path = cli.catalog.clone().unwrap_or(settings.catalog_path);
    let catalog = load_catalog(&catalog_path)?;

    let report = cli.command.run(&catalog, Utc::now())?;
    let text = render(&report, *format)?;
    println!("{}", text.trim_end());

    info!("Done");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=recargo_core=trace` - Show every bisection step
/// - Default: `log_level` from settings (`info`)
///
/// Logs go to stderr so stdout carries only the report.
fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report_failure(err: &anyhow::Error, format: OutputFormat) -> ExitCode {
    let report = err
        .downcast_ref::<CliError>()
        .map(ErrorReport::from)
        .unwrap_or_else(|| ErrorReport {
            code: ErrorCode::Internal,
            message: format!("{err:#}"),
        });
    error!(code = ?report.code, message = %report.message, "Command failed");

    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(text) => eprintln!("{text}"),
            Err(_) => eprintln!("error: {}", report.message),
        },
        OutputFormat::Table => eprintln!("error: {}", report.message),
    }
    ExitCode::from(report.code.exit_status())
}
