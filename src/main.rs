//! Benefits oracle CLI - runs the `/Employees` contract suite
//!
//! Configuration comes from a YAML file when `--config` is given, otherwise
//! from environment variables.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use benefits_oracle::config::{ConfigLoader, SuiteConfig};
use benefits_oracle::error::OracleResult;
use benefits_oracle::suite::{ApiSuite, SuiteReport};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "BENEFITS_ORACLE_LOG";

/// Report output format.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// One line per case and a summary
    #[default]
    Text,
    /// The full report as JSON
    Json,
}

/// Runs the payroll API contract suite and checks paycheck amounts.
#[derive(Parser)]
#[command(name = "benefits-oracle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file (environment variables are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Configuration error");
            eprintln!("configuration error: {}", err);
            return ExitCode::from(2);
        }
    };

    let suite = match ApiSuite::new(config) {
        Ok(suite) => suite,
        Err(err) => {
            error!(error = %err, "Failed to create HTTP client");
            return ExitCode::from(2);
        }
    };

    let report = suite.run().await;
    if let Err(err) = print_report(&report, cli.format) {
        error!(error = %err, "Failed to write report");
        return ExitCode::FAILURE;
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_config(cli: &Cli) -> OracleResult<SuiteConfig> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::from_env()?,
    };
    Ok(loader.into_config())
}

fn print_report(report: &SuiteReport, format: OutputFormat) -> OracleResult<()> {
    match format {
        OutputFormat::Text => println!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
