//! Paybill - Invoice Totals Binary
//!
//! Reads an invoice payload and prints its totals.
//!
//! # Usage
//!
//! ```bash
//! # Totals as JSON
//! paybill-totals invoice.json
//!
//! # Formatted totals block, English labels
//! PAYBILL_LOCALE=en paybill-totals --document < invoice.json
//! ```
//!
//! # Environment Variables
//!
//! * `PAYBILL_DEFAULT_TAX_RATE` - Rate for lines without a usable tax rate (default: 19)
//! * `PAYBILL_ROUNDING` - `half_up` or `half_even` (default: half_up)
//! * `PAYBILL_CURRENCY` - ISO currency code (default: EUR)
//! * `PAYBILL_MAX_MAGNITUDE` - Largest accepted input value (default: 1000000000000)
//! * `PAYBILL_LOCALE` - `de` or `en` for `--document` (default: de)
//! * `PAYBILL_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: warn)
//! * `PAYBILL_LOG_FORMAT` - `pretty` or `json` (default: pretty)

use anyhow::Context;
use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interface_cli::{execute, read_payload, CliConfig, CliError, Command, Input, LogFormat, USAGE};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let code = err
                .downcast_ref::<CliError>()
                .map(CliError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}

fn run() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = CliConfig::from_env().map_err(CliError::from)?;
    init_tracing(&config.log_level, config.log_format);

    let command = Command::parse(std::env::args().skip(1))?;
    let (input, mode) = match command {
        Command::Help => {
            print!("{USAGE}");
            return Ok(());
        }
        Command::Totals { input, mode } => (input, mode),
    };

    let payload = match &input {
        Input::Stdin => read_payload(io::stdin().lock(), &input)?,
        Input::File(path) => {
            let file = File::open(path).map_err(|source| CliError::Input {
                path: path.clone(),
                source,
            })?;
            read_payload(BufReader::new(file), &input)?
        }
    };

    execute(&payload, mode, &config, io::stdout().lock()).context("computing totals")?;
    tracing::debug!("done");
    Ok(())
}

/// Initializes the tracing subscriber
///
/// Logs go to stderr so stdout carries only the result.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .init(),
    }
}
