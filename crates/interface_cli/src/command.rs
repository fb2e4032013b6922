//! Argument parsing and execution of `paybill-totals`

use serde_json::Value;
use std::io::{Read, Write};
use std::path::PathBuf;

use domain_invoicing::{DocumentTotals, InvoicePayload};

use crate::config::CliConfig;
use crate::error::CliError;

pub const USAGE: &str = "\
Usage: paybill-totals [--document] [PATH]

Reads an invoice payload as JSON from PATH (or stdin when PATH is absent or
'-') and prints its totals as JSON.

Options:
  --document    print the formatted totals block instead of JSON
  -h, --help    print this help

Environment:
  PAYBILL_DEFAULT_TAX_RATE, PAYBILL_ROUNDING, PAYBILL_CURRENCY,
  PAYBILL_MAX_MAGNITUDE, PAYBILL_LOCALE, PAYBILL_LOG_LEVEL, PAYBILL_LOG_FORMAT
";

/// Where the payload comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

/// Output flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `TotalsResult` as JSON
    Json,
    /// Formatted lines and totals rows
    Document,
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Totals { input: Input, mode: OutputMode },
}

impl Command {
    /// Parses arguments, excluding the program name
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut input = None;
        let mut mode = OutputMode::Json;

        for arg in args {
            match arg.as_ref() {
                "-h" | "--help" => return Ok(Command::Help),
                "--document" => mode = OutputMode::Document,
                "-" => input = Some(set_once(input, Input::Stdin)?),
                flag if flag.starts_with("--") => {
                    return Err(CliError::InvalidArgument(format!("unknown option '{flag}'")));
                }
                path => input = Some(set_once(input, Input::File(PathBuf::from(path)))?),
            }
        }

        Ok(Command::Totals {
            input: input.unwrap_or(Input::Stdin),
            mode,
        })
    }
}

fn set_once(current: Option<Input>, next: Input) -> Result<Input, CliError> {
    match current {
        None => Ok(next),
        Some(_) => Err(CliError::InvalidArgument(
            "only one input may be given".to_string(),
        )),
    }
}

/// Reads the whole payload text from `reader`
pub fn read_payload(mut reader: impl Read, input: &Input) -> Result<Value, CliError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| CliError::Input {
            path: match input {
                Input::Stdin => PathBuf::from("<stdin>"),
                Input::File(path) => path.clone(),
            },
            source,
        })?;
    Ok(serde_json::from_str(&text)?)
}

/// Coerces the payload, computes the totals and writes them to `out`
pub fn execute(
    payload: &Value,
    mode: OutputMode,
    config: &CliConfig,
    mut out: impl Write,
) -> Result<(), CliError> {
    let engine_config = config.engine_config();
    let payload = InvoicePayload::from_value(payload);
    let (lines, discount) = payload.coerce(&engine_config.coercion());
    let engine = engine_config.engine();

    tracing::info!(
        number = payload.number().as_deref().unwrap_or("-"),
        lines = lines.len(),
        discounted = discount.is_some_and(|d| d.enabled),
        "computing invoice totals"
    );

    match mode {
        OutputMode::Json => {
            let totals = engine.compute(&lines, discount.as_ref());
            serde_json::to_writer_pretty(&mut out, &totals)
                .map_err(|err| CliError::Output(err.into()))?;
            writeln!(out)?;
        }
        OutputMode::Document => {
            let block = DocumentTotals::build(&lines, discount.as_ref(), &engine, config.locale);
            if let Some(number) = payload.number() {
                writeln!(out, "{number}")?;
                writeln!(out)?;
            }
            for line in &block.lines {
                writeln!(
                    out,
                    "{:>3}  {:<30} {:>8} x {:>14}  {:>7}  {:>14}",
                    line.position,
                    line.description,
                    line.quantity,
                    line.unit_price,
                    line.tax_rate,
                    line.net
                )?;
            }
            if !block.lines.is_empty() {
                writeln!(out)?;
            }
            writeln!(out, "{}", block.to_plain_text())?;
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_reads_stdin() {
        let command = Command::parse(Vec::<String>::new()).unwrap();
        assert_eq!(
            command,
            Command::Totals {
                input: Input::Stdin,
                mode: OutputMode::Json
            }
        );
    }

    #[test]
    fn test_path_and_document_flag() {
        let command = Command::parse(["--document", "invoice.json"]).unwrap();
        assert_eq!(
            command,
            Command::Totals {
                input: Input::File(PathBuf::from("invoice.json")),
                mode: OutputMode::Document
            }
        );
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(Command::parse(["a.json", "--help"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_rejects_unknown_option_and_second_input() {
        assert!(matches!(
            Command::parse(["--pdf"]),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            Command::parse(["a.json", "-"]),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
