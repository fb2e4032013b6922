//! Command-Line Interface
//!
//! This crate provides `paybill-totals`, which reads an invoice payload as
//! JSON and prints its totals.
//!
//! # Architecture
//!
//! - **Config**: `PAYBILL_*` environment variables via the `config` crate
//! - **Command**: argument parsing and execution against any reader/writer
//! - **Error Handling**: `CliError` with `sysexits` exit codes
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_cli::{execute, CliConfig, OutputMode};
//!
//! let payload = serde_json::json!({"lines": [{"quantity": 2, "unitPrice": 100, "taxRate": 19}]});
//! execute(&payload, OutputMode::Json, &CliConfig::default(), std::io::stdout())?;
//! ```

pub mod command;
pub mod config;
pub mod error;

pub use command::{execute, read_payload, Command, Input, OutputMode, USAGE};
pub use config::{CliConfig, LogFormat};
pub use error::CliError;
