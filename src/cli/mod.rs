//! CLI module
//!
//! Parses flags, resolves configuration, runs one query and writes its
//! report. All failures are returned to `main`, which prints them and exits
//! non-zero.

mod args;
mod commands;
mod errors;

pub use args::Cli;
pub use commands::{execute, run, run_cli};
pub use errors::{CliError, CliErrorCode, CliResult};
