//! CLI module for halo
//!
//! Provides command-line interface for:
//! - parse: Parse a WHERE clause and print its condition tree
//! - explain: Plan a WHERE clause against a configured table
//! - select: Resolve a WHERE clause over configured seed rows

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    explain, parse, run, run_command, select, ColumnConfig, Config, TableConfig,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response, write_text};
