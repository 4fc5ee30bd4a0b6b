//! CLI argument definitions using clap
//!
//! Commands:
//! - halo parse --where <clause>
//! - halo explain --config <path> [--where <clause>]
//! - halo select --config <path> [--where <clause>] [--columns a,b]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// halo - indexed WHERE-clause planning over an ordered key-value store
#[derive(Parser, Debug)]
#[command(name = "halo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Parse a WHERE clause and print its condition tree
    Parse {
        /// Clause text, starting with WHERE
        #[arg(long = "where")]
        clause: String,
    },

    /// Plan a WHERE clause against the configured table
    Explain {
        /// Path to configuration file
        #[arg(long, default_value = "./halo.json")]
        config: PathBuf,

        /// Clause text; every row qualifies when omitted
        #[arg(long = "where")]
        clause: Option<String>,
    },

    /// Load the seed rows and print the rows a WHERE clause selects
    Select {
        /// Path to configuration file
        #[arg(long, default_value = "./halo.json")]
        config: PathBuf,

        /// Clause text; every row qualifies when omitted
        #[arg(long = "where")]
        clause: Option<String>,

        /// Columns to print, comma separated; all columns when omitted
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
