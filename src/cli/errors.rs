//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit status after the
//! error response is printed.

use std::io;

use thiserror::Error;

use crate::errors::HaloError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout or config file)
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "HALO_CLI_CONFIG_ERROR",
            Self::IoError => "HALO_CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}: {message}", .code.code())]
    Cli { code: CliErrorCode, message: String },

    /// Parse, planning or storage failure underneath a command
    #[error(transparent)]
    Halo(#[from] HaloError),
}

impl CliError {
    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Cli {
            code: CliErrorCode::ConfigError,
            message: msg.into(),
        }
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::Cli {
            code: CliErrorCode::IoError,
            message: msg.into(),
        }
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            Self::Cli { code, .. } => code.code(),
            Self::Halo(err) => err.code().code(),
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::Cli { message, .. } => message.clone(),
            Self::Halo(err) => err.to_string(),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_codes() {
        let err = CliError::config_error("missing table");
        assert_eq!(err.code_str(), "HALO_CLI_CONFIG_ERROR");
        assert_eq!(err.message(), "missing table");
        assert_eq!(err.to_string(), "HALO_CLI_CONFIG_ERROR: missing table");
    }

    #[test]
    fn test_wraps_halo_error() {
        let err: CliError = HaloError::bad_sql("Bracket mismatch").into();
        assert_eq!(err.code_str(), "HALO_BAD_SQL_STATEMENT");
        assert!(err.message().contains("Bracket mismatch"));
    }

    #[test]
    fn test_from_io_error() {
        let err: CliError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.code_str(), "HALO_CLI_IO_ERROR");
    }
}
