//! Error types shared by the parser, codec, planner and table layers
//!
//! Error codes:
//! - HALO_BAD_SQL_STATEMENT (REJECT)
//! - HALO_INVALID_ARGUMENT (REJECT)
//! - HALO_COLUMN_NOT_FOUND (REJECT)
//! - HALO_COLUMN_NOT_INDEXED (REJECT)
//! - HALO_INCOMPATIBLE_COLUMNS (REJECT)
//! - HALO_ENCODING_ERROR (REJECT)
//! - HALO_SCHEMA_INVALID (REJECT)
//! - HALO_STORAGE_ERROR (ERROR)
//!
//! Nothing at this layer is retried. Errors are reported to the immediate caller.

use std::fmt;

use thiserror::Error;

/// Result type for halo operations
pub type HaloResult<T> = Result<T, HaloError>;

/// Severity levels for halo errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller request rejected, nothing was executed
    Reject,
    /// The storage collaborator failed underneath us
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Stable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaloErrorCode {
    BadSqlStatement,
    InvalidArgument,
    ColumnNotFound,
    ColumnNotIndexed,
    IncompatibleColumns,
    EncodingError,
    SchemaInvalid,
    StorageError,
}

impl HaloErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            HaloErrorCode::BadSqlStatement => "HALO_BAD_SQL_STATEMENT",
            HaloErrorCode::InvalidArgument => "HALO_INVALID_ARGUMENT",
            HaloErrorCode::ColumnNotFound => "HALO_COLUMN_NOT_FOUND",
            HaloErrorCode::ColumnNotIndexed => "HALO_COLUMN_NOT_INDEXED",
            HaloErrorCode::IncompatibleColumns => "HALO_INCOMPATIBLE_COLUMNS",
            HaloErrorCode::EncodingError => "HALO_ENCODING_ERROR",
            HaloErrorCode::SchemaInvalid => "HALO_SCHEMA_INVALID",
            HaloErrorCode::StorageError => "HALO_STORAGE_ERROR",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            HaloErrorCode::StorageError => Severity::Error,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for HaloErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while parsing, encoding, planning or executing a query
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HaloError {
    /// Malformed WHERE-clause text
    #[error("Bad SQL statement: {0}")]
    BadSqlStatement(String),

    /// Malformed binary argument payload or call argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Predicate references a column the table does not have
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { column: String, table: String },

    /// Predicate references a column without a secondary index
    #[error("Column '{0}' is not indexed")]
    ColumnNotIndexed(String),

    /// Two interval sets bound to different columns were merged
    #[error("Interval sets on columns #{left} and #{right} can't be merged")]
    IncompatibleColumns { left: usize, right: usize },

    /// Literal text does not parse as the column's data type
    #[error("Can't encode '{literal}' as {data_type}: {reason}")]
    Encoding {
        data_type: String,
        literal: String,
        reason: String,
    },

    /// Invalid schema definition
    #[error("Invalid schema: {0}")]
    Schema(String),

    /// Failure reported by the storage collaborator
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl HaloError {
    /// Create a bad SQL statement error
    pub fn bad_sql(reason: impl Into<String>) -> Self {
        HaloError::BadSqlStatement(reason.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        HaloError::InvalidArgument(reason.into())
    }

    /// Create an encoding error
    pub fn encoding(
        data_type: impl Into<String>,
        literal: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        HaloError::Encoding {
            data_type: data_type.into(),
            literal: literal.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> HaloErrorCode {
        match self {
            HaloError::BadSqlStatement(_) => HaloErrorCode::BadSqlStatement,
            HaloError::InvalidArgument(_) => HaloErrorCode::InvalidArgument,
            HaloError::ColumnNotFound { .. } => HaloErrorCode::ColumnNotFound,
            HaloError::ColumnNotIndexed(_) => HaloErrorCode::ColumnNotIndexed,
            HaloError::IncompatibleColumns { .. } => HaloErrorCode::IncompatibleColumns,
            HaloError::Encoding { .. } => HaloErrorCode::EncodingError,
            HaloError::Schema(_) => HaloErrorCode::SchemaInvalid,
            HaloError::Storage(_) => HaloErrorCode::StorageError,
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code().severity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            HaloError::bad_sql("x").code().code(),
            "HALO_BAD_SQL_STATEMENT"
        );
        assert_eq!(
            HaloError::ColumnNotIndexed("age".into()).code().code(),
            "HALO_COLUMN_NOT_INDEXED"
        );
        assert_eq!(
            HaloError::IncompatibleColumns { left: 0, right: 1 }.code().code(),
            "HALO_INCOMPATIBLE_COLUMNS"
        );
    }

    #[test]
    fn test_severity() {
        assert_eq!(HaloError::bad_sql("x").severity(), Severity::Reject);
        assert_eq!(HaloError::Storage("disk".into()).severity(), Severity::Error);
    }

    #[test]
    fn test_error_display() {
        let err = HaloError::ColumnNotFound {
            column: "age".into(),
            table: "users".into(),
        };
        let display = err.to_string();
        assert!(display.contains("age"));
        assert!(display.contains("users"));

        let err = HaloError::encoding("INT32", "abc", "invalid digit");
        assert_eq!(err.to_string(), "Can't encode 'abc' as INT32: invalid digit");
    }
}
