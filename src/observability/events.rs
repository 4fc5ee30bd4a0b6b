//! Observable events
//!
//! Every log line the query layer emits names one of these events.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded and validated
    ConfigLoaded,

    // Table lifecycle
    /// Table opened; next row id discovered
    TableOpened,

    // Query processing
    /// WHERE clause parsed
    ClauseParsed,
    /// WHERE clause or plan rejected
    ClauseRejected,
    /// Plan produced
    QueryPlanned,
    /// Range scan over a secondary index
    IndexScan,
    /// Unconditional scan over the primary key space
    PrimaryScan,
    /// Plan executed into a row-id set
    RowsResolved,

    // Writes
    /// Row inserted
    RowInserted,
    /// Rows updated
    RowsUpdated,
    /// Rows deleted
    RowsDeleted,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::TableOpened => "TABLE_OPENED",
            Event::ClauseParsed => "CLAUSE_PARSED",
            Event::ClauseRejected => "CLAUSE_REJECTED",
            Event::QueryPlanned => "QUERY_PLANNED",
            Event::IndexScan => "INDEX_SCAN",
            Event::PrimaryScan => "PRIMARY_SCAN",
            Event::RowsResolved => "ROWS_RESOLVED",
            Event::RowInserted => "ROW_INSERTED",
            Event::RowsUpdated => "ROWS_UPDATED",
            Event::RowsDeleted => "ROWS_DELETED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::IndexScan | Event::PrimaryScan | Event::RowInserted => Severity::Trace,
            Event::ClauseRejected => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
