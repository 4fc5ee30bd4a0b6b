//! Observability subsystem
//!
//! Structured JSON logging of typed lifecycle events.
//!
//! # Principles
//!
//! 1. Observability is read-only: no effect on query results
//! 2. Synchronous, no background threads
//! 3. Deterministic output (field order is fixed)
//!
//! # Usage
//!
//! ```ignore
//! use halo::observability::{log_event, Event, ObservationScope};
//!
//! log_event(Event::TableOpened, &[("table", "t1"), ("next_row_id", "1000")]);
//!
//! let scope = ObservationScope::new("QUERY");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

/// Log a lifecycle event at its own severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
