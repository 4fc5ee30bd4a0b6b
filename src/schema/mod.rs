//! Table schema subsystem
//!
//! Column definitions, label resolution and the key spaces a table's rows
//! and secondary indexes live in.

mod specifiers;
mod types;

pub use specifiers::ColumnSpecifiers;
pub use types::{ColumnProperty, TableSchema};
