//! halo - indexed WHERE-clause planning over an ordered key-value store
//!
//! A WHERE clause is parsed into a predicate tree, planned into byte
//! intervals over per-column secondary indexes, and resolved into sorted
//! row-id sets by scanning a `KeyValueStore`.

pub mod cli;
pub mod codec;
pub mod errors;
pub mod executor;
pub mod observability;
pub mod parser;
pub mod planner;
pub mod predicate;
pub mod schema;
pub mod storage;
pub mod table;

pub use errors::{HaloError, HaloResult};
