//! Query executor subsystem
//!
//! Consumes plans produced by the planner and turns them into row-id sets by
//! scanning storage.
//!
//! # Execution Flow
//!
//! 1. FULL_SCAN: walk the primary key space
//! 2. INDEX_SCAN: one half-open range scan per interval, row id taken from
//!    the tail of each index key
//! 3. Merge nodes: intersect (AND) or union (OR) the child row-id sets
//!
//! Results are always sorted and free of duplicates.

mod executor;
mod result;

pub use executor::PlanExecutor;
pub use result::{QueryResult, ResultRow};
