//! Query planner subsystem
//!
//! Converts predicate trees into scan plans over a table's key spaces.
//!
//! # Strategy
//!
//! - A predicate on an indexed column is a set of half-open key intervals
//!   over that column's index.
//! - AND/OR of two interval sets on the same column folds into one set.
//! - Otherwise each side is scanned on its own and the resulting row-id sets
//!   are intersected or unioned.
//! - A clause without conditions scans the primary key space.
//!
//! Planning is pure and deterministic: the same tree and schema always give
//! the same plan.

mod explain;
mod interval;
mod planner;
mod rowset;

pub use explain::ExplainPlan;
pub use interval::{Interval, IntervalSet};
pub use planner::{Planner, QueryPlan};
pub use rowset::RowIdSet;
