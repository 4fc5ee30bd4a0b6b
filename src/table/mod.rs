//! Table operations
//!
//! Insert, select, update and delete rows, and resolve WHERE clauses into
//! row-id sets through the planner and executor.

mod allocator;
mod table;

pub use allocator::find_upper_bound;
pub use table::Table;
