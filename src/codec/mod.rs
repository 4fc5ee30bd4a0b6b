//! Value codec subsystem
//!
//! Turns literal text into ordering-preserving bytes, and builds the compound
//! index keys and row identifiers the planner scans over.
//!
//! # Ordering
//!
//! For every indexable type, comparing two encodings with unsigned
//! byte-lexicographic order gives the same answer as comparing the values.

mod datatype;
mod index_key;
mod row_id;

pub use datatype::{DataType, DATETIME_FORMAT};
pub use index_key::{index_key, index_prefix, lower_bound, row_id_from_index_key, upper_bound};
pub use row_id::{
    RowId, FIRST_ROW_ID, LOWER_SENTINEL, MAX_ROW_ID, ROW_ID_LENGTH, UPPER_SENTINEL,
};
