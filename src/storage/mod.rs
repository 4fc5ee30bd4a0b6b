//! Ordered key-value storage
//!
//! The query layer talks to storage only through [`KeyValueStore`]. Keys
//! compare as unsigned byte strings in every key space.
//!
//! [`MemoryStore`] is the in-process implementation used by the CLI and the
//! tests.

mod memory;
mod store;

pub use memory::MemoryStore;
pub use store::{Cells, KeyScan, KeySpace, KeyValueStore};
