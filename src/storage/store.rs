//! Storage collaborator interface
//!
//! The query layer only needs ordered key scans and exact-key access over a
//! handful of key spaces. Rows are wide-column: a key maps to a set of cells
//! keyed by column qualifier.

use std::collections::BTreeMap;
use std::fmt;

use crate::errors::HaloResult;

/// Cells of one stored row, qualifier to encoded value
pub type Cells = BTreeMap<Vec<u8>, Vec<u8>>;

/// Keys produced by a scan, ascending by unsigned byte order
///
/// One-shot; a scan can't be restarted.
pub type KeyScan<'a> = Box<dyn Iterator<Item = Vec<u8>> + 'a>;

/// Identifies one ordered key space of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeySpace {
    /// Full rows keyed by row id
    Primary,
    /// Secondary index of the column at this position
    Index(usize),
}

impl fmt::Display for KeySpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySpace::Primary => write!(f, "primary"),
            KeySpace::Index(column) => write!(f, "index#{}", column),
        }
    }
}

/// Ordered key-value store the planner and tables run against
pub trait KeyValueStore {
    /// Keys in `[start, stop)`; a missing bound is unbounded
    fn scan(
        &self,
        space: KeySpace,
        start: Option<&[u8]>,
        stop: Option<&[u8]>,
    ) -> HaloResult<KeyScan<'_>>;

    /// Returns true if `key` is stored
    fn exists(&self, space: KeySpace, key: &[u8]) -> HaloResult<bool>;

    /// Cells stored under `key`
    fn get(&self, space: KeySpace, key: &[u8]) -> HaloResult<Option<Cells>>;

    /// Stores `cells` under `key`, replacing any previous value
    fn put(&mut self, space: KeySpace, key: Vec<u8>, cells: Cells) -> HaloResult<()>;

    /// Removes `key`; returns true if it was present
    fn delete(&mut self, space: KeySpace, key: &[u8]) -> HaloResult<bool>;
}
