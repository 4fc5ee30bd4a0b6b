//! BTreeMap-backed store
//!
//! Each key space is a `BTreeMap<Vec<u8>, Cells>`, so range scans come back
//! in unsigned byte order without extra sorting.

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::errors::HaloResult;

use super::store::{Cells, KeyScan, KeySpace, KeyValueStore};

/// In-memory ordered store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    spaces: BTreeMap<KeySpace, BTreeMap<Vec<u8>, Cells>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            spaces: BTreeMap::new(),
        }
    }

    /// Number of keys in a space
    pub fn key_count(&self, space: KeySpace) -> usize {
        self.spaces.get(&space).map_or(0, BTreeMap::len)
    }

    /// Drop every key of every space
    pub fn clear(&mut self) {
        self.spaces.clear();
    }
}

impl KeyValueStore for MemoryStore {
    fn scan(
        &self,
        space: KeySpace,
        start: Option<&[u8]>,
        stop: Option<&[u8]>,
    ) -> HaloResult<KeyScan<'_>> {
        let Some(tree) = self.spaces.get(&space) else {
            return Ok(Box::new(std::iter::empty()));
        };

        // BTreeMap::range panics on inverted bounds
        if let (Some(start), Some(stop)) = (start, stop) {
            if start >= stop {
                return Ok(Box::new(std::iter::empty()));
            }
        }

        let lower: Bound<&[u8]> = match start {
            Some(k) => Bound::Included(k),
            None => Bound::Unbounded,
        };
        let upper: Bound<&[u8]> = match stop {
            Some(k) => Bound::Excluded(k),
            None => Bound::Unbounded,
        };

        Ok(Box::new(
            tree.range::<[u8], _>((lower, upper)).map(|(k, _)| k.clone()),
        ))
    }

    fn exists(&self, space: KeySpace, key: &[u8]) -> HaloResult<bool> {
        Ok(self
            .spaces
            .get(&space)
            .map_or(false, |tree| tree.contains_key(key)))
    }

    fn get(&self, space: KeySpace, key: &[u8]) -> HaloResult<Option<Cells>> {
        Ok(self
            .spaces
            .get(&space)
            .and_then(|tree| tree.get(key))
            .cloned())
    }

    fn put(&mut self, space: KeySpace, key: Vec<u8>, cells: Cells) -> HaloResult<()> {
        self.spaces.entry(space).or_default().insert(key, cells);
        Ok(())
    }

    fn delete(&mut self, space: KeySpace, key: &[u8]) -> HaloResult<bool> {
        let Some(tree) = self.spaces.get_mut(&space) else {
            return Ok(false);
        };
        let removed = tree.remove(key).is_some();
        if tree.is_empty() {
            self.spaces.remove(&space);
        }
        Ok(removed)
    }
}
