//! Sorted row-identifier sets
//!
//! Scan results are appended unsorted and sorted lazily, right before a
//! merge needs ordered input. Sorting also collapses duplicates.

use std::borrow::Cow;

use crate::codec::RowId;

/// Row identifiers produced by one or more scans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIdSet {
    ids: Vec<RowId>,
    sorted: bool,
}

impl Default for RowIdSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RowIdSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            sorted: true,
        }
    }

    /// Appends an identifier and marks the set unsorted
    pub fn add(&mut self, id: RowId) {
        if self.sorted {
            if let Some(last) = self.ids.last() {
                if *last >= id {
                    self.sorted = false;
                }
            }
        }
        self.ids.push(id);
    }

    /// Sorts by unsigned byte order and drops duplicates
    pub fn sort(&mut self) {
        if !self.sorted {
            self.ids.sort_unstable();
            self.ids.dedup();
            self.sorted = true;
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Number of entries; may count duplicates until the set is sorted
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Entries in storage order, ascending once sorted
    pub fn iter(&self) -> std::slice::Iter<'_, RowId> {
        self.ids.iter()
    }

    pub fn first(&self) -> Option<RowId> {
        self.ids.first().copied()
    }

    pub fn last(&self) -> Option<RowId> {
        self.ids.last().copied()
    }

    pub fn contains(&self, id: &RowId) -> bool {
        if self.sorted {
            self.ids.binary_search(id).is_ok()
        } else {
            self.ids.contains(id)
        }
    }

    /// Identifiers as plain integers
    pub fn to_u64s(&self) -> Vec<u64> {
        self.ids.iter().map(RowId::as_u64).collect()
    }

    fn sorted_ids(&self) -> Cow<'_, [RowId]> {
        if self.sorted {
            Cow::Borrowed(&self.ids)
        } else {
            let mut ids = self.ids.clone();
            ids.sort_unstable();
            ids.dedup();
            Cow::Owned(ids)
        }
    }

    /// Identifiers in either set; inputs are left unchanged
    pub fn union(&self, other: &RowIdSet) -> RowIdSet {
        let a = self.sorted_ids();
        let b = other.sorted_ids();

        let mut ids = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => {
                    ids.push(a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    ids.push(b[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    ids.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        ids.extend_from_slice(&a[i..]);
        ids.extend_from_slice(&b[j..]);

        RowIdSet { ids, sorted: true }
    }

    /// Identifiers in both sets; inputs are left unchanged
    pub fn intersect(&self, other: &RowIdSet) -> RowIdSet {
        let a = self.sorted_ids();
        let b = other.sorted_ids();

        let mut ids = Vec::with_capacity(a.len().min(b.len()));
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    ids.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }

        RowIdSet { ids, sorted: true }
    }
}

impl FromIterator<RowId> for RowIdSet {
    fn from_iter<T: IntoIterator<Item = RowId>>(iter: T) -> Self {
        let mut set = RowIdSet::new();
        for id in iter {
            set.add(id);
        }
        set
    }
}

impl Extend<RowId> for RowIdSet {
    fn extend<T: IntoIterator<Item = RowId>>(&mut self, iter: T) {
        for id in iter {
            self.add(id);
        }
    }
}

impl<'a> IntoIterator for &'a RowIdSet {
    type Item = &'a RowId;
    type IntoIter = std::slice::Iter<'a, RowId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
