//! Byte-key intervals over one indexed column
//!
//! An [`Interval`] is half-open, `[start, stop)`. A missing start is
//! unbounded below and a missing stop is unbounded above. An
//! [`IntervalSet`] keeps its intervals sorted by start, pairwise disjoint and
//! never touching, so every set of keys has exactly one representation.

use std::cmp::Ordering;
use std::fmt;

use crate::errors::{HaloError, HaloResult};

/// Half-open key range `[start, stop)`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Interval {
    /// Inclusive lower key; `None` is unbounded
    pub start: Option<Vec<u8>>,
    /// Exclusive upper key; `None` is unbounded
    pub stop: Option<Vec<u8>>,
}

/// Orders starts with `None` as negative infinity
fn cmp_start(a: &Option<Vec<u8>>, b: &Option<Vec<u8>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(b),
    }
}

/// Orders stops with `None` as positive infinity
fn cmp_stop(a: &Option<Vec<u8>>, b: &Option<Vec<u8>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.cmp(b),
    }
}

/// True when a range ending at `stop` neither overlaps nor touches a range
/// beginning at `start`
fn ends_before(stop: &Option<Vec<u8>>, start: &Option<Vec<u8>>) -> bool {
    match (stop, start) {
        (Some(stop), Some(start)) => stop < start,
        _ => false,
    }
}

impl Interval {
    pub fn new(start: Option<Vec<u8>>, stop: Option<Vec<u8>>) -> Self {
        Self { start, stop }
    }

    /// `[start, +inf)`
    pub fn at_least(start: Vec<u8>) -> Self {
        Self::new(Some(start), None)
    }

    /// `(-inf, stop)`
    pub fn below(stop: Vec<u8>) -> Self {
        Self::new(None, Some(stop))
    }

    /// `[start, stop)`
    pub fn between(start: Vec<u8>, stop: Vec<u8>) -> Self {
        Self::new(Some(start), Some(stop))
    }

    /// `(-inf, +inf)`
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Returns true if no key falls inside
    pub fn is_empty(&self) -> bool {
        match (&self.start, &self.stop) {
            (Some(start), Some(stop)) => start >= stop,
            _ => false,
        }
    }

    /// Returns true if `key` falls inside
    pub fn contains(&self, key: &[u8]) -> bool {
        let above_start = self.start.as_deref().map_or(true, |start| key >= start);
        let below_stop = self.stop.as_deref().map_or(true, |stop| key < stop);
        above_start && below_stop
    }

    fn absorb(&mut self, other: Interval) {
        if cmp_start(&other.start, &self.start) == Ordering::Less {
            self.start = other.start;
        }
        if cmp_stop(&other.stop, &self.stop) == Ordering::Greater {
            self.stop = other.stop;
        }
    }
}

struct Hex<'a>(&'a [u8]);

impl fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.start {
            Some(start) => write!(f, "[{}", Hex(start))?,
            None => write!(f, "[-inf")?,
        }
        match &self.stop {
            Some(stop) => write!(f, ", {})", Hex(stop)),
            None => write!(f, ", +inf)"),
        }
    }
}

/// Sorted, disjoint, non-touching intervals over one column's index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalSet {
    column: usize,
    intervals: Vec<Interval>,
}

impl IntervalSet {
    /// Creates an empty set bound to `column`
    pub fn new(column: usize) -> Self {
        Self {
            column,
            intervals: Vec::new(),
        }
    }

    /// Creates a set holding the given intervals
    pub fn from_intervals(column: usize, intervals: impl IntoIterator<Item = Interval>) -> Self {
        let mut set = Self::new(column);
        for interval in intervals {
            set.insert(interval);
        }
        set
    }

    /// Index of the column whose key space these intervals cover
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    /// Returns true if some interval holds `key`
    pub fn contains(&self, key: &[u8]) -> bool {
        let idx = self
            .intervals
            .partition_point(|iv| iv.stop.as_deref().map_or(false, |stop| stop <= key));
        self.intervals
            .get(idx)
            .map_or(false, |iv| iv.contains(key))
    }

    /// Inserts an interval, coalescing every interval it overlaps or touches
    ///
    /// Empty intervals are dropped.
    pub fn insert(&mut self, interval: Interval) {
        if interval.is_empty() {
            return;
        }

        // Stops increase along the list, so "entirely left" is a prefix
        let first = self
            .intervals
            .partition_point(|iv| ends_before(&iv.stop, &interval.start));
        let mut last = first;
        while last < self.intervals.len() && !ends_before(&interval.stop, &self.intervals[last].start)
        {
            last += 1;
        }

        let mut merged = interval;
        for existing in self.intervals.drain(first..last) {
            merged.absorb(existing);
        }
        self.intervals.insert(first, merged);
    }

    fn check_column(&self, other: &IntervalSet) -> HaloResult<()> {
        if self.column != other.column {
            return Err(HaloError::IncompatibleColumns {
                left: self.column,
                right: other.column,
            });
        }
        Ok(())
    }

    /// Keys in either set
    pub fn union(&self, other: &IntervalSet) -> HaloResult<IntervalSet> {
        self.check_column(other)?;

        let mut out = Vec::with_capacity(self.len() + other.len());
        let mut left = self.intervals.iter().peekable();
        let mut right = other.intervals.iter().peekable();
        let mut current: Option<Interval> = None;

        loop {
            let next = match (left.peek(), right.peek()) {
                (None, None) => break,
                (Some(_), None) => left.next(),
                (None, Some(_)) => right.next(),
                (Some(a), Some(b)) => {
                    if cmp_start(&a.start, &b.start) != Ordering::Greater {
                        left.next()
                    } else {
                        right.next()
                    }
                }
            };
            let Some(next) = next else {
                break;
            };

            let extends = current
                .as_ref()
                .map_or(false, |run| !ends_before(&run.stop, &next.start));
            if extends {
                if let Some(run) = current.as_mut() {
                    if cmp_stop(&next.stop, &run.stop) == Ordering::Greater {
                        run.stop = next.stop.clone();
                    }
                }
            } else if let Some(done) = current.replace(next.clone()) {
                out.push(done);
            }
        }
        if let Some(done) = current {
            out.push(done);
        }

        Ok(IntervalSet {
            column: self.column,
            intervals: out,
        })
    }

    /// Keys in both sets
    pub fn intersect(&self, other: &IntervalSet) -> HaloResult<IntervalSet> {
        self.check_column(other)?;

        let mut out = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.intervals.len() && j < other.intervals.len() {
            let a = &self.intervals[i];
            let b = &other.intervals[j];

            let start = if cmp_start(&a.start, &b.start) == Ordering::Greater {
                a.start.clone()
            } else {
                b.start.clone()
            };
            let stop = if cmp_stop(&a.stop, &b.stop) == Ordering::Less {
                a.stop.clone()
            } else {
                b.stop.clone()
            };
            let piece = Interval::new(start, stop);
            if !piece.is_empty() {
                out.push(piece);
            }

            if cmp_stop(&a.stop, &b.stop) == Ordering::Less {
                i += 1;
            } else {
                j += 1;
            }
        }

        Ok(IntervalSet {
            column: self.column,
            intervals: out,
        })
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column #{}: ", self.column)?;
        if self.intervals.is_empty() {
            return write!(f, "{{}}");
        }
        for (i, interval) in self.intervals.iter().enumerate() {
            if i > 0 {
                write!(f, " U ")?;
            }
            write!(f, "{}", interval)?;
        }
        Ok(())
    }
}
