//! Plan execution
//!
//! Issues the scans a [`QueryPlan`] calls for and merges their row ids.
//! Scans of one interval set run in interval order; merge nodes evaluate the
//! left subplan first.

use crate::codec::{row_id_from_index_key, RowId};
use crate::errors::HaloResult;
use crate::observability::{log_event, Event, Logger, Severity};
use crate::planner::{IntervalSet, QueryPlan, RowIdSet};
use crate::predicate::Connector;
use crate::storage::{KeySpace, KeyValueStore};

/// Executes plans against a store
pub struct PlanExecutor<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> PlanExecutor<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Resolves a plan into the sorted set of matching row ids
    pub fn execute(&self, plan: &QueryPlan) -> HaloResult<RowIdSet> {
        let mut rows = match plan {
            QueryPlan::FullScan => self.scan_primary()?,
            QueryPlan::IndexScan(set) => self.scan_intervals(set)?,
            QueryPlan::Merge {
                connector,
                left,
                right,
            } => {
                let left = self.execute(left)?;
                let right = self.execute(right)?;
                match connector {
                    Connector::And => left.intersect(&right),
                    Connector::Or => left.union(&right),
                }
            }
        };
        rows.sort();
        Ok(rows)
    }

    fn scan_primary(&self) -> HaloResult<RowIdSet> {
        log_event(Event::PrimaryScan, &[("space", "primary")]);

        let mut rows = RowIdSet::new();
        for key in self.store.scan(KeySpace::Primary, None, None)? {
            rows.add(RowId::from_slice(&key)?);
        }
        Ok(rows)
    }

    fn scan_intervals(&self, set: &IntervalSet) -> HaloResult<RowIdSet> {
        let space = KeySpace::Index(set.column());
        let space_name = space.to_string();

        let mut rows = RowIdSet::new();
        for interval in set {
            if Logger::enabled(Severity::Trace) {
                let range = interval.to_string();
                log_event(
                    Event::IndexScan,
                    &[("space", space_name.as_str()), ("interval", range.as_str())],
                );
            }
            let keys = self
                .store
                .scan(space, interval.start.as_deref(), interval.stop.as_deref())?;
            for key in keys {
                rows.add(row_id_from_index_key(&key)?);
            }
        }
        Ok(rows)
    }
}
