//! Tables over an ordered key-value store
//!
//! Layout:
//! - primary space: `row_id (8 bytes)` -> cells, one cell per stored column,
//!   keyed by the column qualifier
//! - index space of column `i`: `index_key(value, row_id)` -> no cells

use std::collections::HashSet;

use crate::codec::{index_key, RowId, MAX_ROW_ID};
use crate::errors::{HaloError, HaloResult};
use crate::executor::{PlanExecutor, QueryResult, ResultRow};
use crate::observability::{log_event, Event};
use crate::parser::WhereClause;
use crate::planner::{ExplainPlan, Planner, QueryPlan, RowIdSet};
use crate::schema::TableSchema;
use crate::storage::{Cells, KeySpace, KeyValueStore};

use super::allocator::find_upper_bound;

/// A table bound to a schema and a store
pub struct Table<S: KeyValueStore> {
    schema: TableSchema,
    store: S,
    next_row_id: u64,
}

impl<S: KeyValueStore> Table<S> {
    /// Opens a table, rediscovering the next free row id from the store
    pub fn open(schema: TableSchema, store: S) -> HaloResult<Self> {
        let next_row_id = find_upper_bound(|id| {
            let key = RowId::new(id);
            let mut at_or_after = store.scan(KeySpace::Primary, Some(&key.as_bytes()[..]), None)?;
            Ok(at_or_after.next().is_some())
        })?;

        let next = next_row_id.to_string();
        log_event(
            Event::TableOpened,
            &[("table", schema.name()), ("next_row_id", next.as_str())],
        );

        Ok(Self {
            schema,
            store,
            next_row_id,
        })
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Id the next insert will use
    pub fn next_row_id(&self) -> RowId {
        RowId::new(self.next_row_id)
    }

    /// Resolves labels to distinct column positions; empty means all columns
    fn resolve<L: AsRef<str>>(&self, labels: &[L]) -> HaloResult<Vec<usize>> {
        if labels.is_empty() {
            return Ok((0..self.schema.columns().len()).collect());
        }
        let columns = self.schema.resolve_columns(labels)?;
        let mut seen = HashSet::new();
        for &column in &columns {
            if !seen.insert(column) {
                return Err(HaloError::invalid_argument(format!(
                    "Column '{}' listed twice",
                    self.schema.columns()[column].label
                )));
            }
        }
        Ok(columns)
    }

    /// Encodes one literal per column, failing before anything is written
    fn encode_values<L, V>(&self, labels: &[L], literals: &[V]) -> HaloResult<Vec<(usize, Vec<u8>)>>
    where
        L: AsRef<str>,
        V: AsRef<[u8]>,
    {
        if labels.is_empty() {
            return Err(HaloError::invalid_argument("No columns given"));
        }
        if labels.len() != literals.len() {
            return Err(HaloError::invalid_argument(format!(
                "{} column(s) but {} value(s)",
                labels.len(),
                literals.len()
            )));
        }

        let columns = self.resolve(labels)?;
        columns
            .into_iter()
            .zip(literals)
            .map(|(column, literal)| {
                let data_type = self.schema.columns()[column].data_type;
                Ok((column, data_type.encode(literal.as_ref())?))
            })
            .collect()
    }

    fn qualifier(&self, column: usize) -> HaloResult<Vec<u8>> {
        self.schema
            .specifiers()
            .qualifier(column)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| {
                HaloError::invalid_argument(format!("Column #{} has no qualifier", column))
            })
    }

    fn index_entry(&self, column: usize, encoded: &[u8], row_id: RowId) -> HaloResult<Option<Vec<u8>>> {
        let property = &self.schema.columns()[column];
        if !property.indexed {
            return Ok(None);
        }
        index_key(&property.data_type, encoded, row_id).map(Some)
    }

    /// Inserts a row and returns its id
    ///
    /// Columns not listed hold no cell.
    pub fn insert<L, V>(&mut self, labels: &[L], literals: &[V]) -> HaloResult<RowId>
    where
        L: AsRef<str>,
        V: AsRef<[u8]>,
    {
        let values = self.encode_values(labels, literals)?;
        if self.next_row_id > MAX_ROW_ID {
            return Err(HaloError::Storage("Row id space exhausted".into()));
        }
        let row_id = RowId::new(self.next_row_id);

        let mut cells = Cells::new();
        let mut index_keys = Vec::new();
        for (column, encoded) in &values {
            if let Some(key) = self.index_entry(*column, encoded, row_id)? {
                index_keys.push((*column, key));
            }
            cells.insert(self.qualifier(*column)?, encoded.clone());
        }

        if self.store.exists(KeySpace::Primary, row_id.as_bytes())? {
            return Err(HaloError::Storage(format!("Row {} already exists", row_id)));
        }
        self.store
            .put(KeySpace::Primary, row_id.as_bytes().to_vec(), cells)?;
        for (column, key) in index_keys {
            self.store.put(KeySpace::Index(column), key, Cells::new())?;
        }
        self.next_row_id += 1;

        let id = row_id.to_string();
        log_event(
            Event::RowInserted,
            &[("table", self.schema.name()), ("row_id", id.as_str())],
        );
        Ok(row_id)
    }

    /// Decoded values of the requested columns for each row; ids without a
    /// stored row are skipped
    pub fn select<L: AsRef<str>>(&self, labels: &[L], rows: &RowIdSet) -> HaloResult<QueryResult> {
        let columns = self.resolve(labels)?;
        let mut result = QueryResult::new(
            columns
                .iter()
                .map(|&c| self.schema.columns()[c].label.clone())
                .collect(),
        );

        let mut ids = rows.clone();
        ids.sort();
        for &row_id in &ids {
            let Some(cells) = self.store.get(KeySpace::Primary, row_id.as_bytes())? else {
                continue;
            };
            let mut values = Vec::with_capacity(columns.len());
            for &column in &columns {
                let value = match cells.get(&self.qualifier(column)?) {
                    Some(encoded) => Some(self.schema.columns()[column].data_type.decode(encoded)?),
                    None => None,
                };
                values.push(value);
            }
            result.rows.push(ResultRow::new(row_id, values));
        }
        Ok(result)
    }

    /// Overwrites the given columns of each row; returns rows changed
    ///
    /// Index entries for replaced values are removed.
    pub fn update<L, V>(&mut self, labels: &[L], literals: &[V], rows: &RowIdSet) -> HaloResult<usize>
    where
        L: AsRef<str>,
        V: AsRef<[u8]>,
    {
        let values = self.encode_values(labels, literals)?;

        let mut ids = rows.clone();
        ids.sort();
        let mut affected = 0;
        for &row_id in &ids {
            let Some(mut cells) = self.store.get(KeySpace::Primary, row_id.as_bytes())? else {
                continue;
            };

            for (column, encoded) in &values {
                let qualifier = self.qualifier(*column)?;
                if let Some(old) = cells.get(&qualifier) {
                    if let Some(stale) = self.index_entry(*column, old, row_id)? {
                        self.store.delete(KeySpace::Index(*column), &stale)?;
                    }
                }
                if let Some(key) = self.index_entry(*column, encoded, row_id)? {
                    self.store.put(KeySpace::Index(*column), key, Cells::new())?;
                }
                cells.insert(qualifier, encoded.clone());
            }

            self.store
                .put(KeySpace::Primary, row_id.as_bytes().to_vec(), cells)?;
            affected += 1;
        }

        let count = affected.to_string();
        log_event(
            Event::RowsUpdated,
            &[("table", self.schema.name()), ("rows", count.as_str())],
        );
        Ok(affected)
    }

    /// Removes each row and its index entries; returns rows removed
    pub fn delete(&mut self, rows: &RowIdSet) -> HaloResult<usize> {
        let mut ids = rows.clone();
        ids.sort();
        let mut affected = 0;
        for &row_id in &ids {
            let Some(cells) = self.store.get(KeySpace::Primary, row_id.as_bytes())? else {
                continue;
            };

            for (qualifier, encoded) in &cells {
                let Some(column) = self.schema.specifiers().column_of(qualifier) else {
                    continue;
                };
                if let Some(key) = self.index_entry(column, encoded, row_id)? {
                    self.store.delete(KeySpace::Index(column), &key)?;
                }
            }
            if self.store.delete(KeySpace::Primary, row_id.as_bytes())? {
                affected += 1;
            }
        }

        let count = affected.to_string();
        log_event(
            Event::RowsDeleted,
            &[("table", self.schema.name()), ("rows", count.as_str())],
        );
        Ok(affected)
    }

    /// Plans a parsed clause
    pub fn plan(&self, clause: &WhereClause) -> HaloResult<QueryPlan> {
        let plan = Planner::new(&self.schema).plan(clause.tree())?;
        let scans = plan.scan_count().to_string();
        log_event(
            Event::QueryPlanned,
            &[
                ("scans", scans.as_str()),
                ("strategy", plan.strategy()),
                ("table", self.schema.name()),
            ],
        );
        Ok(plan)
    }

    /// Row ids matching a parsed clause
    pub fn find_clause(&self, clause: &WhereClause) -> HaloResult<RowIdSet> {
        let plan = self.plan(clause)?;
        let rows = PlanExecutor::new(&self.store).execute(&plan)?;
        let count = rows.len().to_string();
        log_event(
            Event::RowsResolved,
            &[("rows", count.as_str()), ("table", self.schema.name())],
        );
        Ok(rows)
    }

    /// Parses, plans and executes a WHERE clause
    pub fn find(&self, text: &str) -> HaloResult<RowIdSet> {
        let outcome = WhereClause::parse(text).and_then(|clause| {
            let condition = clause.tree().structure();
            log_event(
                Event::ClauseParsed,
                &[("condition", condition.as_str()), ("table", self.schema.name())],
            );
            self.find_clause(&clause)
        });
        if let Err(err) = &outcome {
            self.log_rejection(err);
        }
        outcome
    }

    /// Explain output for a WHERE clause; parse and planning errors become a
    /// rejected explain
    pub fn explain(&self, text: &str) -> ExplainPlan {
        let planned = WhereClause::parse(text)
            .and_then(|clause| self.plan(&clause).map(|plan| (clause, plan)));
        match planned {
            Ok((clause, plan)) => ExplainPlan::from_plan(self.schema.name(), clause.tree(), &plan),
            Err(err) => {
                self.log_rejection(&err);
                ExplainPlan::from_error(self.schema.name(), &err)
            }
        }
    }

    fn log_rejection(&self, err: &HaloError) {
        let reason = err.to_string();
        log_event(
            Event::ClauseRejected,
            &[
                ("code", err.code().code()),
                ("reason", reason.as_str()),
                ("table", self.schema.name()),
            ],
        );
    }
}
