//! Query planner
//!
//! Walks a predicate tree bottom-up. Leaves on indexed columns become
//! interval sets; siblings over the same column fold into one interval set
//! (`OR` is union, `AND` is intersection). Anything else keeps both subplans
//! and merges their row-id sets at execution time.
//!
//! Planning does no I/O, so a rejected query never touches storage.

use std::fmt;

use crate::codec::{lower_bound, upper_bound};
use crate::errors::{HaloError, HaloResult};
use crate::predicate::{Connector, Operator, Predicate, PredicateTree};
use crate::schema::TableSchema;

use super::interval::{Interval, IntervalSet};

/// Immutable query plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    /// No condition: every primary row qualifies
    FullScan,
    /// One range scan per interval over a column's index
    IndexScan(IntervalSet),
    /// Row-id sets of two subplans combined by the connector
    Merge {
        connector: Connector,
        left: Box<QueryPlan>,
        right: Box<QueryPlan>,
    },
}

impl QueryPlan {
    /// Number of storage scans execution will issue
    pub fn scan_count(&self) -> usize {
        match self {
            QueryPlan::FullScan => 1,
            QueryPlan::IndexScan(set) => set.len(),
            QueryPlan::Merge { left, right, .. } => left.scan_count() + right.scan_count(),
        }
    }

    /// Short strategy name of the root
    pub fn strategy(&self) -> &'static str {
        match self {
            QueryPlan::FullScan => "FULL_SCAN",
            QueryPlan::IndexScan(_) => "INDEX_SCAN",
            QueryPlan::Merge { .. } => "ROW_ID_MERGE",
        }
    }

    /// Indented description of the plan tree, one node per line
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.describe_into(0, &mut lines);
        lines
    }

    fn describe_into(&self, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        match self {
            QueryPlan::FullScan => lines.push(format!("{}FULL_SCAN primary", indent)),
            QueryPlan::IndexScan(set) => {
                lines.push(format!(
                    "{}INDEX_SCAN column #{} ({} interval(s))",
                    indent,
                    set.column(),
                    set.len()
                ));
                for interval in set {
                    lines.push(format!("{}  {}", indent, interval));
                }
            }
            QueryPlan::Merge {
                connector,
                left,
                right,
            } => {
                let op = match connector {
                    Connector::And => "INTERSECT",
                    Connector::Or => "UNION",
                };
                lines.push(format!("{}{}", indent, op));
                left.describe_into(depth + 1, lines);
                right.describe_into(depth + 1, lines);
            }
        }
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.describe() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Plans predicate trees against one table
pub struct Planner<'a> {
    schema: &'a TableSchema,
}

impl<'a> Planner<'a> {
    pub fn new(schema: &'a TableSchema) -> Self {
        Self { schema }
    }

    /// Plans a tree, or rejects it before any scan could be issued
    pub fn plan(&self, tree: &PredicateTree) -> HaloResult<QueryPlan> {
        match tree {
            PredicateTree::Empty => Ok(QueryPlan::FullScan),
            PredicateTree::Leaf(predicate) => {
                Ok(QueryPlan::IndexScan(self.intervals_for(predicate)?))
            }
            PredicateTree::Node {
                connector,
                left,
                right,
            } => {
                let left = self.plan(left)?;
                let right = self.plan(right)?;
                Self::combine(*connector, left, right)
            }
        }
    }

    fn combine(connector: Connector, left: QueryPlan, right: QueryPlan) -> HaloResult<QueryPlan> {
        match (left, right) {
            (QueryPlan::IndexScan(a), QueryPlan::IndexScan(b)) if a.column() == b.column() => {
                let merged = match connector {
                    Connector::Or => a.union(&b)?,
                    Connector::And => a.intersect(&b)?,
                };
                Ok(QueryPlan::IndexScan(merged))
            }
            (left, right) => Ok(QueryPlan::Merge {
                connector,
                left: Box::new(left),
                right: Box::new(right),
            }),
        }
    }

    /// Interval set covering the index keys that satisfy one predicate
    pub fn intervals_for(&self, predicate: &Predicate) -> HaloResult<IntervalSet> {
        let column = self.schema.resolve_column(&predicate.column)?;
        let property = self.schema.column(column).ok_or_else(|| HaloError::ColumnNotFound {
            column: predicate.column.clone(),
            table: self.schema.name().to_string(),
        })?;
        if !property.indexed {
            return Err(HaloError::ColumnNotIndexed(property.label.clone()));
        }
        let data_type = &property.data_type;

        let mut set = IntervalSet::new(column);
        let value = || data_type.encode(&predicate.argument);
        match predicate.operator {
            Operator::Less => set.insert(Interval::below(lower_bound(data_type, &value()?)?)),
            Operator::LessOrEqual => {
                set.insert(Interval::below(upper_bound(data_type, &value()?)?))
            }
            Operator::Equal => {
                let value = value()?;
                set.insert(Interval::between(
                    lower_bound(data_type, &value)?,
                    upper_bound(data_type, &value)?,
                ))
            }
            Operator::NotEqual => {
                let value = value()?;
                set.insert(Interval::below(lower_bound(data_type, &value)?));
                set.insert(Interval::at_least(upper_bound(data_type, &value)?));
            }
            Operator::GreaterOrEqual => {
                set.insert(Interval::at_least(lower_bound(data_type, &value()?)?))
            }
            Operator::Greater => {
                set.insert(Interval::at_least(upper_bound(data_type, &value()?)?))
            }
            Operator::Between => {
                let args = predicate.between_arguments()?;
                let start = data_type.encode(&args.start)?;
                let stop = data_type.encode(&args.stop)?;
                set.insert(Interval::between(
                    lower_bound(data_type, &start)?,
                    upper_bound(data_type, &stop)?,
                ));
            }
        }
        Ok(set)
    }
}
