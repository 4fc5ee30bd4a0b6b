//! Result types for row selection

use serde::Serialize;

use crate::codec::RowId;

/// One selected row, values decoded back to literal text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    /// Row identifier
    pub row_id: RowId,
    /// Literal values in the order the columns were requested; `None` for
    /// cells the row does not hold
    pub values: Vec<Option<String>>,
}

impl ResultRow {
    pub fn new(row_id: RowId, values: Vec<Option<String>>) -> Self {
        Self { row_id, values }
    }

    /// Value of the `i`-th requested column
    pub fn value(&self, i: usize) -> Option<&str> {
        self.values.get(i).and_then(|v| v.as_deref())
    }
}

/// Rows returned by a select
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// Labels of the requested columns
    pub columns: Vec<String>,
    /// Rows in ascending row-id order
    pub rows: Vec<ResultRow>,
}

impl QueryResult {
    /// Creates an empty result over the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultRow> {
        self.rows.iter()
    }

    /// Values of one requested column across all rows
    pub fn column_values(&self, label: &str) -> Option<Vec<Option<&str>>> {
        let i = self.columns.iter().position(|c| c == label)?;
        Some(self.rows.iter().map(|r| r.value(i)).collect())
    }
}
