//! Table and column definitions
//!
//! A schema is validated once when it is built and never changes afterwards;
//! planner, encoder and table calls share it by reference.

use std::collections::HashSet;

use crate::codec::DataType;
use crate::errors::{HaloError, HaloResult};
use crate::storage::KeySpace;

use super::specifiers::ColumnSpecifiers;

/// One column of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnProperty {
    /// Name used in WHERE clauses
    pub label: String,
    /// Logical type and encoding
    pub data_type: DataType,
    /// Whether a secondary index is maintained
    pub indexed: bool,
}

impl ColumnProperty {
    pub fn new(label: impl Into<String>, data_type: DataType, indexed: bool) -> Self {
        Self {
            label: label.into(),
            data_type,
            indexed,
        }
    }

    /// Create an indexed column
    pub fn indexed(label: impl Into<String>, data_type: DataType) -> Self {
        Self::new(label, data_type, true)
    }

    /// Create a column without an index
    pub fn plain(label: impl Into<String>, data_type: DataType) -> Self {
        Self::new(label, data_type, false)
    }
}

/// Validated table definition
#[derive(Debug, Clone)]
pub struct TableSchema {
    name: String,
    columns: Vec<ColumnProperty>,
    specifiers: ColumnSpecifiers,
}

fn is_identifier(label: &str) -> bool {
    !label.is_empty()
        && label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

impl TableSchema {
    /// Validates and builds a schema
    ///
    /// Labels must be non-empty runs of letters, digits and underscores, and
    /// unique within the table.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnProperty>) -> HaloResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(HaloError::Schema("Table name must not be empty".into()));
        }
        if columns.is_empty() {
            return Err(HaloError::Schema(format!(
                "Table '{}' must have at least one column",
                name
            )));
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !is_identifier(&column.label) {
                return Err(HaloError::Schema(format!(
                    "Bad column label '{}' in table '{}'",
                    column.label, name
                )));
            }
            if !seen.insert(column.label.as_str()) {
                return Err(HaloError::Schema(format!(
                    "Duplicate column '{}' in table '{}'",
                    column.label, name
                )));
            }
        }

        let specifiers = ColumnSpecifiers::new(columns.len());
        Ok(Self {
            name,
            columns,
            specifiers,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnProperty] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&ColumnProperty> {
        self.columns.get(index)
    }

    pub fn specifiers(&self) -> &ColumnSpecifiers {
        &self.specifiers
    }

    /// Position of the column with this label
    pub fn find_column(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.label == label)
    }

    /// Like [`find_column`](Self::find_column), failing with `ColumnNotFound`
    pub fn resolve_column(&self, label: &str) -> HaloResult<usize> {
        self.find_column(label)
            .ok_or_else(|| HaloError::ColumnNotFound {
                column: label.to_string(),
                table: self.name.clone(),
            })
    }

    /// Resolves a list of labels, preserving order
    pub fn resolve_columns<S: AsRef<str>>(&self, labels: &[S]) -> HaloResult<Vec<usize>> {
        labels
            .iter()
            .map(|label| self.resolve_column(label.as_ref()))
            .collect()
    }

    /// Positions of all indexed columns
    pub fn indexed_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.indexed)
            .map(|(i, _)| i)
            .collect()
    }

    /// Key space holding full rows
    pub fn primary_space(&self) -> KeySpace {
        KeySpace::Primary
    }

    /// Key space of a column's secondary index
    pub fn index_space(&self, column: usize) -> HaloResult<KeySpace> {
        let property = self.columns.get(column).ok_or_else(|| {
            HaloError::invalid_argument(format!(
                "Column #{} is out of range for table '{}'",
                column, self.name
            ))
        })?;
        if !property.indexed {
            return Err(HaloError::ColumnNotIndexed(property.label.clone()));
        }
        Ok(KeySpace::Index(column))
    }
}
