//! Column qualifiers of the wide-column row layout
//!
//! A stored row is a map from qualifier to encoded value. The qualifier of
//! column `i` is the decimal text of `i`. The table is computed once per
//! schema and shared read-only between queries.

/// Column index to qualifier bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpecifiers {
    qualifiers: Vec<Vec<u8>>,
}

impl ColumnSpecifiers {
    pub fn new(columns: usize) -> Self {
        Self {
            qualifiers: (0..columns).map(|i| i.to_string().into_bytes()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.qualifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qualifiers.is_empty()
    }

    /// Qualifier of `column`
    pub fn qualifier(&self, column: usize) -> Option<&[u8]> {
        self.qualifiers.get(column).map(Vec::as_slice)
    }

    /// Column whose qualifier is `qualifier`
    pub fn column_of(&self, qualifier: &[u8]) -> Option<usize> {
        self.qualifiers.iter().position(|q| q == qualifier)
    }
}
