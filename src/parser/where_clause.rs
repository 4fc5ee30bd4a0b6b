//! Public entry points for WHERE-clause parsing

use std::fmt;

use crate::errors::{HaloError, HaloResult};
use crate::predicate::PredicateTree;

use super::parser::ClauseParser;

/// A parsed WHERE clause
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WhereClause {
    tree: PredicateTree,
}

impl WhereClause {
    /// The clause of a statement without conditions; every row qualifies
    pub fn all() -> Self {
        Self::default()
    }

    /// Parses the whole text
    pub fn parse(text: &str) -> HaloResult<Self> {
        Self::parse_range(text, 0, text.len())
    }

    /// Parses `text[start..]`
    pub fn parse_from(text: &str, start: usize) -> HaloResult<Self> {
        Self::parse_range(text, start, text.len())
    }

    /// Parses the window `text[start..stop]`
    ///
    /// `stop` past the end of the text is clamped. A window that is inverted
    /// or does not fall on character boundaries is an `InvalidArgument`.
    pub fn parse_range(text: &str, start: usize, stop: usize) -> HaloResult<Self> {
        let stop = stop.min(text.len());
        if start > stop {
            return Err(HaloError::invalid_argument(format!(
                "Parse window start {} is after stop {}",
                start, stop
            )));
        }
        if !text.is_char_boundary(start) || !text.is_char_boundary(stop) {
            return Err(HaloError::invalid_argument(format!(
                "Parse window [{}, {}) splits a character",
                start, stop
            )));
        }

        let tree = ClauseParser::new(text, start, stop).parse()?;
        Ok(Self { tree })
    }

    pub fn tree(&self) -> &PredicateTree {
        &self.tree
    }

    pub fn into_tree(self) -> PredicateTree {
        self.tree
    }

    /// Returns true if no condition restricts the rows
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

impl From<PredicateTree> for WhereClause {
    fn from(tree: PredicateTree) -> Self {
        Self { tree }
    }
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WHERE {}", self.tree)
    }
}
