//! Predicate trees
//!
//! A strict binary tree: leaves hold one predicate, internal nodes hold a
//! connector and exactly two children. `Empty` is the tree of a statement
//! with no conditions, where every row qualifies. Trees are built once by the
//! parser and never mutated; planning results live outside the tree.

use std::fmt;

use super::predicate::Predicate;

/// Boolean connector of an internal node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parsed WHERE-clause condition
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PredicateTree {
    /// No condition; all rows qualify
    #[default]
    Empty,
    /// A single predicate
    Leaf(Predicate),
    /// Two subtrees joined by a connector
    Node {
        connector: Connector,
        left: Box<PredicateTree>,
        right: Box<PredicateTree>,
    },
}

impl PredicateTree {
    /// Create a leaf
    pub fn leaf(predicate: Predicate) -> Self {
        PredicateTree::Leaf(predicate)
    }

    /// Create an internal node owning both children
    pub fn node(left: PredicateTree, connector: Connector, right: PredicateTree) -> Self {
        PredicateTree::Node {
            connector,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create `left AND right`
    pub fn and(left: PredicateTree, right: PredicateTree) -> Self {
        Self::node(left, Connector::And, right)
    }

    /// Create `left OR right`
    pub fn or(left: PredicateTree, right: PredicateTree) -> Self {
        Self::node(left, Connector::Or, right)
    }

    /// Returns true for the tree with no conditions
    pub fn is_empty(&self) -> bool {
        matches!(self, PredicateTree::Empty)
    }

    /// Returns true if this node holds a predicate
    pub fn is_leaf(&self) -> bool {
        matches!(self, PredicateTree::Leaf(_))
    }

    /// Predicate of a leaf
    pub fn predicate(&self) -> Option<&Predicate> {
        match self {
            PredicateTree::Leaf(p) => Some(p),
            _ => None,
        }
    }

    /// Connector of an internal node
    pub fn connector(&self) -> Option<Connector> {
        match self {
            PredicateTree::Node { connector, .. } => Some(*connector),
            _ => None,
        }
    }

    /// Left child of an internal node
    pub fn left(&self) -> Option<&PredicateTree> {
        match self {
            PredicateTree::Node { left, .. } => Some(left),
            _ => None,
        }
    }

    /// Right child of an internal node
    pub fn right(&self) -> Option<&PredicateTree> {
        match self {
            PredicateTree::Node { right, .. } => Some(right),
            _ => None,
        }
    }

    /// Predicates in left-to-right order
    pub fn predicates(&self) -> Vec<&Predicate> {
        let mut out = Vec::new();
        self.collect_predicates(&mut out);
        out
    }

    fn collect_predicates<'a>(&'a self, out: &mut Vec<&'a Predicate>) {
        match self {
            PredicateTree::Empty => {}
            PredicateTree::Leaf(p) => out.push(p),
            PredicateTree::Node { left, right, .. } => {
                left.collect_predicates(out);
                right.collect_predicates(out);
            }
        }
    }

    /// Number of leaves
    pub fn leaf_count(&self) -> usize {
        match self {
            PredicateTree::Empty => 0,
            PredicateTree::Leaf(_) => 1,
            PredicateTree::Node { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Height of the tree; a single leaf has depth 1
    pub fn depth(&self) -> usize {
        match self {
            PredicateTree::Empty => 0,
            PredicateTree::Leaf(_) => 1,
            PredicateTree::Node { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// In-order structural print using column names, e.g. `(a OR (b AND c))`
    pub fn structure(&self) -> String {
        match self {
            PredicateTree::Empty => String::new(),
            PredicateTree::Leaf(p) => p.column.clone(),
            PredicateTree::Node {
                connector,
                left,
                right,
            } => format!("({} {} {})", left.structure(), connector, right.structure()),
        }
    }
}

impl fmt::Display for PredicateTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateTree::Empty => write!(f, "TRUE"),
            PredicateTree::Leaf(p) => write!(f, "{}", p),
            PredicateTree::Node {
                connector,
                left,
                right,
            } => write!(f, "({} {} {})", left, connector, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Operator;

    fn leaf(column: &str) -> PredicateTree {
        PredicateTree::leaf(Predicate::new(column, Operator::Equal, "1"))
    }

    #[test]
    fn test_empty_tree() {
        let tree = PredicateTree::default();
        assert!(tree.is_empty());
        assert!(!tree.is_leaf());
        assert_eq!(tree.leaf_count(), 0);
        assert_eq!(tree.to_string(), "TRUE");
    }

    #[test]
    fn test_accessors() {
        let tree = PredicateTree::or(leaf("a"), PredicateTree::and(leaf("b"), leaf("c")));
        assert_eq!(tree.connector(), Some(Connector::Or));
        assert!(tree.predicate().is_none());
        assert!(tree.left().unwrap().is_leaf());
        assert_eq!(tree.right().unwrap().connector(), Some(Connector::And));
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 3);

        let columns: Vec<&str> = tree.predicates().iter().map(|p| p.column.as_str()).collect();
        assert_eq!(columns, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_structure() {
        let tree = PredicateTree::or(PredicateTree::and(leaf("a"), leaf("b")), leaf("c"));
        assert_eq!(tree.structure(), "((a AND b) OR c)");
    }

    #[test]
    fn test_display() {
        let tree = PredicateTree::and(leaf("a"), leaf("b"));
        assert_eq!(tree.to_string(), "(a = \"1\" AND b = \"1\")");
    }
}
