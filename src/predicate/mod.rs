//! Predicate model
//!
//! Pure data: single-column predicates, BETWEEN payloads and the binary
//! AND/OR tree the parser builds. Parsing lives in `parser`, planning in
//! `planner`.

mod between;
mod predicate;
mod tree;

pub use between::BetweenArguments;
pub use predicate::{Operator, Predicate};
pub use tree::{Connector, PredicateTree};
