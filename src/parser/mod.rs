//! WHERE-clause parser
//!
//! Turns `WHERE <expr> [;]` text into a [`PredicateTree`](crate::predicate::PredicateTree).
//!
//! # Grammar
//!
//! ```text
//! clause    := "WHERE" expr [";"]
//! expr      := expr ("AND" | "OR") expr | "(" expr ")" | predicate
//! predicate := column op value | column "BETWEEN" value "AND" value
//! op        := "<" | "<=" | "=" | "==" | "!=" | ">=" | ">"
//! value     := quoted-string | bareword
//! ```
//!
//! Keywords are case-insensitive. AND binds tighter than OR; equal
//! precedence associates to the left. Text after `;` is ignored.
//! Clauses whose condition tree would be deeper than [`MAX_CLAUSE_DEPTH`]
//! are rejected.

mod parser;
mod scanner;
mod where_clause;

pub use parser::MAX_CLAUSE_DEPTH;
pub use where_clause::WhereClause;
