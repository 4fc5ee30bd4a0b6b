//! Operator-precedence parsing of WHERE clauses
//!
//! Two explicit stacks: finished subtrees and pending operators. Brackets,
//! connectors and the end marker share one precedence table; a higher number
//! binds tighter.

use crate::errors::{HaloError, HaloResult};
use crate::predicate::{Connector, Operator, Predicate, PredicateTree};

use super::scanner::Scanner;

const WHERE_KEYWORD: &str = "WHERE";
const BETWEEN_KEYWORD: &str = "BETWEEN";
const AND_KEYWORD: &str = "AND";
const OR_KEYWORD: &str = "OR";

/// Deepest condition tree a clause may produce; a single predicate has depth 1
pub const MAX_CLAUSE_DEPTH: usize = 512;

/// Entries of the operator stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symbol {
    LeftBracket,
    And,
    Or,
    RightBracket,
    End,
}

impl Symbol {
    fn precedence(&self) -> u8 {
        match self {
            Symbol::LeftBracket => 10,
            Symbol::And => 8,
            Symbol::Or => 7,
            Symbol::RightBracket => 1,
            Symbol::End => 0,
        }
    }
}

/// Single-use parser over one window of clause text
pub(crate) struct ClauseParser<'a> {
    scanner: Scanner<'a>,
    /// Finished subtrees with their depths
    nodes: Vec<(PredicateTree, usize)>,
    operators: Vec<Symbol>,
}

impl<'a> ClauseParser<'a> {
    pub(crate) fn new(text: &'a str, start: usize, end: usize) -> Self {
        Self {
            scanner: Scanner::new(text, start, end),
            nodes: Vec::new(),
            operators: Vec::new(),
        }
    }

    /// Parses `WHERE expr [;]` into a predicate tree
    pub(crate) fn parse(mut self) -> HaloResult<PredicateTree> {
        let keyword = self.scanner.word();
        if !keyword.eq_ignore_ascii_case(WHERE_KEYWORD) {
            return Err(HaloError::bad_sql("Not a where clause statement"));
        }

        let mut terminated = false;
        loop {
            self.scanner.skip_spaces();
            let Some(ch) = self.scanner.peek() else {
                break;
            };

            match ch {
                b'(' => {
                    self.scanner.bump();
                    self.push_operator(Symbol::LeftBracket)?;
                }
                b')' => {
                    self.scanner.bump();
                    self.push_operator(Symbol::RightBracket)?;
                }
                b';' => {
                    self.scanner.bump();
                    self.push_operator(Symbol::End)?;
                    terminated = true;
                    break;
                }
                _ => {
                    let rewind = self.scanner.position();
                    let word = self.scanner.word();
                    if word.eq_ignore_ascii_case(AND_KEYWORD) {
                        self.push_operator(Symbol::And)?;
                    } else if word.eq_ignore_ascii_case(OR_KEYWORD) {
                        self.push_operator(Symbol::Or)?;
                    } else {
                        self.scanner.rewind(rewind);
                        let predicate = self.predicate()?;
                        self.nodes.push((PredicateTree::leaf(predicate), 1));
                    }
                }
            }
        }

        if !terminated {
            self.push_operator(Symbol::End)?;
        }

        if self.operators.len() != 1 || self.nodes.len() != 1 {
            return Err(HaloError::bad_sql(format!(
                "Incomplete where clause: {} operator(s) and {} operand(s) left over",
                self.operators.len().saturating_sub(1),
                self.nodes.len()
            )));
        }
        self.nodes
            .pop()
            .map(|(tree, _)| tree)
            .ok_or_else(|| HaloError::bad_sql("Empty where clause"))
    }

    /// Pushes `current`, first reducing every stacked operator that binds at
    /// least as tightly
    fn push_operator(&mut self, current: Symbol) -> HaloResult<()> {
        loop {
            let top = match self.operators.last() {
                None => {
                    self.operators.push(current);
                    return Ok(());
                }
                Some(top) => *top,
            };

            if top.precedence() < current.precedence() {
                self.operators.push(current);
                return Ok(());
            }

            match top {
                Symbol::LeftBracket => {
                    if current == Symbol::RightBracket {
                        self.operators.pop();
                    } else {
                        self.operators.push(current);
                    }
                    return Ok(());
                }
                Symbol::And => self.reduce(Connector::And)?,
                Symbol::Or => self.reduce(Connector::Or)?,
                Symbol::RightBracket => return Err(HaloError::bad_sql("Bracket mismatch")),
                Symbol::End => {
                    return Err(HaloError::bad_sql("Unexpected input after end of clause"))
                }
            }
        }
    }

    /// Replaces the top operator and the top two subtrees with one node
    fn reduce(&mut self, connector: Connector) -> HaloResult<()> {
        if self.nodes.len() < 2 {
            return Err(HaloError::bad_sql(format!(
                "Bad {} operator usage",
                connector
            )));
        }
        self.operators.pop();
        let right = self.nodes.pop();
        let left = self.nodes.pop();
        match (left, right) {
            (Some((left, left_depth)), Some((right, right_depth))) => {
                let depth = 1 + left_depth.max(right_depth);
                if depth > MAX_CLAUSE_DEPTH {
                    return Err(HaloError::bad_sql(format!(
                        "Where clause too deeply nested, limit is {}",
                        MAX_CLAUSE_DEPTH
                    )));
                }
                self.nodes
                    .push((PredicateTree::node(left, connector, right), depth));
                Ok(())
            }
            _ => Err(HaloError::bad_sql(format!(
                "Bad {} operator usage",
                connector
            ))),
        }
    }

    /// `column op value` or `column BETWEEN value AND value`
    fn predicate(&mut self) -> HaloResult<Predicate> {
        self.scanner.skip_spaces();
        let at = self.scanner.position();
        let column = self.scanner.word();
        if column.is_empty() {
            return Err(HaloError::bad_sql(format!(
                "Expecting column name at position {}",
                at
            )));
        }

        let rewind = self.scanner.position();
        if self.scanner.word().eq_ignore_ascii_case(BETWEEN_KEYWORD) {
            let start = self.scanner.value()?;
            if !self.scanner.word().eq_ignore_ascii_case(AND_KEYWORD) {
                return Err(HaloError::bad_sql(
                    "Invalid BETWEEN-AND syntax, expecting keyword AND",
                ));
            }
            let stop = self.scanner.value()?;
            return Ok(Predicate::between(column, start, stop));
        }
        self.scanner.rewind(rewind);

        let symbol = self.scanner.operator_symbol();
        let operator = Operator::from_symbol(symbol).ok_or_else(|| {
            HaloError::bad_sql(format!(
                "Unknown operator \"{}\" after column '{}'",
                symbol, column
            ))
        })?;
        let value = self.scanner.value()?;
        Ok(Predicate::new(column, operator, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> HaloResult<PredicateTree> {
        ClauseParser::new(text, 0, text.len()).parse()
    }

    #[test]
    fn test_single_predicate() {
        let tree = parse("WHERE score > 80").unwrap();
        let pred = tree.predicate().unwrap();
        assert_eq!(pred.column, "score");
        assert_eq!(pred.operator, Operator::Greater);
        assert_eq!(pred.argument, b"80");
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let tree = parse("wHeRe a=1 oR b between 1 AnD 2").unwrap();
        assert_eq!(tree.structure(), "(a OR b)");
    }

    #[test]
    fn test_left_associative_under_equal_precedence() {
        let tree = parse("WHERE a=1 AND b=2 AND c=3").unwrap();
        assert_eq!(tree.structure(), "((a AND b) AND c)");

        let tree = parse("WHERE a=1 OR b=2 OR c=3").unwrap();
        assert_eq!(tree.structure(), "((a OR b) OR c)");
    }

    #[test]
    fn test_and_binds_tighter() {
        let tree = parse("WHERE a=1 OR b=2 AND c=3").unwrap();
        assert_eq!(tree.structure(), "(a OR (b AND c))");
    }

    #[test]
    fn test_brackets_override_precedence() {
        let tree = parse("WHERE a=1 AND (b=2 OR c=3)").unwrap();
        assert_eq!(tree.structure(), "(a AND (b OR c))");

        let tree = parse("WHERE ((a=1))").unwrap();
        assert_eq!(tree.structure(), "a");
    }

    #[test]
    fn test_semicolon_stops_parsing() {
        let tree = parse("WHERE a=1 OR b=2; AND c=3").unwrap();
        assert_eq!(tree.structure(), "(a OR b)");

        // Garbage after the terminator is never looked at
        let tree = parse("WHERE a=1; ((( \"unterminated").unwrap();
        assert_eq!(tree.structure(), "a");
    }

    #[test]
    fn test_missing_where() {
        let err = parse("SELECT a=1").unwrap_err();
        assert!(matches!(err, HaloError::BadSqlStatement(_)));
        assert!(parse("").is_err());
        assert!(parse("WHEREa=1").is_err());
    }

    #[test]
    fn test_empty_clause_rejected() {
        assert!(parse("WHERE").is_err());
        assert!(parse("WHERE ;").is_err());
        assert!(parse("WHERE ()").is_err());
    }

    #[test]
    fn test_operand_underflow() {
        let err = parse("WHERE AND a=1").unwrap_err();
        assert!(err.to_string().contains("Bad AND operator usage"));

        let err = parse("WHERE a=1 OR").unwrap_err();
        assert!(err.to_string().contains("Bad OR operator usage"));
    }

    #[test]
    fn test_bracket_mismatch() {
        assert!(parse("WHERE (a=1").is_err());
        assert!(parse("WHERE a=1)").is_err());
        assert!(parse("WHERE a=1) AND b=2").is_err());
        assert!(parse("WHERE (a=1 AND b=2").is_err());
    }

    #[test]
    fn test_missing_connector() {
        assert!(parse("WHERE a=1 b=2").is_err());
    }

    #[test]
    fn test_bad_operators() {
        assert!(parse("WHERE a => 1").is_err());
        assert!(parse("WHERE a <> 1").is_err());
        assert!(parse("WHERE a 1").is_err());
        assert!(parse("WHERE = 1").is_err());
    }

    #[test]
    fn test_between_requires_and() {
        let err = parse("WHERE a BETWEEN 1 OR 2").unwrap_err();
        assert!(err.to_string().contains("BETWEEN"));
        assert!(parse("WHERE a BETWEEN 1").is_err());
    }

    #[test]
    fn test_between_arguments_parsed() {
        let tree = parse("WHERE c0 BETWEEN \"a b\" AND 20").unwrap();
        let args = tree.predicate().unwrap().between_arguments().unwrap();
        assert_eq!(args.start, b"a b");
        assert_eq!(args.stop, b"20");
    }

    fn and_chain(count: usize) -> String {
        let mut text = String::from("WHERE c=1");
        for _ in 1..count {
            text.push_str(" AND c=1");
        }
        text
    }

    fn nested(count: usize) -> String {
        let mut text = String::from("WHERE c=1");
        for _ in 1..count {
            text.push_str(" OR (c=1");
        }
        text.push_str(&")".repeat(count - 1));
        text
    }

    #[test]
    fn test_depth_limit() {
        let tree = parse(&and_chain(MAX_CLAUSE_DEPTH)).unwrap();
        assert_eq!(tree.depth(), MAX_CLAUSE_DEPTH);
        assert_eq!(tree.leaf_count(), MAX_CLAUSE_DEPTH);

        let err = parse(&and_chain(MAX_CLAUSE_DEPTH + 1)).unwrap_err();
        assert!(err.to_string().contains("too deeply nested"));

        assert_eq!(parse(&nested(MAX_CLAUSE_DEPTH)).unwrap().depth(), MAX_CLAUSE_DEPTH);
        assert!(parse(&nested(MAX_CLAUSE_DEPTH + 1)).is_err());
    }

    #[test]
    fn test_quoted_string_errors_surface() {
        assert!(parse("WHERE a = \"abc").is_err());
        assert!(parse("WHERE a = \"a\\zc\"").is_err());
    }
}
