//! Single-column predicates

use std::fmt;

use crate::errors::{HaloError, HaloResult};

use super::between::BetweenArguments;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// column < value
    Less,
    /// column <= value
    LessOrEqual,
    /// column = value (also written `==`)
    Equal,
    /// column != value
    NotEqual,
    /// column >= value
    GreaterOrEqual,
    /// column > value
    Greater,
    /// column BETWEEN start AND stop, both inclusive
    Between,
}

impl Operator {
    /// Parses a binary comparison symbol. BETWEEN is a keyword, not a symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "<" => Some(Operator::Less),
            "<=" => Some(Operator::LessOrEqual),
            "=" | "==" => Some(Operator::Equal),
            "!=" => Some(Operator::NotEqual),
            ">=" => Some(Operator::GreaterOrEqual),
            ">" => Some(Operator::Greater),
            _ => None,
        }
    }

    /// Returns the canonical symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::GreaterOrEqual => ">=",
            Operator::Greater => ">",
            Operator::Between => "BETWEEN",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single column condition
///
/// `argument` holds the raw literal bytes; for BETWEEN it holds the
/// serialized [`BetweenArguments`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// Column label
    pub column: String,
    /// Comparison operator
    pub operator: Operator,
    /// Raw argument bytes
    pub argument: Vec<u8>,
}

impl Predicate {
    /// Create a binary comparison predicate
    pub fn new(column: impl Into<String>, operator: Operator, argument: impl Into<Vec<u8>>) -> Self {
        Self {
            column: column.into(),
            operator,
            argument: argument.into(),
        }
    }

    /// Create a BETWEEN predicate
    pub fn between(
        column: impl Into<String>,
        start: impl Into<Vec<u8>>,
        stop: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            column: column.into(),
            operator: Operator::Between,
            argument: BetweenArguments::new(start, stop).to_bytes(),
        }
    }

    /// Decodes the BETWEEN payload
    pub fn between_arguments(&self) -> HaloResult<BetweenArguments> {
        if self.operator != Operator::Between {
            return Err(HaloError::invalid_argument(format!(
                "Predicate on '{}' is '{}', not BETWEEN",
                self.column, self.operator
            )));
        }
        BetweenArguments::from_bytes(&self.argument)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator == Operator::Between {
            if let Ok(args) = BetweenArguments::from_bytes(&self.argument) {
                return write!(
                    f,
                    "{} BETWEEN {:?} AND {:?}",
                    self.column,
                    String::from_utf8_lossy(&args.start),
                    String::from_utf8_lossy(&args.stop)
                );
            }
        }
        write!(
            f,
            "{} {} {:?}",
            self.column,
            self.operator,
            String::from_utf8_lossy(&self.argument)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_symbols() {
        assert_eq!(Operator::from_symbol("=="), Some(Operator::Equal));
        assert_eq!(Operator::from_symbol("="), Some(Operator::Equal));
        assert_eq!(Operator::from_symbol("<="), Some(Operator::LessOrEqual));
        assert_eq!(Operator::from_symbol("!="), Some(Operator::NotEqual));
        assert_eq!(Operator::from_symbol("=>"), None);
        assert_eq!(Operator::from_symbol("<>"), None);
        assert_eq!(Operator::from_symbol(""), None);
    }

    #[test]
    fn test_between_predicate() {
        let pred = Predicate::between("c0", "10", "110");
        let args = pred.between_arguments().unwrap();
        assert_eq!(args.start, b"10");
        assert_eq!(args.stop, b"110");
        assert_eq!(pred.to_string(), "c0 BETWEEN \"10\" AND \"110\"");
    }

    #[test]
    fn test_between_arguments_on_binary_predicate() {
        let pred = Predicate::new("score", Operator::Greater, "80");
        assert!(pred.between_arguments().is_err());
        assert_eq!(pred.to_string(), "score > \"80\"");
    }
}
