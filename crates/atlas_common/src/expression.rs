//! Expression extraction - finds `<number> <op> <number>` triples in text.

use regex::{CaptureMatches, Regex};
use std::sync::LazyLock;

/// Non-negative decimal, optional whitespace, operator, optional whitespace, decimal.
/// Digits are ASCII only; `\d` would also admit other scripts' digits.
static EXPRESSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*([+\-*/])\s*([0-9]+(?:\.[0-9]+)?)")
        .expect("expression pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One binary operation found in a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expression {
    pub left: f64,
    pub op: Operator,
    pub right: f64,
}

impl Expression {
    pub fn new(left: f64, op: Operator, right: f64) -> Self {
        Self { left, op, right }
    }
}

/// Lazy iterator over the expressions of one query, left to right
pub struct Expressions<'q> {
    matches: CaptureMatches<'static, 'q>,
}

impl Iterator for Expressions<'_> {
    type Item = Expression;

    fn next(&mut self) -> Option<Expression> {
        // ASCII digit runs always parse; very long ones become infinity
        for caps in self.matches.by_ref() {
            let left = caps[1].parse::<f64>().ok();
            let op = Operator::from_symbol(&caps[2]);
            let right = caps[3].parse::<f64>().ok();

            if let (Some(left), Some(op), Some(right)) = (left, op, right) {
                return Some(Expression { left, op, right });
            }
        }
        None
    }
}

/// Scan `query` for all non-overlapping expressions
pub fn extract_expressions(query: &str) -> Expressions<'_> {
    Expressions {
        matches: EXPRESSION_PATTERN.captures_iter(query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_expressions_in_order() {
        let found: Vec<Expression> = extract_expressions("5 + 3 and 10 * 2").collect();
        assert_eq!(
            found,
            vec![
                Expression::new(5.0, Operator::Add, 3.0),
                Expression::new(10.0, Operator::Mul, 2.0),
            ]
        );
    }

    #[test]
    fn test_no_whitespace_and_decimals() {
        let found: Vec<Expression> = extract_expressions("what is 2.5/0.5?").collect();
        assert_eq!(found, vec![Expression::new(2.5, Operator::Div, 0.5)]);

        let found: Vec<Expression> = extract_expressions("10-4").collect();
        assert_eq!(found, vec![Expression::new(10.0, Operator::Sub, 4.0)]);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract_expressions("Add 7 and 5 for me").count(), 0);
        assert_eq!(extract_expressions("").count(), 0);
        assert_eq!(extract_expressions("give me a problem").count(), 0);
    }

    #[test]
    fn test_only_ascii_digits() {
        assert_eq!(extract_expressions("what is ٣ + ٤").count(), 0);
        assert_eq!(extract_expressions("１２ * ３").count(), 0);

        // A non-ASCII operand must not swallow the ASCII expression next to it
        let found: Vec<Expression> = extract_expressions("٣+4 and 6 - 1").collect();
        assert_eq!(found, vec![Expression::new(6.0, Operator::Sub, 1.0)]);
    }

    #[test]
    fn test_non_overlapping() {
        // "1 + 2 + 3": first match consumes "1 + 2", the rest is "+ 3"
        let found: Vec<Expression> = extract_expressions("1 + 2 + 3").collect();
        assert_eq!(found, vec![Expression::new(1.0, Operator::Add, 2.0)]);
    }

    #[test]
    fn test_lazy_iteration() {
        let mut iter = extract_expressions("1+1, 2*2, 3-3");
        assert_eq!(iter.next(), Some(Expression::new(1.0, Operator::Add, 1.0)));
        assert_eq!(iter.next(), Some(Expression::new(2.0, Operator::Mul, 2.0)));
        assert_eq!(iter.next(), Some(Expression::new(3.0, Operator::Sub, 3.0)));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let a: Vec<Expression> = extract_expressions("8 / 2 then 9 - 1").collect();
        let b: Vec<Expression> = extract_expressions("8 / 2 then 9 - 1").collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_operator_symbols() {
        for sym in ["+", "-", "*", "/"] {
            assert_eq!(Operator::from_symbol(sym).map(|op| op.symbol()), Some(sym));
        }
        assert_eq!(Operator::from_symbol("^"), None);
    }
}
