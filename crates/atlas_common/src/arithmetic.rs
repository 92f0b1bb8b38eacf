//! Arithmetic evaluator and random problem synthesizer.
//!
//! Queries with explicit expressions get them evaluated as one batch: a
//! single division by zero fails the whole batch, no partial results.
//! Queries without expressions get a random problem instead.

use crate::expression::{Expression, Operator};
use crate::random::{pick, RandomSource};
use std::fmt;

/// Largest input the factorial problem will compute
pub const FACTORIAL_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    #[error("Error: Division by zero!")]
    DivisionByZero,
}

/// Evaluate one expression
pub fn apply(expr: &Expression) -> Result<f64, ArithmeticError> {
    match expr.op {
        Operator::Add => Ok(expr.left + expr.right),
        Operator::Sub => Ok(expr.left - expr.right),
        Operator::Mul => Ok(expr.left * expr.right),
        Operator::Div if expr.right == 0.0 => Err(ArithmeticError::DivisionByZero),
        Operator::Div => Ok(expr.left / expr.right),
    }
}

/// Evaluate a batch, all or nothing.
///
/// Each result renders as `"{left} {op} {right} = {result}"`, joined by `"; "`.
/// A result that is not finite renders as an error for that expression only;
/// division by zero fails the whole batch.
pub fn evaluate<I>(expressions: I) -> Result<String, ArithmeticError>
where
    I: IntoIterator<Item = Expression>,
{
    let rendered = expressions
        .into_iter()
        .map(|expr| apply(&expr).map(|result| render(&expr, result)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rendered.join("; "))
}

fn render(expr: &Expression, result: f64) -> String {
    let left = format_operand(expr.left);
    let right = format_operand(expr.right);

    if result.is_nan() {
        format!(
            "Error calculating {} {} {}: cannot convert float NaN to integer",
            left, expr.op, right
        )
    } else if result.is_infinite() {
        format!(
            "Error calculating {} {} {}: cannot convert float infinity to integer",
            left, expr.op, right
        )
    } else {
        format!("{} {} {} = {}", left, expr.op, right, format_result(result))
    }
}

/// Evaluate the expressions if there are any, otherwise synthesize a problem
pub fn answer<I>(expressions: I, random: &dyn RandomSource) -> String
where
    I: IntoIterator<Item = Expression>,
{
    let mut expressions = expressions.into_iter().peekable();

    if expressions.peek().is_none() {
        return MathProblem::generate(random).to_string();
    }

    evaluate(expressions).unwrap_or_else(|e| e.to_string())
}

/// Operands always show a fractional part or an exponent: `7.0`, `2.5`, `1e+16`
pub fn format_operand(value: f64) -> String {
    float_repr(value)
}

/// Whole results print every digit: `12`, `10000000000000000`.
/// Fractional results use the operand form: `2.5`, `2e-05`.
pub fn format_result(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        if value == 0.0 {
            // also covers -0.0
            return "0".to_string();
        }
        format!("{}", value)
    } else {
        float_repr(value)
    }
}

/// Shortest round-trip text with a signed exponent of at least two digits.
///
/// `{:?}` already switches to scientific notation below `1e-4` and from
/// `1e16` on; only the exponent needs rewriting (`1e16` -> `1e+16`,
/// `1e-5` -> `1e-05`).
fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }

    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

// ============================================================================
// Problem synthesis
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvancedOp {
    Square,
    Cube,
    Factorial,
}

impl AdvancedOp {
    const ALL: [AdvancedOp; 3] = [AdvancedOp::Square, AdvancedOp::Cube, AdvancedOp::Factorial];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    Added,
    Removed,
}

const BASIC_OPERATORS: [Operator; 3] = [Operator::Add, Operator::Sub, Operator::Mul];

const SCENARIOS: [(&str, &str); 4] = [
    ("apples", "basket"),
    ("books", "shelf"),
    ("cars", "parking lot"),
    ("students", "classroom"),
];

/// A synthesized problem. Renders to its solved form via `Display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathProblem {
    Basic {
        a: i64,
        op: Operator,
        b: i64,
    },
    Advanced {
        op: AdvancedOp,
        n: u32,
    },
    WordProblem {
        item: &'static str,
        container: &'static str,
        initial: i64,
        /// Already clamped to `initial` for removals
        delta: i64,
        framing: Framing,
    },
}

impl MathProblem {
    pub fn generate(random: &dyn RandomSource) -> Self {
        match random.int_between(0, 2) {
            0 => Self::basic(random),
            1 => Self::advanced(random),
            _ => Self::word_problem(random),
        }
    }

    fn basic(random: &dyn RandomSource) -> Self {
        let a = random.int_between(1, 50);
        let b = random.int_between(1, 50);
        let op = *pick(random, &BASIC_OPERATORS);
        Self::Basic { a, op, b }
    }

    fn advanced(random: &dyn RandomSource) -> Self {
        let op = *pick(random, &AdvancedOp::ALL);
        let n = random.int_between(2, 10) as u32;
        Self::Advanced { op, n }
    }

    fn word_problem(random: &dyn RandomSource) -> Self {
        let (item, container) = *pick(random, &SCENARIOS);
        let initial = random.int_between(5, 20);
        let delta = random.int_between(1, 10);

        if random.int_between(0, 1) == 0 {
            Self::WordProblem {
                item,
                container,
                initial,
                delta,
                framing: Framing::Added,
            }
        } else {
            Self::WordProblem {
                item,
                container,
                initial,
                delta: delta.min(initial),
                framing: Framing::Removed,
            }
        }
    }

    /// Final count of a word problem
    pub fn word_total(&self) -> Option<i64> {
        match self {
            Self::WordProblem {
                initial,
                delta,
                framing: Framing::Added,
                ..
            } => Some(initial + delta),
            Self::WordProblem {
                initial,
                delta,
                framing: Framing::Removed,
                ..
            } => Some(initial - delta),
            _ => None,
        }
    }
}

impl fmt::Display for MathProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { a, op, b } => {
                let result = match op {
                    Operator::Add => a + b,
                    Operator::Sub => a - b,
                    _ => a * b,
                };
                write!(f, "{} {} {} = {}", a, op, b, result)
            }
            Self::Advanced { op, n } => match op {
                AdvancedOp::Square => write!(f, "{} squared = {}", n, u64::from(*n).pow(2)),
                AdvancedOp::Cube => write!(f, "{} cubed = {}", n, u64::from(*n).pow(3)),
                AdvancedOp::Factorial => match factorial(*n) {
                    Some(value) => write!(f, "{}! = {}", n, value),
                    None => write!(f, "{}! = too large", n),
                },
            },
            Self::WordProblem {
                item,
                container,
                initial,
                delta,
                framing,
            } => {
                let total = self.word_total().unwrap_or(*initial);
                match framing {
                    Framing::Added => write!(
                        f,
                        "There were {} {} in the {}. {} more were added. Total: {} {}",
                        initial, item, container, delta, total, item
                    ),
                    Framing::Removed => write!(
                        f,
                        "There were {} {} in the {}. {} were removed. Remaining: {} {}",
                        initial, item, container, delta, total, item
                    ),
                }
            }
        }
    }
}

/// `n!` for `n <= FACTORIAL_LIMIT`, `None` above it
pub fn factorial(n: u32) -> Option<u64> {
    if n > FACTORIAL_LIMIT {
        return None;
    }
    Some((1..=u64::from(n)).product())
}
