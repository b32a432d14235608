//! Rule evaluation against input records

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Result;
use crate::expr::ast::{CompareOp, LogicalOp, Node, Value};

/// Input record: attribute name to dynamically-typed value
pub type Record = HashMap<String, Value>;

/// Build a record from a JSON object string
pub fn record_from_json(json: &str) -> Result<Record> {
    Ok(serde_json::from_str(json)?)
}

/// Three-way evaluation outcome
///
/// A failed comparison and a malformed rule are distinct results: `Failed`
/// means the record did not satisfy the rule, `Error` means the rule could
/// not be applied to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Outcome {
    Passed,
    Failed,
    Error(String),
}

impl Outcome {
    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    fn from_bool(passed: bool) -> Self {
        if passed {
            Outcome::Passed
        } else {
            Outcome::Failed
        }
    }
}

/// Evaluate an AST against a record
pub fn evaluate(ast: &Node, record: &Record) -> Outcome {
    match ast {
        Node::Operator {
            operator,
            left,
            right,
        } => {
            let left = evaluate(left, record);
            let right = evaluate(right, record);

            // An error in either branch outranks the boolean fold; it must
            // not collapse into Failed
            match (left, right) {
                (err @ Outcome::Error(_), _) => err,
                (_, err @ Outcome::Error(_)) => err,
                (left, right) => match operator {
                    LogicalOp::And => Outcome::from_bool(left.passed() && right.passed()),
                    LogicalOp::Or => Outcome::from_bool(left.passed() || right.passed()),
                },
            }
        }
        Node::Operand {
            operator,
            attribute,
            value,
        } => {
            let actual = match record.get(attribute) {
                Some(actual) => actual,
                // Missing data fails the comparison; it is not an error
                None => return Outcome::Failed,
            };

            match operator {
                CompareOp::Greater
                | CompareOp::Less
                | CompareOp::GreaterEqual
                | CompareOp::LessEqual => match (actual.as_number(), value.as_number()) {
                    (Some(actual), Some(expected)) => Outcome::from_bool(match operator {
                        CompareOp::Greater => actual > expected,
                        CompareOp::Less => actual < expected,
                        CompareOp::GreaterEqual => actual >= expected,
                        CompareOp::LessEqual => actual <= expected,
                        _ => unreachable!(),
                    }),
                    _ => Outcome::Error(format!(
                        "Operator '{}' requires numeric operands",
                        operator
                    )),
                },
                CompareOp::Equal => Outcome::from_bool(loosely_equal(actual, value)),
                other => Outcome::Error(format!("Unknown operator {}", other)),
            }
        }
    }
}

/// Equality with explicit numeric-string coercion: equal if same type and
/// equal, or if one side is a numeric-looking string whose parsed value
/// equals the other, numeric, side. Booleans only ever equal booleans.
fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(s), Value::Number(n)) | (Value::Number(n), Value::String(s)) => {
            s.parse::<f64>().map(|parsed| parsed == *n).unwrap_or(false)
        }
        _ => false,
    }
}
