//! Abstract syntax tree for rule expressions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Boolean connective joining two sub-trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

/// Comparison operators
///
/// `NotEqual` is part of the lexical grammar (`!=` and `<>` both tokenize)
/// but is not an evaluable operator: the evaluator reports it as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    /// Greater than (>)
    #[serde(rename = ">")]
    Greater,
    /// Less than (<)
    #[serde(rename = "<")]
    Less,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    GreaterEqual,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    LessEqual,
    /// Equal (=)
    #[serde(rename = "=")]
    Equal,
    /// Not equal (!= or <>)
    #[serde(rename = "!=", alias = "<>")]
    NotEqual,
}

impl FromStr for CompareOp {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            ">" => Self::Greater,
            "<" => Self::Less,
            ">=" => Self::GreaterEqual,
            "<=" => Self::LessEqual,
            "=" => Self::Equal,
            "!=" | "<>" => Self::NotEqual,
            _ => return Err(()),
        })
    }
}

/// Literal and record value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    String(String),
    Bool(bool),
}

impl Value {
    /// Numeric view. Strict: numeric-looking strings do not qualify.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// AST node for rule expressions
///
/// Serializes with a `type` tag (`operator` / `operand`), the shape rules
/// are persisted in. The closed sum makes partial nodes unrepresentable:
/// only operator nodes carry children, only operand nodes carry a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// Boolean combination of two sub-trees
    Operator {
        operator: LogicalOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Single attribute comparison like `age > 30`
    Operand {
        operator: CompareOp,
        attribute: String,
        value: Value,
    },
}

impl Node {
    pub fn operator(operator: LogicalOp, left: Node, right: Node) -> Self {
        Node::Operator {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn operand(attribute: impl Into<String>, operator: CompareOp, value: impl Into<Value>) -> Self {
        Node::Operand {
            operator,
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Attribute names referenced by this tree, depth-first, duplicates kept
    pub fn attributes(&self) -> Vec<&str> {
        fn walk<'a>(node: &'a Node, out: &mut Vec<&'a str>) {
            match node {
                Node::Operand { attribute, .. } => out.push(attribute),
                Node::Operator { left, right, .. } => {
                    walk(left, out);
                    walk(right, out);
                }
            }
        }

        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => f.write_str("AND"),
            LogicalOp::Or => f.write_str("OR"),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompareOp::Greater => ">",
            CompareOp::Less => "<",
            CompareOp::GreaterEqual => ">=",
            CompareOp::LessEqual => "<=",
            CompareOp::Equal => "=",
            CompareOp::NotEqual => "!=",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "'{}'", s),
            // Integral numbers print without a trailing .0 so the rendered
            // rule tokenizes back to the same value
            Value::Number(n) if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl fmt::Display for Node {
    /// Renders an expression string that parses back to this exact tree.
    /// Operator nodes are parenthesized so precedence cannot reshape them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Operand {
                operator,
                attribute,
                value,
            } => write!(f, "{} {} {}", attribute, operator, value),
            Node::Operator {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
        }
    }
}
