//! Folding several rule ASTs into one expression

use crate::expr::ast::{LogicalOp, Node};

/// Fold ASTs left-to-right under a single boolean operator.
///
/// The result leans left: `[a, b, c]` under AND becomes `(a AND b) AND c`.
/// A single AST is returned unmodified; an empty input yields `None`.
/// Inputs are consumed, never mutated; callers keep their stored trees.
pub fn combine<I>(asts: I, operator: LogicalOp) -> Option<Node>
where
    I: IntoIterator<Item = Node>,
{
    asts.into_iter()
        .reduce(|left, right| Node::operator(operator, left, right))
}
