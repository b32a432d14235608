//! Recursive-descent rule parser

use crate::error::{Result, RuleEngineError};
use crate::expr::ast::{CompareOp, LogicalOp, Node, Value};
use crate::expr::tokenizer::tokenize;

/// Parse a rule string into an AST
///
/// Grammar, with AND binding tighter than OR:
///
/// ```text
/// expression := term (OR term)*
/// term       := factor (AND factor)*
/// factor     := '(' expression ')' | operand
/// operand    := attribute comparison-operator value
/// ```
pub fn parse(rule: &str) -> Result<Node> {
    let tokens = tokenize(rule);
    parse_tokens(&tokens)
}

/// Parse an already-tokenized rule
pub fn parse_tokens(tokens: &[String]) -> Result<Node> {
    let mut parser = Parser {
        tokens,
        position: 0,
    };

    let ast = parser.expression()?;

    if parser.position < tokens.len() {
        return Err(RuleEngineError::InvalidRule(
            "unexpected trailing tokens".to_string(),
        ));
    }

    Ok(ast)
}

/// Cursor over the token sequence, shared by all grammar productions
struct Parser<'a> {
    tokens: &'a [String],
    position: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.position).map(String::as_str)
    }

    /// expression := term (OR term)*, left-associative fold
    fn expression(&mut self) -> Result<Node> {
        let mut node = self.term()?;

        while self.peek() == Some("OR") {
            self.position += 1;
            let right = self.term()?;
            node = Node::operator(LogicalOp::Or, node, right);
        }

        Ok(node)
    }

    /// term := factor (AND factor)*, left-associative fold
    fn term(&mut self) -> Result<Node> {
        let mut node = self.factor()?;

        while self.peek() == Some("AND") {
            self.position += 1;
            let right = self.factor()?;
            node = Node::operator(LogicalOp::And, node, right);
        }

        Ok(node)
    }

    /// factor := '(' expression ')' | operand
    fn factor(&mut self) -> Result<Node> {
        if self.peek() == Some("(") {
            self.position += 1;
            let node = self.expression()?;

            if self.peek() == Some(")") {
                self.position += 1;
            } else {
                return Err(RuleEngineError::InvalidRule(
                    "expected closing parenthesis".to_string(),
                ));
            }

            Ok(node)
        } else {
            self.operand()
        }
    }

    /// operand := attribute comparison-operator value
    fn operand(&mut self) -> Result<Node> {
        if self.position + 3 > self.tokens.len() {
            return Err(RuleEngineError::InvalidRule(
                "incomplete operand".to_string(),
            ));
        }

        let attribute = self.tokens[self.position].clone();
        let op_token = &self.tokens[self.position + 1];
        let value_token = &self.tokens[self.position + 2];
        self.position += 3;

        let operator: CompareOp = op_token.parse().map_err(|_| {
            RuleEngineError::InvalidRule(format!("unknown comparison operator '{}'", op_token))
        })?;

        Ok(Node::Operand {
            operator,
            attribute,
            value: coerce_value(value_token),
        })
    }
}

/// A token wrapped in matching quotes becomes a string (quotes stripped);
/// otherwise a whole-token numeric parse wins; otherwise it stays a string.
fn coerce_value(token: &str) -> Value {
    let bytes = token.as_bytes();
    if token.len() >= 2
        && ((bytes[0] == b'\'' && bytes[token.len() - 1] == b'\'')
            || (bytes[0] == b'"' && bytes[token.len() - 1] == b'"'))
    {
        return Value::String(token[1..token.len() - 1].to_string());
    }

    match token.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::Number(n),
        _ => Value::String(token.to_string()),
    }
}
