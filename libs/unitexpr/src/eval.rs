//! Tree evaluation against a caller-supplied leaf resolver
//!
//! Leaves are handed to the resolver; operator nodes use plain `f64`
//! arithmetic. Division by zero and fractional powers of negative numbers
//! produce infinities and NaN rather than errors, so the only way evaluation
//! fails is through the resolver. Its error comes back to the caller as is.

use crate::ast::ExprNode;
use crate::token::{Token, TokenKind};
use std::borrow::Cow;
use std::collections::HashMap;
use thiserror::Error;

impl ExprNode {
    /// Evaluate the tree.
    ///
    /// The left operand of a binary node is always evaluated before the right
    /// one, so the resolver sees leaves in source order. The first resolver
    /// error stops evaluation.
    pub fn evaluate<F, E>(&self, mut resolve: F) -> Result<f64, E>
    where
        F: FnMut(&Token) -> Result<f64, E>,
    {
        self.evaluate_with(&mut resolve)
    }

    fn evaluate_with<F, E>(&self, resolve: &mut F) -> Result<f64, E>
    where
        F: FnMut(&Token) -> Result<f64, E>,
    {
        // Left operands are walked in a loop; only right operands and unary
        // operands recurse, and their depth is bounded by the parser.
        let mut pending = Vec::new();
        let mut node = self;
        let mut value = loop {
            match node {
                ExprNode::BinaryOp {
                    operator,
                    left,
                    right,
                } => {
                    pending.push((*operator, right.as_ref()));
                    node = left.as_ref();
                }
                ExprNode::Leaf { token } => break resolve(token)?,
                ExprNode::UnaryOp { operator, operand } => {
                    break operator.apply(operand.evaluate_with(resolve)?)
                }
            }
        };

        for (operator, right) in pending.into_iter().rev() {
            value = operator.apply(value, right.evaluate_with(resolve)?);
        }
        Ok(value)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),

    #[error("imaginary literal '{0}' has no real value")]
    ImaginaryNumber(String),

    #[error("unknown unit '{0}'")]
    UnknownName(String),

    #[error("cannot resolve {kind} token '{text}'")]
    UnexpectedToken { kind: TokenKind, text: String },
}

/// Resolver mapping number literals to their value and names to magnitudes
/// from a table.
///
/// ```
/// use unitexpr::{parse, NumericResolver};
///
/// let resolver = NumericResolver::new().with_name("kilometer", 1000.0);
/// let tree = parse("2 * kilometer").unwrap();
/// assert_eq!(tree.evaluate(|t| resolver.resolve(t)).unwrap(), 2000.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NumericResolver {
    names: HashMap<String, f64>,
}

impl NumericResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>, magnitude: f64) -> Self {
        self.names.insert(name.into(), magnitude);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, magnitude: f64) -> Option<f64> {
        self.names.insert(name.into(), magnitude)
    }

    pub fn resolve(&self, token: &Token) -> Result<f64, ResolveError> {
        match token.kind {
            TokenKind::Number => parse_number(&token.text),
            TokenKind::Name => self
                .names
                .get(&token.text)
                .copied()
                .ok_or_else(|| ResolveError::UnknownName(token.text.clone())),
            kind => Err(ResolveError::UnexpectedToken {
                kind,
                text: token.text.clone(),
            }),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for NumericResolver {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Value of a number literal.
///
/// Digit separators are dropped first. `0x`, `0o` and `0b` literals are read
/// in their radix; imaginary literals (`2j`) have no real value and are
/// rejected.
pub fn parse_number(text: &str) -> Result<f64, ResolveError> {
    let invalid = || ResolveError::InvalidNumber(text.to_string());
    let digits: Cow<'_, str> = if text.contains('_') {
        Cow::Owned(text.replace('_', ""))
    } else {
        Cow::Borrowed(text)
    };

    if digits.ends_with(|c: char| c == 'j' || c == 'J') {
        return Err(ResolveError::ImaginaryNumber(text.to_string()));
    }

    let radix = match digits.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return digits.parse::<f64>().map_err(|_| invalid()),
    };
    let body = &digits[2..];
    if body.is_empty() {
        return Err(invalid());
    }
    body.chars()
        .try_fold(0.0_f64, |value, c| {
            c.to_digit(radix)
                .map(|digit| value * f64::from(radix) + f64::from(digit))
        })
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1_000").unwrap(), 1000.0);
        assert_eq!(parse_number("1.").unwrap(), 1.0);
        assert_eq!(parse_number(".5").unwrap(), 0.5);
        assert_eq!(parse_number("2.5E-3").unwrap(), 0.0025);
        assert!(parse_number("meter").is_err());
    }

    #[test]
    fn test_parse_radix_and_imaginary() {
        assert_eq!(parse_number("0x10").unwrap(), 16.0);
        assert_eq!(parse_number("0XfF").unwrap(), 255.0);
        assert_eq!(parse_number("0o17").unwrap(), 15.0);
        assert_eq!(parse_number("0b1_01").unwrap(), 5.0);
        assert_eq!(
            parse_number("0x"),
            Err(ResolveError::InvalidNumber("0x".into()))
        );
        assert_eq!(
            parse_number("1.5j"),
            Err(ResolveError::ImaginaryNumber("1.5j".into()))
        );
    }
}
