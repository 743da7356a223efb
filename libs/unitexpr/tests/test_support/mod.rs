#![allow(dead_code)]

//! Shared helpers for integration tests.
//!
//! `reference_eval` is an executable model of the host units library's tree
//! builder: a single recursive routine that threads the previous operator's
//! priority through its calls. It is deliberately written nothing like the
//! crate's parser so that agreement between the two means something.

use unitexpr::{parse_number, Token, TokenKind};

/// Magnitudes used for names in tests
pub const UNITS: [(&str, f64); 5] = [
    ("meter", 1.0),
    ("kilometer", 1000.0),
    ("second", 1.0),
    ("minute", 60.0),
    ("angstrom", 1e-10),
];

/// Resolver for tests: numbers by value, names from [`UNITS`]
pub fn resolve(token: &Token) -> Result<f64, String> {
    match token.kind {
        TokenKind::Number => parse_number(&token.text).map_err(|e| e.to_string()),
        TokenKind::Name => UNITS
            .iter()
            .find(|(name, _)| *name == token.text)
            .map(|(_, magnitude)| *magnitude)
            .ok_or_else(|| format!("'{}' is not defined in the unit registry", token.text)),
        _ => Err(format!("cannot resolve '{}'", token.text)),
    }
}

/// Equality that treats all NaNs as equal
pub fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

#[derive(Debug)]
pub enum RefNode {
    Leaf(String),
    Unary(String, Box<RefNode>),
    Binary(String, Box<RefNode>, Box<RefNode>),
}

fn priority(op: &str) -> i8 {
    match op {
        "**" | "^" => 3,
        "unary" => 2,
        "*" | "/" | "" => 1,
        "+" | "-" => 0,
        _ => -1,
    }
}

fn binary(op: &str, left: RefNode, right: RefNode) -> RefNode {
    RefNode::Binary(op.to_string(), Box::new(left), Box::new(right))
}

/// Returns the node built so far and the index of the last token consumed.
fn build(tokens: &[Token], mut index: usize, prev: Option<&str>) -> Option<(RefNode, usize)> {
    let prev_priority = prev.map(priority).unwrap_or(-1);
    let mut result: Option<RefNode> = None;

    while index < tokens.len() {
        let token = &tokens[index];
        match token.kind {
            TokenKind::Operator => match token.text.as_str() {
                ")" => {
                    return match prev {
                        None => None,
                        Some("(") => Some((result?, index)),
                        Some(_) => Some((result?, index - 1)),
                    };
                }
                "(" => {
                    let (inner, stop) = build(tokens, index + 1, Some("("))?;
                    if !tokens.get(stop)?.is_operator(")") {
                        return None;
                    }
                    index = stop;
                    result = Some(match result.take() {
                        Some(left) => binary("*", left, inner),
                        None => inner,
                    });
                }
                op => match result.take() {
                    Some(left) => {
                        if priority(op) <= prev_priority && op != "**" && op != "^" {
                            return Some((left, index - 1));
                        }
                        let (right, stop) = build(tokens, index + 1, Some(op))?;
                        result = Some(binary(op, left, right));
                        index = stop;
                    }
                    None => {
                        let (operand, stop) = build(tokens, index + 1, Some("unary"))?;
                        result = Some(RefNode::Unary(op.to_string(), Box::new(operand)));
                        index = stop;
                    }
                },
            },
            TokenKind::Number | TokenKind::Name => match result.take() {
                Some(left) => {
                    if priority("") <= prev_priority {
                        return Some((left, index - 1));
                    }
                    let (right, stop) = build(tokens, index, Some(""))?;
                    result = Some(binary("*", left, right));
                    index = stop;
                }
                None => result = Some(RefNode::Leaf(token.text.clone())),
            },
            TokenKind::EndMarker => {
                return match prev {
                    Some("(") => None,
                    _ => Some((result?, index)),
                };
            }
        }
        index += 1;
    }

    Some((result?, index))
}

pub fn reference_tree(tokens: &[Token]) -> Option<RefNode> {
    build(tokens, 0, None).map(|(node, _)| node)
}

pub fn reference_evaluate(node: &RefNode) -> Option<f64> {
    Some(match node {
        RefNode::Leaf(text) => resolve_text(text)?,
        RefNode::Unary(op, operand) => {
            let value = reference_evaluate(operand)?;
            match op.as_str() {
                "-" => -value,
                "+" => value,
                _ => return None,
            }
        }
        RefNode::Binary(op, left, right) => {
            let left = reference_evaluate(left)?;
            let right = reference_evaluate(right)?;
            match op.as_str() {
                "+" => left + right,
                "-" => left - right,
                "*" => left * right,
                "/" => left / right,
                "**" | "^" => left.powf(right),
                _ => return None,
            }
        }
    })
}

fn resolve_text(text: &str) -> Option<f64> {
    match parse_number(text) {
        Ok(value) => Some(value),
        Err(_) => UNITS
            .iter()
            .find(|(name, _)| *name == text)
            .map(|(_, magnitude)| *magnitude),
    }
}

/// Evaluate `source` the way the host library's own tree builder would
pub fn reference_eval(source: &str) -> Option<f64> {
    let tokens = unitexpr::tokenize_with(source, &unitexpr::SyntaxOptions::pint()).ok()?;
    reference_evaluate(&reference_tree(&tokens)?)
}
