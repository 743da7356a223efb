//! Canonical string form of an expression tree
//!
//! `Display` inserts only the parentheses needed for the text to tokenize and
//! parse back into an equivalent tree, with single spaces around binary
//! operators. No simplification or constant folding happens here.

use crate::ast::{Associativity, BinaryOperator, ExprNode, Precedence};
use std::fmt::{self, Write};

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Left operands printed without parentheses are walked in a loop so
        // that `a * b * c * ...` does not recurse once per operator.
        let mut pending = Vec::new();
        let mut head = self;
        while let ExprNode::BinaryOp {
            operator,
            left,
            right,
        } = head
        {
            if left_needs_parens(*operator, left) {
                break;
            }
            pending.push((*operator, right.as_ref()));
            head = left.as_ref();
        }

        match head {
            ExprNode::Leaf { token } => f.write_str(&token.text)?,
            ExprNode::UnaryOp { operator, operand } => {
                f.write_str(operator.symbol())?;
                // `-a ** b` already reads as `-(a ** b)`
                write_operand(f, operand, operand.precedence() < Precedence::Unary)?;
            }
            ExprNode::BinaryOp {
                operator,
                left,
                right,
            } => {
                write_operand(f, left, true)?;
                write_right(f, *operator, right)?;
            }
        }

        for (operator, right) in pending.into_iter().rev() {
            write_right(f, operator, right)?;
        }
        Ok(())
    }
}

fn write_right(
    f: &mut fmt::Formatter<'_>,
    operator: BinaryOperator,
    right: &ExprNode,
) -> fmt::Result {
    write!(f, " {} ", operator.symbol())?;
    write_operand(f, right, right_needs_parens(operator, right))
}

fn write_operand(f: &mut fmt::Formatter<'_>, node: &ExprNode, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", node)
    } else {
        write!(f, "{}", node)
    }
}

fn left_needs_parens(operator: BinaryOperator, left: &ExprNode) -> bool {
    let precedence = left.precedence();
    precedence < operator.precedence()
        || (precedence == operator.precedence()
            && operator.associativity() == Associativity::Right)
}

fn right_needs_parens(operator: BinaryOperator, right: &ExprNode) -> bool {
    // The exponent of `**` is parsed at unary level, so `2 ** -1` is fine bare
    if operator == BinaryOperator::Power && matches!(right, ExprNode::UnaryOp { .. }) {
        return false;
    }
    let precedence = right.precedence();
    precedence < operator.precedence()
        || (precedence == operator.precedence() && operator.associativity() == Associativity::Left)
}

impl ExprNode {
    /// The host library's legacy rendering: every operator node wrapped in
    /// parentheses, unary nodes as `(- x)`, leaves bare.
    pub fn to_parenthesized_string(&self) -> String {
        let mut out = String::new();
        write_parenthesized(self, &mut out);
        out
    }
}

fn write_parenthesized(node: &ExprNode, out: &mut String) {
    let start = out.len();
    let mut pending = Vec::new();
    let mut node = node;
    loop {
        match node {
            ExprNode::BinaryOp {
                operator,
                left,
                right,
            } => {
                pending.push((*operator, right.as_ref()));
                node = left.as_ref();
            }
            ExprNode::Leaf { token } => {
                out.push_str(&token.text);
                break;
            }
            ExprNode::UnaryOp { operator, operand } => {
                out.push('(');
                out.push_str(operator.symbol());
                out.push(' ');
                write_parenthesized(operand, out);
                out.push(')');
                break;
            }
        }
    }

    // One opening parenthesis per binary node on the left spine
    out.insert_str(start, &"(".repeat(pending.len()));
    for (operator, right) in pending.into_iter().rev() {
        let _ = write!(out, " {} ", operator.symbol());
        write_parenthesized(right, out);
        out.push(')');
    }
}
