//! Expression tree representation
//!
//! A tree is built once by the parser and never mutated. Every node owns its
//! children; evaluation and serialization are read-only traversals.
//!
//! # Precedence
//!
//! Lowest to highest, as the host library's tree builder ranks them:
//!
//! | level          | operators  | associativity |
//! |----------------|------------|---------------|
//! | additive       | `+` `-`    | left          |
//! | multiplicative | `*` `/`    | left          |
//! | unary          | prefix `-` | -             |
//! | power          | `**`       | right         |
//!
//! Unary minus sits *below* power, so `-1 ** 2` is `-(1 ** 2)`.

use crate::token::{Position, Token};
use phf::phf_map;

/// Binding strength of a node's top-level operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Additive,
    Multiplicative,
    Unary,
    Power,
    Atom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Binary operator: `+` | `-` | `*` | `/` | `**`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOperator {
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    Power,    // **
}

/// Operator spellings accepted by the tree builder. `^` is only honored when
/// the caret switch is on.
static BINARY_OPERATORS: phf::Map<&'static str, BinaryOperator> = phf_map! {
    "+" => BinaryOperator::Add,
    "-" => BinaryOperator::Subtract,
    "*" => BinaryOperator::Multiply,
    "/" => BinaryOperator::Divide,
    "**" => BinaryOperator::Power,
    "^" => BinaryOperator::Power,
};

impl BinaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        BINARY_OPERATORS.get(symbol).copied()
    }

    /// Canonical spelling
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Power => "**",
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => Precedence::Additive,
            BinaryOperator::Multiply | BinaryOperator::Divide => Precedence::Multiplicative,
            BinaryOperator::Power => Precedence::Power,
        }
    }

    pub fn associativity(self) -> Associativity {
        match self {
            BinaryOperator::Power => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    /// IEEE 754 double arithmetic; never fails.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOperator::Add => left + right,
            BinaryOperator::Subtract => left - right,
            BinaryOperator::Multiply => left * right,
            BinaryOperator::Divide => left / right,
            // Negative base with a fractional exponent yields NaN.
            BinaryOperator::Power => left.powf(right),
        }
    }
}

/// Prefix operator: `-` (and `+` when enabled)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOperator {
    Negate, // -
    Plus,   // +
}

impl UnaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Plus => "+",
        }
    }

    pub fn apply(self, operand: f64) -> f64 {
        match self {
            UnaryOperator::Negate => -operand,
            UnaryOperator::Plus => operand,
        }
    }
}

/// Node of an expression tree
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprNode {
    /// Number literal or unit name, resolved at evaluation time
    Leaf { token: Token },

    UnaryOp {
        operator: UnaryOperator,
        operand: Box<ExprNode>,
    },

    BinaryOp {
        operator: BinaryOperator,
        left: Box<ExprNode>,
        right: Box<ExprNode>,
    },
}

impl ExprNode {
    pub fn leaf(token: Token) -> Self {
        ExprNode::Leaf { token }
    }

    pub fn unary(operator: UnaryOperator, operand: ExprNode) -> Self {
        ExprNode::UnaryOp {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(operator: BinaryOperator, left: ExprNode, right: ExprNode) -> Self {
        ExprNode::BinaryOp {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            ExprNode::Leaf { .. } => Precedence::Atom,
            ExprNode::UnaryOp { .. } => Precedence::Unary,
            ExprNode::BinaryOp { operator, .. } => operator.precedence(),
        }
    }

    /// Leaf tokens in source order
    pub fn leaves(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                ExprNode::Leaf { token } => out.push(token),
                ExprNode::UnaryOp { operand, .. } => stack.push(operand),
                ExprNode::BinaryOp { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        out
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            match node {
                ExprNode::Leaf { .. } => {}
                ExprNode::UnaryOp { operand, .. } => {
                    stack.push((operand.as_ref(), depth + 1));
                }
                ExprNode::BinaryOp { left, right, .. } => {
                    stack.push((left.as_ref(), depth + 1));
                    stack.push((right.as_ref(), depth + 1));
                }
            }
        }
        height
    }

    fn placeholder() -> Self {
        ExprNode::Leaf {
            token: Token::end_marker(Position::default()),
        }
    }

    /// Move non-leaf children onto `stack`, leaving empty leaves behind
    fn detach_children(&mut self, stack: &mut Vec<ExprNode>) {
        let mut detach = |child: &mut Box<ExprNode>| {
            if !matches!(**child, ExprNode::Leaf { .. }) {
                stack.push(std::mem::replace(&mut **child, ExprNode::placeholder()));
            }
        };
        match self {
            ExprNode::Leaf { .. } => {}
            ExprNode::UnaryOp { operand, .. } => detach(operand),
            ExprNode::BinaryOp { left, right, .. } => {
                detach(left);
                detach(right);
            }
        }
    }
}

// Iterative: operator chains have no length limit.
impl Drop for ExprNode {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.detach_children(&mut stack);
        while let Some(mut node) = stack.pop() {
            node.detach_children(&mut stack);
        }
    }
}
