//! Error types for unit expression handling

use crate::token::{Position, Token};
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning source text into a tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// The lexer met a character outside the expression alphabet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unexpected character {character:?} at {position}")]
pub struct TokenizeError {
    pub character: char,
    pub position: Position,
}

/// Grammar violation, reported against the offending token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {}", .token.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub token: Token,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, token: &Token) -> Self {
        Self {
            kind,
            token: token.clone(),
        }
    }

    pub fn position(&self) -> Position {
        self.token.start
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("empty expression")]
    EmptyExpression,

    #[error("unopened parenthesis")]
    UnopenedParenthesis,

    #[error("unclosed parenthesis")]
    UnclosedParenthesis,

    #[error("missing operand")]
    MissingOperand,

    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("expression nested deeper than {0}")]
    TooDeep(usize),
}
