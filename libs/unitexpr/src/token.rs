//! Token types for the unit expression lexer
//!
//! Tokens are immutable value objects. A token sequence is produced once per
//! input string and ends with a single [`TokenKind::EndMarker`].

use std::fmt;

/// Token kinds understood by the tree builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    Number,
    Name,
    Operator,
    EndMarker,
}

impl TokenKind {
    /// Map a token name from the host language's reference tokenizer
    /// (`tokenize.tok_name`) onto a kind.
    ///
    /// Layout tokens (`NEWLINE`, `NL`, `INDENT`, `COMMENT`, `ENCODING`, ...)
    /// carry nothing the tree builder needs and map to `None`.
    pub fn from_tok_name(name: &str) -> Option<Self> {
        match name {
            "NUMBER" => Some(TokenKind::Number),
            "NAME" => Some(TokenKind::Name),
            "OP" => Some(TokenKind::Operator),
            "ENDMARKER" => Some(TokenKind::EndMarker),
            _ => None,
        }
    }

    /// Whether tokens of this kind become tree leaves
    pub fn is_operand(self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::Name)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Name => "NAME",
            TokenKind::Operator => "OP",
            TokenKind::EndMarker => "ENDMARKER",
        };
        f.write_str(name)
    }
}

/// Location in the source string.
///
/// `line` starts at 1, `column` starts at 0 and counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A token in a unit expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: Position,
    /// Exclusive
    pub end: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
            end,
        }
    }

    pub fn end_marker(at: Position) -> Self {
        Self {
            kind: TokenKind::EndMarker,
            text: String::new(),
            start: at,
            end: at,
        }
    }

    pub fn is_operator(&self, text: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == text
    }

    /// Build a token from one entry of the reference tokenizer's output.
    ///
    /// Returns `None` for token kinds the tree builder ignores.
    pub fn from_reference(
        tok_name: &str,
        text: impl Into<String>,
        start: Position,
        end: Position,
    ) -> Option<Self> {
        TokenKind::from_tok_name(tok_name).map(|kind| Self::new(kind, text, start, end))
    }

    /// Convert a whole reference token stream, dropping ignored kinds.
    pub fn from_reference_stream<I, S, T>(stream: I) -> Vec<Token>
    where
        I: IntoIterator<Item = (S, T, Position, Position)>,
        S: AsRef<str>,
        T: Into<String>,
    {
        stream
            .into_iter()
            .filter_map(|(name, text, start, end)| {
                Token::from_reference(name.as_ref(), text, start, end)
            })
            .collect()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
