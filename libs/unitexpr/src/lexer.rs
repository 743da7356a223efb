//! Unit expression lexer - tokenizes input strings
//!
//! Converts expression strings such as `gram / meter ** 2` into a stream of
//! tokens. Signs are never folded into numeric literals: `-1` is the operator
//! `-` followed by the number `1`, as the host library's reference tokenizer
//! emits it.

use crate::error::TokenizeError;
use crate::options::SyntaxOptions;
use crate::token::{Position, Token, TokenKind};
use unicode_ident::{is_xid_continue, is_xid_start};

/// The unit expression lexer
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    current_char: Option<char>,
    caret_power: bool,
}

impl Lexer {
    /// Create a new lexer for the fixed grammar
    pub fn new(input: &str) -> Self {
        Self::with_options(input, &SyntaxOptions::default())
    }

    pub fn with_options(input: &str, options: &SyntaxOptions) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Self {
            chars,
            position: 0,
            line: 1,
            column: 0,
            current_char,
            caret_power: options.caret_power,
        }
    }

    /// Advance to the next character
    fn advance(&mut self) {
        if let Some(c) = self.current_char {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self.position += 1;
        self.current_char = self.chars.get(self.position).copied();
    }

    /// Peek `n` characters past the current one
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.get(self.position + n).copied()
    }

    fn peek(&self) -> Option<char> {
        self.peek_nth(1)
    }

    fn location(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn text_from(&self, start_pos: usize) -> String {
        self.chars[start_pos..self.position].iter().collect()
    }

    /// Read an identifier (unit symbol): XID_Continue characters, the same
    /// class the host language accepts after the first character
    fn read_identifier(&mut self) {
        while let Some(c) = self.current_char {
            if is_xid_continue(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Read a digit run; single `_` separators are allowed between digits
    fn read_digits(&mut self) {
        while let Some(c) = self.current_char {
            let separator = c == '_' && self.peek().is_some_and(|n| n.is_ascii_digit());
            if c.is_ascii_digit() || separator {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Read a decimal literal: `1`, `1.`, `1.5`, `.5`, `1e-3`, `1_000`
    fn read_number(&mut self) {
        if self.current_char != Some('.') {
            self.read_digits();
        }

        if self.current_char == Some('.') {
            self.advance();
            if self.current_char.is_some_and(|c| c.is_ascii_digit()) {
                self.read_digits();
            }
        }

        // The exponent is only part of the literal when digits follow it;
        // otherwise `e` starts a name.
        if matches!(self.current_char, Some('e' | 'E')) {
            let digits_at = match self.peek() {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_nth(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digits_at {
                    self.advance();
                }
                self.read_digits();
            }
        }
    }

    /// Radix of a `0x` / `0o` / `0b` literal starting at the current character.
    ///
    /// A prefix without a valid digit after it is not a radix literal: `0xg`
    /// reads as `0` followed by the name `xg`.
    fn radix_prefix(&self) -> Option<u32> {
        if self.current_char != Some('0') {
            return None;
        }
        let radix = match self.peek()? {
            'x' | 'X' => 16,
            'o' | 'O' => 8,
            'b' | 'B' => 2,
            _ => return None,
        };
        let first = match self.peek_nth(2)? {
            '_' => self.peek_nth(3)?,
            c => c,
        };
        first.is_digit(radix).then_some(radix)
    }

    fn read_radix_number(&mut self, radix: u32) {
        self.advance();
        self.advance();
        while let Some(c) = self.current_char {
            let separator = c == '_' && self.peek().is_some_and(|n| n.is_digit(radix));
            if c.is_digit(radix) || separator {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn operator(&mut self, width: usize, start: Position) -> Token {
        let start_pos = self.position;
        for _ in 0..width {
            self.advance();
        }
        Token::new(
            TokenKind::Operator,
            self.text_from(start_pos),
            start,
            self.location(),
        )
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token, TokenizeError> {
        self.skip_whitespace();

        let start = self.location();
        let start_pos = self.position;

        let Some(c) = self.current_char else {
            return Ok(Token::end_marker(start));
        };

        match c {
            '+' | '-' | '/' | '(' | ')' => Ok(self.operator(1, start)),
            '*' if self.peek() == Some('*') => Ok(self.operator(2, start)),
            '*' => Ok(self.operator(1, start)),
            '^' if self.caret_power => Ok(self.operator(1, start)),
            _ if c.is_ascii_digit()
                || (c == '.' && self.peek().is_some_and(|n| n.is_ascii_digit())) =>
            {
                match self.radix_prefix() {
                    Some(radix) => self.read_radix_number(radix),
                    None => {
                        self.read_number();
                        // Imaginary suffix
                        if matches!(self.current_char, Some('j' | 'J')) {
                            self.advance();
                        }
                    }
                }
                Ok(Token::new(
                    TokenKind::Number,
                    self.text_from(start_pos),
                    start,
                    self.location(),
                ))
            }
            _ if is_xid_start(c) || c == '_' => {
                self.read_identifier();
                Ok(Token::new(
                    TokenKind::Name,
                    self.text_from(start_pos),
                    start,
                    self.location(),
                ))
            }
            _ => Err(TokenizeError {
                character: c,
                position: start,
            }),
        }
    }
}

/// Tokenize `source` with the fixed grammar.
///
/// The returned sequence always ends with exactly one end marker.
pub fn tokenize(source: &str) -> Result<Vec<Token>, TokenizeError> {
    tokenize_with(source, &SyntaxOptions::default())
}

pub fn tokenize_with(source: &str, options: &SyntaxOptions) -> Result<Vec<Token>, TokenizeError> {
    let mut lexer = Lexer::with_options(source, options);
    let mut tokens = Vec::with_capacity(source.len() / 2 + 1);
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::EndMarker;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
