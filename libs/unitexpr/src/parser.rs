//! Unit expression parser - builds an expression tree from tokens
//!
//! Recursive descent, one function per precedence level. Precedence (lowest
//! to highest):
//! 1. additive (`+`, `-`), left-associative
//! 2. multiplicative (`*`, `/`, and juxtaposition when enabled), left-associative
//! 3. unary (prefix `-`, and prefix `+` when enabled)
//! 4. power (`**`, and `^` when enabled), right-associative; the exponent is a
//!    unary-level operand so `2 ** -1` is accepted
//! 5. primary (number, name, parenthesized expression)
//!
//! The parser is purely syntactic: it neither resolves names nor folds numbers.
//!
//! Only nesting counts against `max_depth`: parentheses, prefix operators and
//! `**` exponents recurse. Chains of left-associative operators are built in a
//! loop and may be arbitrarily long.

use crate::ast::{BinaryOperator, ExprNode, Precedence, UnaryOperator};
use crate::error::{ParseError, ParseErrorKind, Result};
use crate::lexer::tokenize_with;
use crate::options::SyntaxOptions;
use crate::token::{Position, Token, TokenKind};

/// Tree builder over a token slice
///
/// The slice may come from [`crate::lexer::tokenize`] or from the host's
/// reference tokenizer. Parsing stops at the first end marker; a slice
/// without one behaves as if it were terminated.
pub struct Parser<'t> {
    tokens: &'t [Token],
    index: usize,
    end: Token,
    options: SyntaxOptions,
    recursion_depth: usize,
    open_parens: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token], options: &SyntaxOptions) -> Self {
        let end_at = tokens
            .last()
            .map(|t| t.end)
            .unwrap_or(Position::new(1, 0));
        Self {
            tokens,
            index: 0,
            end: Token::end_marker(end_at),
            options: options.clone(),
            recursion_depth: 0,
            open_parens: 0,
        }
    }

    fn token_at(&self, index: usize) -> &Token {
        self.tokens.get(index).unwrap_or(&self.end)
    }

    fn current(&self) -> &Token {
        self.token_at(self.index)
    }

    fn error_at(&self, kind: ParseErrorKind, index: usize) -> ParseError {
        ParseError::new(kind, self.token_at(index))
    }

    /// Parse the entire sequence (top-level entry point)
    pub fn parse(&mut self) -> std::result::Result<ExprNode, ParseError> {
        if self.current().kind == TokenKind::EndMarker {
            return Err(self.error_at(ParseErrorKind::EmptyExpression, self.index));
        }

        let tree = self.parse_additive()?;

        // Ensure we've consumed everything up to the end marker
        let token = self.current();
        if token.kind != TokenKind::EndMarker {
            return Err(self.unexpected(token));
        }

        Ok(tree)
    }

    /// Check recursion depth and increment
    fn enter(&mut self, at: usize) -> std::result::Result<(), ParseError> {
        self.recursion_depth += 1;
        if self.recursion_depth > self.options.max_depth {
            return Err(self.error_at(ParseErrorKind::TooDeep(self.options.max_depth), at));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.recursion_depth -= 1;
    }

    /// Classify an operator token as a binary operator.
    ///
    /// Parentheses and non-operators yield `None`; spellings outside the table
    /// are an error.
    fn binary_operator(
        &self,
        token: &Token,
    ) -> std::result::Result<Option<BinaryOperator>, ParseError> {
        if token.kind != TokenKind::Operator || token.text == "(" || token.text == ")" {
            return Ok(None);
        }
        match BinaryOperator::from_symbol(&token.text) {
            Some(_) if token.text == "^" && !self.options.caret_power => Err(ParseError::new(
                ParseErrorKind::UnknownOperator(token.text.clone()),
                token,
            )),
            Some(operator) => Ok(Some(operator)),
            None => Err(ParseError::new(
                ParseErrorKind::UnknownOperator(token.text.clone()),
                token,
            )),
        }
    }

    /// Error for a token that cannot appear where it was found
    fn unexpected(&self, token: &Token) -> ParseError {
        let kind = match token.kind {
            TokenKind::Operator if token.text == ")" && self.open_parens == 0 => {
                ParseErrorKind::UnopenedParenthesis
            }
            TokenKind::Operator
                if token.text != "(" && BinaryOperator::from_symbol(&token.text).is_none() =>
            {
                ParseErrorKind::UnknownOperator(token.text.clone())
            }
            TokenKind::EndMarker => ParseErrorKind::MissingOperand,
            _ => ParseErrorKind::UnexpectedToken(token.text.clone()),
        };
        ParseError::new(kind, token)
    }

    fn parse_additive(&mut self) -> std::result::Result<ExprNode, ParseError> {
        self.parse_binary_level(Precedence::Additive)
    }

    /// Parse one left-associative level: operand (op operand)*
    fn parse_binary_level(
        &mut self,
        level: Precedence,
    ) -> std::result::Result<ExprNode, ParseError> {
        let mut left = self.parse_operand(level)?;

        loop {
            let operator = match self.binary_operator(self.current())? {
                Some(operator) if operator.precedence() == level => {
                    self.index += 1;
                    operator
                }
                // Juxtaposition: the operand itself starts the right-hand side
                None if level == Precedence::Multiplicative && self.implicit_operand_follows() => {
                    BinaryOperator::Multiply
                }
                _ => break,
            };
            let right = self.parse_operand(level)?;
            left = ExprNode::binary(operator, left, right);
        }

        Ok(left)
    }

    fn parse_operand(&mut self, level: Precedence) -> std::result::Result<ExprNode, ParseError> {
        match level {
            Precedence::Additive => self.parse_binary_level(Precedence::Multiplicative),
            _ => self.parse_unary(),
        }
    }

    fn implicit_operand_follows(&self) -> bool {
        self.options.implicit_multiplication && self.current().kind.is_operand()
    }

    /// Parse unary expression: ('-' | '+') unary | power
    fn parse_unary(&mut self) -> std::result::Result<ExprNode, ParseError> {
        let token = self.current();
        let operator = if token.is_operator("-") {
            UnaryOperator::Negate
        } else if token.is_operator("+") && self.options.unary_plus {
            UnaryOperator::Plus
        } else {
            return self.parse_power();
        };

        let at = self.index;
        self.index += 1;
        self.enter(at)?;
        let operand = self.parse_unary()?;
        self.leave();

        Ok(ExprNode::unary(operator, operand))
    }

    /// Parse power expression: primary ('**' unary)?
    ///
    /// Recursing through `parse_unary` for the exponent makes `**`
    /// right-associative.
    fn parse_power(&mut self) -> std::result::Result<ExprNode, ParseError> {
        let base = self.parse_primary()?;

        let at = self.index;
        match self.binary_operator(self.current())? {
            Some(BinaryOperator::Power) => {
                self.index += 1;
                self.enter(at)?;
                let exponent = self.parse_unary()?;
                self.leave();
                Ok(ExprNode::binary(BinaryOperator::Power, base, exponent))
            }
            _ => Ok(base),
        }
    }

    /// Parse primary: NUMBER | NAME | '(' additive ')'
    fn parse_primary(&mut self) -> std::result::Result<ExprNode, ParseError> {
        let token = self.current();
        let mut primary = match token.kind {
            TokenKind::Number | TokenKind::Name => {
                let leaf = ExprNode::leaf(token.clone());
                self.index += 1;
                leaf
            }
            TokenKind::Operator if token.text == "(" => self.parse_group()?,
            TokenKind::Operator if token.text == ")" && self.open_parens > 0 => {
                return Err(ParseError::new(ParseErrorKind::MissingOperand, token));
            }
            _ => return Err(self.unexpected(token)),
        };

        // A group glued to an operand multiplies with it before any binary
        // operator gets a chance: `a / b (c)` is `a / (b * c)`.
        while self.options.implicit_multiplication && self.current().is_operator("(") {
            let group = self.parse_group()?;
            primary = ExprNode::binary(BinaryOperator::Multiply, primary, group);
        }

        Ok(primary)
    }

    /// Parse '(' additive ')'; the current token is the opening parenthesis
    fn parse_group(&mut self) -> std::result::Result<ExprNode, ParseError> {
        let open = self.index;
        self.index += 1;
        self.enter(open)?;
        self.open_parens += 1;

        let inner = self.parse_additive()?;

        self.open_parens -= 1;
        self.leave();

        let token = self.current();
        if token.is_operator(")") {
            self.index += 1;
            Ok(inner)
        } else if token.kind == TokenKind::EndMarker {
            Err(self.error_at(ParseErrorKind::UnclosedParenthesis, open))
        } else {
            Err(self.unexpected(token))
        }
    }
}

/// Build a tree from a token sequence using the fixed grammar
pub fn build_eval_tree(tokens: &[Token]) -> std::result::Result<ExprNode, ParseError> {
    build_eval_tree_with(tokens, &SyntaxOptions::default())
}

pub fn build_eval_tree_with(
    tokens: &[Token],
    options: &SyntaxOptions,
) -> std::result::Result<ExprNode, ParseError> {
    Parser::new(tokens, options).parse()
}

/// Tokenize and build in one step
pub fn parse(source: &str) -> Result<ExprNode> {
    parse_with(source, &SyntaxOptions::default())
}

pub fn parse_with(source: &str, options: &SyntaxOptions) -> Result<ExprNode> {
    let tokens = tokenize_with(source, options)?;
    Ok(build_eval_tree_with(&tokens, options)?)
}
