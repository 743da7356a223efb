//! Unit expression engine - tokenizer, tree builder, evaluator, serializer
//!
//! Parses the arithmetic a units-of-measure registry feeds through its
//! expression parser (`gram / meter ** 2 / second`) and reproduces the host
//! library's precedence rules, numeric edge cases and error reporting.
//!
//! # Architecture Overview
//!
//! ```text
//! Expression String
//!      |
//!   Lexer -> Tokens (or tokens from the host's reference tokenizer)
//!      |
//!   Parser -> ExprNode tree
//!      |
//!   +-- evaluate(resolver) -> f64
//!   +-- Display            -> canonical string
//! ```
//!
//! ```
//! use unitexpr::{parse, NumericResolver};
//!
//! let tree = parse("2 ** 3 ** 2").unwrap();
//! let value = tree.evaluate(|t| NumericResolver::new().resolve(t)).unwrap();
//! assert_eq!(value, 512.0);
//! assert_eq!(tree.to_string(), "2 ** 3 ** 2");
//! ```

#![forbid(unsafe_code)]

pub mod ast;
pub mod engine;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod options;
pub mod parser;
mod serialize;
pub mod token;
pub mod visualize;

// Re-export main types
pub use ast::{Associativity, BinaryOperator, ExprNode, Precedence, UnaryOperator};
pub use engine::Engine;
pub use error::{Error, ParseError, ParseErrorKind, Result, TokenizeError};
pub use eval::{parse_number, NumericResolver, ResolveError};
pub use lexer::{tokenize, tokenize_with, Lexer};
pub use options::SyntaxOptions;
pub use parser::{build_eval_tree, build_eval_tree_with, parse, parse_with, Parser};
pub use token::{Position, Token, TokenKind};
pub use visualize::{VisualizationFormat, Visualize};
