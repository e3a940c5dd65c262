//! C expression parser
//!
//! This module turns expression text into a [`ParseTreeNode`]:
//! - [`lexer`]: Tokenization (text → tokens, pulled on demand)
//! - [`lookahead`]: Two-token pushback over any [`TokenSource`]
//! - [`arena`]: Node allocation and bulk release
//! - [`parser`]: Parser state, errors, entry points
//! - `expressions`: The precedence-ordered grammar rules
//! - [`ast`]: Parse tree node definition
//! - [`config`]: Cast heuristic type names and the nesting limit
//!
//! # Supported C Subset
//!
//! - Identifiers and literals of any kind (not distinguished)
//! - Postfix: `()`, `[]`, `.`, `->`, `++`, `--`
//! - Prefix: `&`, `*`, `+`, `-`, `!`, `~`, `++`, `--`, `sizeof`, casts
//! - Binary operators in the usual ten C precedence tiers
//! - `?:`, simple and compound assignment, comma
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent, one function per precedence tier. There is
//! no symbol table: a parenthesized group is taken as a cast only when it
//! starts with one of [`ParserConfig::type_names`], and the operand of
//! `sizeof` is kept as raw text.

pub mod arena;
pub mod ast;
pub mod config;
mod expressions;
pub mod lexer;
pub mod lookahead;
#[allow(clippy::module_inception)]
pub mod parser;

pub use ast::ParseTreeNode;
pub use config::ParserConfig;
pub use expressions::BINARY_TIERS;
pub use lexer::{LexError, Lexer, Token, TokenKind, TokenSource};
pub use parser::{parse, parse_with, NodeAccounting, ParseError, ParseResult, Parser};
