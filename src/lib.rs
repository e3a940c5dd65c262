//! # Introduction
//!
//! `cexpr` parses a single C expression into a parse tree and renders trees
//! back into a canonical, fully parenthesized string. It is meant as the front
//! end of a tool that evaluates expressions typed by a user, such as a
//! debugger. It does no type checking, folding or evaluation.
//!
//! ## Pipeline
//!
//! ```text
//! Text → Lexer → TokenStream (pushback) → Parser (NodeArena) → ParseTreeNode → render
//! ```
//!
//! 1. [`parser`]: tokenises the text and builds the tree.
//! 2. [`render`]: writes the tree back out as text.
//!
//! ```
//! let tree = cexpr::parse("a + b * c").unwrap();
//! assert_eq!(tree.to_string(), "(a+(b*c))");
//!
//! let err = cexpr::parse("a b").unwrap_err();
//! assert!(err.message.starts_with("Trailing input"));
//! ```

pub mod parser;
pub mod render;

pub use parser::{parse, parse_with, ParseError, ParseResult, ParseTreeNode, ParserConfig};
pub use render::render;
