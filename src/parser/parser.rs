//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, the error type, and the entry
//! points [`parse`] and [`parse_with`]. The grammar rules themselves live in
//! `expressions` as further `impl Parser` blocks.
//!
//! A fresh [`Parser`] is built for every expression and consumed by
//! [`Parser::parse`]; nothing is shared between calls.

use thiserror::Error;
use tracing::debug;

use super::arena::{NodeArena, NodeId};
use super::ast::ParseTreeNode;
use super::config::ParserConfig;
use super::lexer::{LexError, Lexer, Token, TokenKind, TokenSource};
use super::lookahead::TokenStream;

/// Parser error type
///
/// Every failure carries a finished message. The first rule that fails builds
/// it; enclosing rules only forward it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(err.to_string())
    }
}

/// Either the root of the parse tree or the reason parsing failed.
pub type ParseResult = Result<ParseTreeNode, ParseError>;

/// How the nodes of one parse were released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeAccounting {
    /// Nodes allocated by the grammar rules.
    pub allocated: usize,
    /// Nodes handed over to the returned tree.
    pub in_tree: usize,
    /// Nodes dropped flat from the arena.
    pub released: usize,
}

/// Recursive descent parser for one C expression
pub struct Parser<'c, S> {
    pub(crate) tokens: TokenStream<S>,
    pub(crate) arena: NodeArena,
    pub(crate) config: &'c ParserConfig,
    pub(crate) depth: usize,
}

impl<'c, S: TokenSource> Parser<'c, S> {
    pub fn new(source: S, config: &'c ParserConfig) -> Self {
        Self {
            tokens: TokenStream::new(source),
            arena: NodeArena::new(),
            config,
            depth: 0,
        }
    }

    /// Parse a complete expression; the token after it must end the input.
    pub fn parse(self) -> ParseResult {
        self.parse_tracked().0
    }

    pub(crate) fn parse_tracked(mut self) -> (ParseResult, NodeAccounting) {
        let outcome = self
            .parse_comma(true)
            .and_then(|root| self.expect_end(root));
        let allocated = self.arena.len();

        match outcome {
            Ok(root) => {
                let (tree, released) = self.arena.into_tree(root);
                let in_tree = allocated - released;
                debug!(nodes = in_tree, "parsed expression");
                let accounting = NodeAccounting {
                    allocated,
                    in_tree,
                    released,
                };
                (Ok(tree), accounting)
            }
            Err(err) => {
                let released = self.arena.release();
                debug!(released, error = %err, "parse failed");
                let accounting = NodeAccounting {
                    allocated,
                    in_tree: 0,
                    released,
                };
                (Err(err), accounting)
            }
        }
    }

    fn expect_end(&mut self, root: NodeId) -> Result<NodeId, ParseError> {
        let token = self.next()?;
        if token.is(TokenKind::EndOfExpression) {
            Ok(root)
        } else {
            Err(ParseError::new(format!(
                "Trailing input: unparsed portion of expression starts with {}",
                token
            )))
        }
    }

    // ===== Helper methods =====

    pub(crate) fn next(&mut self) -> Result<Token, ParseError> {
        Ok(self.tokens.next()?)
    }

    pub(crate) fn push_back(&mut self, token: Token) {
        self.tokens.push_back(token);
    }

    pub(crate) fn make_terminal(&mut self, token: Token) -> NodeId {
        self.arena.make_terminal(token)
    }

    /// Allocate an interior node, refusing trees taller than the configured limit.
    pub(crate) fn make_node(
        &mut self,
        op: TokenKind,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) -> Result<NodeId, ParseError> {
        let id = self.arena.make_node(op, left, right);
        if self.arena.depth(id) > self.config.max_depth {
            return Err(self.too_deep());
        }
        Ok(id)
    }

    /// Run a recursive rule one nesting level deeper.
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.config.max_depth {
            return Err(self.too_deep());
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn too_deep(&self) -> ParseError {
        ParseError::new(format!(
            "Expression nested too deeply (limit is {})",
            self.config.max_depth
        ))
    }

    pub(crate) fn is_type_word(&self, token: &Token) -> bool {
        token.is(TokenKind::LiteralOrId)
            && token
                .text
                .as_deref()
                .is_some_and(|word| self.config.is_type_name(word))
    }
}

/// Parse `text` with the default configuration.
pub fn parse(text: &str) -> ParseResult {
    parse_with(text, &ParserConfig::default())
}

/// Parse `text` with an explicit configuration.
pub fn parse_with(text: &str, config: &ParserConfig) -> ParseResult {
    debug!(expression = text, "parsing");
    Parser::new(Lexer::new(text), config).parse()
}
