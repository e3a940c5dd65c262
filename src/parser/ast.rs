// Parse tree definitions for C expressions

use super::lexer::TokenKind;

/// A node of the expression tree.
///
/// The shape depends on `op`:
/// - [`TokenKind::LiteralOrId`]: no children, `text` holds the lexeme
/// - prefix operators, [`TokenKind::Dereference`], [`TokenKind::Reference`]:
///   only `right`
/// - postfix `++`/`--`: only `left`
/// - [`TokenKind::Sizeof`]: no children, `text` holds the raw operand text
/// - [`TokenKind::Typecast`]: `text` holds the type name, `right` the operand
/// - everything else (binary, assignment, comma, member access, call,
///   subscript): both children
///
/// A conditional `c ? t : e` is a [`TokenKind::Question`] node whose right child
/// is a [`TokenKind::Colon`] node pairing `t` and `e`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTreeNode {
    pub op: TokenKind,
    pub text: Option<String>,
    pub left: Option<Box<ParseTreeNode>>,
    pub right: Option<Box<ParseTreeNode>>,
}

impl ParseTreeNode {
    pub fn terminal(text: impl Into<String>) -> Self {
        Self {
            op: TokenKind::LiteralOrId,
            text: Some(text.into()),
            left: None,
            right: None,
        }
    }

    /// Prefix form: operator applied to `operand`, stored on the right.
    pub fn unary(op: TokenKind, operand: ParseTreeNode) -> Self {
        Self {
            op,
            text: None,
            left: None,
            right: Some(Box::new(operand)),
        }
    }

    /// Postfix `++`/`--`: operand stored on the left.
    pub fn postfix(op: TokenKind, operand: ParseTreeNode) -> Self {
        Self {
            op,
            text: None,
            left: Some(Box::new(operand)),
            right: None,
        }
    }

    pub fn binary(op: TokenKind, left: ParseTreeNode, right: ParseTreeNode) -> Self {
        Self {
            op,
            text: None,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn sizeof(type_text: impl Into<String>) -> Self {
        Self {
            op: TokenKind::Sizeof,
            text: Some(type_text.into()),
            left: None,
            right: None,
        }
    }

    pub fn typecast(type_text: impl Into<String>, operand: ParseTreeNode) -> Self {
        Self {
            op: TokenKind::Typecast,
            text: Some(type_text.into()),
            left: None,
            right: Some(Box::new(operand)),
        }
    }

    /// `cond ? then : otherwise`
    pub fn conditional(cond: ParseTreeNode, then: ParseTreeNode, otherwise: ParseTreeNode) -> Self {
        Self::binary(
            TokenKind::Question,
            cond,
            Self::binary(TokenKind::Colon, then, otherwise),
        )
    }

    pub fn is_terminal(&self) -> bool {
        self.op == TokenKind::LiteralOrId
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn left(&self) -> Option<&ParseTreeNode> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&ParseTreeNode> {
        self.right.as_deref()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.left().map_or(0, ParseTreeNode::node_count)
            + self.right().map_or(0, ParseTreeNode::node_count)
    }

    /// Height of this subtree; a lone terminal has depth 1.
    pub fn depth(&self) -> usize {
        let left = self.left().map_or(0, ParseTreeNode::depth);
        let right = self.right().map_or(0, ParseTreeNode::depth);
        1 + left.max(right)
    }
}
