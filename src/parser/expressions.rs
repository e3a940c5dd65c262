//! Expression grammar
//!
//! One method per precedence tier, loosest first:
//!
//! ```text
//! comma → assignment → ternary → binary tiers (|| … * / %) → unary → primary/postfix
//! ```
//!
//! The ten binary tiers share a single routine indexed into [`BINARY_TIERS`];
//! running off the end of the table drops into unary parsing. Unary parsing
//! also recognises `sizeof` and casts. Both collect their parenthesized type
//! name as raw text instead of parsing it, and a cast is only assumed when the
//! word after `(` is a configured type name.
//!
//! All parsing methods are implemented as `pub(crate)` or private methods on the
//! [`Parser`] struct.

use crate::parser::arena::NodeId;
use crate::parser::lexer::{Token, TokenKind, TokenSource};
use crate::parser::parser::{ParseError, Parser};

use TokenKind::*;

/// Binary operators, loosest-binding tier first. All tiers are left-associative.
pub const BINARY_TIERS: [&[TokenKind]; 10] = [
    &[DoubleBar],
    &[DoubleAmpersand],
    &[Bar],
    &[Caret],
    &[Ampersand],
    &[IsEqual, BangEqual],
    &[Lt, Gt, Lte, Gte],
    &[LeftShift, RightShift],
    &[Plus, Minus],
    &[Star, Slash, Percent],
];

impl<S: TokenSource> Parser<'_, S> {
    /// Parse a comma-separated chain of assignment expressions.
    ///
    /// Inside brackets the list must end at `)`, `]` or the end of input, which
    /// is left for the caller. At top level it ends at the first token that
    /// cannot continue it, and the entry point reports that token.
    pub(crate) fn parse_comma(&mut self, top_level: bool) -> Result<NodeId, ParseError> {
        let mut node = self.parse_assignment()?;

        loop {
            let token = self.next()?;
            if matches!(token.kind, EndOfExpression | CloseParen | CloseBracket) {
                self.push_back(token);
                return Ok(node);
            }
            if !token.is(Comma) {
                if top_level {
                    self.push_back(token);
                    return Ok(node);
                }
                return Err(ParseError::new(format!("Expected comma, found {}", token)));
            }

            let right = self.parse_assignment()?;
            node = self.make_node(Comma, Some(node), Some(right))?;
        }
    }

    /// Parse assignment or ternary (right-associative)
    fn parse_assignment(&mut self) -> Result<NodeId, ParseError> {
        self.nested(|p| {
            let node = p.parse_ternary()?;

            let token = p.next()?;
            if !token.kind.is_assignment() {
                p.push_back(token);
                return Ok(node);
            }

            let right = p.parse_assignment()?;
            p.make_node(token.kind, Some(node), Some(right))
        })
    }

    /// Parse ternary: condition ? then : else
    ///
    /// Both branches re-enter ternary parsing, so `a ? b : c ? d : e` nests to
    /// the right.
    fn parse_ternary(&mut self) -> Result<NodeId, ParseError> {
        self.nested(|p| {
            let condition = p.parse_binary(0)?;

            let token = p.next()?;
            if !token.is(Question) {
                p.push_back(token);
                return Ok(condition);
            }

            let then = p.parse_ternary()?;
            let token = p.next()?;
            if !token.is(Colon) {
                return Err(ParseError::new(format!(
                    "Missing : in ?: ternary op (found {})",
                    token
                )));
            }
            let otherwise = p.parse_ternary()?;

            let branches = p.make_node(Colon, Some(then), Some(otherwise))?;
            p.make_node(Question, Some(condition), Some(branches))
        })
    }

    /// Parse the binary tier `level` and everything that binds tighter.
    fn parse_binary(&mut self, level: usize) -> Result<NodeId, ParseError> {
        let Some(operators) = BINARY_TIERS.get(level) else {
            return self.parse_unary();
        };

        let mut node = self.parse_binary(level + 1)?;
        loop {
            let token = self.next()?;
            if !operators.contains(&token.kind) {
                self.push_back(token);
                return Ok(node);
            }

            let right = self.parse_binary(level + 1)?;
            node = self.make_node(token.kind, Some(node), Some(right))?;
        }
    }

    /// Parse unary (& * + - ! ~ ++ -- sizeof, casts)
    fn parse_unary(&mut self) -> Result<NodeId, ParseError> {
        self.nested(|p| {
            let token = p.next()?;

            match token.kind {
                Sizeof => p.parse_sizeof(),
                kind if kind.is_prefix_operator() => {
                    let operand = p.parse_unary()?;
                    let op = match kind {
                        Star => Dereference,
                        Ampersand => Reference,
                        other => other,
                    };
                    p.make_node(op, None, Some(operand))
                }
                OpenParen => {
                    let next = p.next()?;
                    if !p.is_type_word(&next) {
                        // Not a cast: re-read both tokens as a parenthesized expression.
                        p.push_back(next);
                        p.push_back(token);
                        return p.parse_primary();
                    }

                    let type_name = p.parse_type_name(next)?;
                    let operand = p.parse_unary()?;
                    let node = p.make_node(Typecast, None, Some(operand))?;
                    p.arena.set_text(node, type_name);
                    Ok(node)
                }
                _ => {
                    p.push_back(token);
                    p.parse_primary()
                }
            }
        })
    }

    /// `sizeof(type words)` or `sizeof operand`; the operand is never parsed.
    fn parse_sizeof(&mut self) -> Result<NodeId, ParseError> {
        let token = self.next()?;
        let text = if token.is(OpenParen) {
            let first = self.next()?;
            self.parse_type_name(first)?
        } else {
            match token.text {
                Some(text) => text,
                None => {
                    return Err(ParseError::new(format!(
                        "Expected operand after sizeof, found {}",
                        Token::new(token.kind)
                    )))
                }
            }
        };

        let node = self.make_node(Sizeof, None, None)?;
        self.arena.set_text(node, text);
        Ok(node)
    }

    /// Collect tokens up to the `)` matching an already consumed `(`.
    ///
    /// `first` is the token right after the `(`. The lexemes are joined with
    /// single spaces; the closing `)` is consumed.
    fn parse_type_name(&mut self, first: Token) -> Result<String, ParseError> {
        let mut type_name = String::new();
        let mut open = 0usize;
        let mut token = first;

        loop {
            match token.kind {
                EndOfExpression => {
                    return Err(ParseError::new(
                        "Found end of expression when parsing (assumed) type name",
                    ));
                }
                CloseParen if open == 0 => {
                    if type_name.is_empty() {
                        return Err(ParseError::new("Expected type name, found ')'"));
                    }
                    return Ok(type_name);
                }
                CloseParen => open -= 1,
                OpenParen => open += 1,
                _ => {}
            }

            if !type_name.is_empty() {
                type_name.push(' ');
            }
            type_name.push_str(token.lexeme());
            token = self.next()?;
        }
    }

    /// Parse primary (identifier, literal, parenthesized expression) and any
    /// postfix operators after it (() [] . -> ++ --)
    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        let token = self.next()?;
        let mut node = match token.kind {
            OpenParen => {
                let inner = self.parse_comma(false)?;
                let close = self.next()?;
                if !close.is(CloseParen) {
                    return Err(ParseError::new(format!(
                        "Missing ) parsing parenthesized expression, found {}",
                        close
                    )));
                }
                inner
            }
            LiteralOrId => self.make_terminal(token),
            _ => {
                return Err(ParseError::new(format!(
                    "Unable to parse primary expression (found {})",
                    token
                )));
            }
        };

        loop {
            let token = self.next()?;
            match token.kind {
                OpenParen | OpenBracket => {
                    let (close, op) = if token.is(OpenParen) {
                        (CloseParen, FunctionCall)
                    } else {
                        (CloseBracket, Subscript)
                    };
                    let inner = self.parse_comma(false)?;
                    let found = self.next()?;
                    if !found.is(close) {
                        return Err(ParseError::new(format!("Missing {}, found {}", close, found)));
                    }
                    node = self.make_node(op, Some(node), Some(inner))?;
                }
                Dot | Arrow => {
                    let member = self.next()?;
                    if !member.is(LiteralOrId) {
                        return Err(ParseError::new(format!(
                            "Expected identifier after '{}', found {}",
                            token.kind, member
                        )));
                    }
                    let member = self.make_terminal(member);
                    node = self.make_node(token.kind, Some(node), Some(member))?;
                }
                DoublePlus | DoubleMinus => {
                    node = self.make_node(token.kind, Some(node), None)?;
                }
                _ => {
                    // Not part of this postfix chain.
                    self.push_back(token);
                    return Ok(node);
                }
            }
        }
    }
}
