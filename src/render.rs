//! Canonical, fully parenthesized rendering of parse trees
//!
//! Every operator application is bracketed, so the output shows exactly how the
//! parser grouped the input and parses back to the same tree:
//!
//! | node                     | rendered as          |
//! |--------------------------|----------------------|
//! | literal or identifier    | its text             |
//! | dereference, address-of  | `*(x)`, `&(x)`       |
//! | typecast                 | `((type)x)`          |
//! | sizeof                   | `sizeof(text)`       |
//! | call, subscript          | `f(args)`, `a[i]`    |
//! | conditional              | `(c?t:e)`            |
//! | comma                    | `a,b`                |
//! | anything else            | `(left OP right)`    |
//!
//! A comma list is only left bare where a list is expected: at the root, as
//! call arguments, as a subscript, and as the left side of another comma.
//! Elsewhere it is wrapped in parentheses.

use std::fmt;

use crate::parser::ast::ParseTreeNode;
use crate::parser::lexer::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// A bare comma list reads correctly here.
    List,
    /// Operand of an operator.
    Operand,
    /// Left of `()`, `[]`, `.`, `->` or postfix `++`/`--`.
    PostfixBase,
}

/// Append the canonical form of `node` to `out`.
pub fn render(node: &ParseTreeNode, out: &mut String) {
    write_node(node, out, Position::List);
}

fn write_child(child: Option<&ParseTreeNode>, out: &mut String, position: Position) {
    if let Some(child) = child {
        write_node(child, out, position);
    }
}

fn write_node(node: &ParseTreeNode, out: &mut String, position: Position) {
    match node.op {
        TokenKind::LiteralOrId => out.push_str(node.text().unwrap_or_default()),

        // Prefix forms would capture the postfix operator that follows them.
        TokenKind::Dereference | TokenKind::Reference | TokenKind::Sizeof
            if position == Position::PostfixBase =>
        {
            out.push('(');
            write_node(node, out, Position::Operand);
            out.push(')');
        }

        TokenKind::Dereference | TokenKind::Reference => {
            // `a & &b` must not come out as `a&&b`.
            if node.op == TokenKind::Reference && out.ends_with('&') {
                out.push(' ');
            }
            out.push_str(node.op.display_name());
            out.push('(');
            write_child(node.right(), out, Position::Operand);
            out.push(')');
        }

        TokenKind::Sizeof => {
            out.push_str("sizeof(");
            out.push_str(node.text().unwrap_or_default());
            out.push(')');
        }

        TokenKind::Typecast => {
            out.push_str("((");
            out.push_str(node.text().unwrap_or_default());
            out.push(')');
            write_child(node.right(), out, Position::Operand);
            out.push(')');
        }

        TokenKind::Comma if position == Position::List => {
            write_child(node.left(), out, Position::List);
            out.push(',');
            write_child(node.right(), out, Position::Operand);
        }

        TokenKind::Comma => {
            out.push('(');
            write_node(node, out, Position::List);
            out.push(')');
        }

        TokenKind::FunctionCall | TokenKind::Subscript => {
            let (open, close) = if node.op == TokenKind::FunctionCall {
                ('(', ')')
            } else {
                ('[', ']')
            };
            write_child(node.left(), out, Position::PostfixBase);
            out.push(open);
            write_child(node.right(), out, Position::List);
            out.push(close);
        }

        TokenKind::Question if node.right().is_some_and(|r| r.op == TokenKind::Colon) => {
            let branches = node.right();
            out.push('(');
            write_child(node.left(), out, Position::Operand);
            out.push('?');
            write_child(branches.and_then(ParseTreeNode::left), out, Position::Operand);
            out.push(':');
            write_child(branches.and_then(ParseTreeNode::right), out, Position::Operand);
            out.push(')');
        }

        op => {
            let left_position = match op {
                TokenKind::Dot
                | TokenKind::Arrow
                | TokenKind::DoublePlus
                | TokenKind::DoubleMinus => Position::PostfixBase,
                _ => Position::Operand,
            };
            out.push('(');
            write_child(node.left(), out, left_position);
            out.push_str(op.display_name());
            write_child(node.right(), out, Position::Operand);
            out.push(')');
        }
    }
}

impl fmt::Display for ParseTreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        render(self, &mut out);
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn canonical(text: &str) -> String {
        parse(text).unwrap().to_string()
    }

    #[test]
    fn test_binary_operators_are_bracketed() {
        assert_eq!(canonical("a+b*c"), "(a+(b*c))");
        assert_eq!(canonical("a-b-c"), "((a-b)-c)");
        assert_eq!(canonical("a=b=c"), "(a=(b=c))");
        assert_eq!(canonical("x>>=1"), "(x>>=1)");
        assert_eq!(canonical("a && b || !c"), "((a&&b)||(!c))");
    }

    #[test]
    fn test_conditional() {
        assert_eq!(canonical("a?b:c"), "(a?b:c)");
        assert_eq!(canonical("a?b:c?d:e"), "(a?b:(c?d:e))");
        assert_eq!(canonical("a ? (b, c) : d"), "(a?(b,c):d)");
    }

    #[test]
    fn test_unary_forms() {
        assert_eq!(canonical("*p"), "*(p)");
        assert_eq!(canonical("&x"), "&(x)");
        assert_eq!(canonical("-x"), "(-x)");
        assert_eq!(canonical("x++"), "(x++)");
        assert_eq!(canonical("--x"), "(--x)");
        assert_eq!(canonical("**pp"), "*(*(pp))");
    }

    #[test]
    fn test_type_text_forms() {
        assert_eq!(canonical("(int)x"), "((int)x)");
        assert_eq!(canonical("(char *)p + 1"), "(((char *)p)+1)");
        assert_eq!(canonical("sizeof(int)"), "sizeof(int)");
        assert_eq!(canonical("sizeof x"), "sizeof(x)");
    }

    #[test]
    fn test_postfix_forms() {
        assert_eq!(canonical("a.b[c](d,e)"), "(a.b)[c](d,e)");
        assert_eq!(canonical("p->q"), "(p->q)");
        assert_eq!(canonical("f(a, b, c)"), "f(a,b,c)");
        assert_eq!(canonical("m[i][j]"), "m[i][j]");
    }

    #[test]
    fn test_prefix_form_as_postfix_base() {
        assert_eq!(canonical("(*p)[1]"), "(*(p))[1]");
        assert_eq!(canonical("(*p)++"), "((*(p))++)");
        assert_eq!(canonical("(&s)->x"), "((&(s))->x)");
        assert_eq!(canonical("*p[1]"), "*(p[1])");
    }

    #[test]
    fn test_comma_placement() {
        assert_eq!(canonical("a,b,c"), "a,b,c");
        assert_eq!(canonical("a,(b,c)"), "a,(b,c)");
        assert_eq!(canonical("(a,b)+c"), "((a,b)+c)");
        assert_eq!(canonical("x[i,j]"), "x[i,j]");
    }

    #[test]
    fn test_address_of_after_bitwise_and() {
        assert_eq!(canonical("a & &b"), "(a& &(b))");
        assert_eq!(canonical("a && &b"), "(a&& &(b))");
        assert_eq!(canonical("a&b"), "(a&b)");
    }

    #[test]
    fn test_render_appends() {
        let tree = parse("a+1").unwrap();
        let mut out = String::from("value: ");
        render(&tree, &mut out);
        assert_eq!(out, "value: (a+1)");
    }

    #[test]
    fn test_missing_sides_are_omitted() {
        let lone = ParseTreeNode {
            op: TokenKind::Plus,
            text: None,
            left: None,
            right: None,
        };
        assert_eq!(lone.to_string(), "(+)");
    }
}
