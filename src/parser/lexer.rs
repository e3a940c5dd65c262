//! Lexer (tokenizer) for C expressions
//!
//! Converts expression text into [`Token`]s on demand. The grammar engine pulls
//! one token at a time through the [`TokenSource`] trait, so any other token
//! stream (a debugger's own lexer, a pre-built vector) can stand in for
//! [`Lexer`].
//!
//! Identifiers and literals are not distinguished: both become
//! [`TokenKind::LiteralOrId`] carrying their source text verbatim.

use std::fmt;

use thiserror::Error;

/// Token and parse-tree node tags.
///
/// The last five variants never come out of the lexer. They are synthetic tags
/// the grammar engine gives to nodes that have no operator token of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    OpenParen,    // (
    CloseParen,   // )
    OpenBracket,  // [
    CloseBracket, // ]
    Comma,        // ,
    Question,     // ?
    Colon,        // :
    Dot,          // .
    Arrow,        // ->

    // Identifiers, numbers, character and string literals
    LiteralOrId,
    Sizeof,
    EndOfExpression,

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Increment/Decrement
    DoublePlus,  // ++
    DoubleMinus, // --

    // Bitwise
    Ampersand,  // &
    Bar,        // |
    Caret,      // ^
    Tilde,      // ~
    LeftShift,  // <<
    RightShift, // >>

    // Logical
    Bang,            // !
    DoubleAmpersand, // &&
    DoubleBar,       // ||

    // Comparison
    IsEqual,   // ==
    BangEqual, // !=
    Lt,        // <
    Gt,        // >
    Lte,       // <=
    Gte,       // >=

    // Assignment
    Assign,          // =
    PlusEqual,       // +=
    MinusEqual,      // -=
    StarEqual,       // *=
    SlashEqual,      // /=
    PercentEqual,    // %=
    AmpersandEqual,  // &=
    BarEqual,        // |=
    CaretEqual,      // ^=
    LeftShiftEqual,  // <<=
    RightShiftEqual, // >>=

    // Synthetic node tags
    Dereference,
    Reference,
    FunctionCall,
    Subscript,
    Typecast,
}

impl TokenKind {
    /// Canonical text of the tag, used in diagnostics and by the renderer.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Question => "?",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Arrow => "->",
            TokenKind::LiteralOrId => "literal or identifier",
            TokenKind::Sizeof => "sizeof",
            TokenKind::EndOfExpression => "end of expression",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::DoublePlus => "++",
            TokenKind::DoubleMinus => "--",
            TokenKind::Ampersand => "&",
            TokenKind::Bar => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::LeftShift => "<<",
            TokenKind::RightShift => ">>",
            TokenKind::Bang => "!",
            TokenKind::DoubleAmpersand => "&&",
            TokenKind::DoubleBar => "||",
            TokenKind::IsEqual => "==",
            TokenKind::BangEqual => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Lte => "<=",
            TokenKind::Gte => ">=",
            TokenKind::Assign => "=",
            TokenKind::PlusEqual => "+=",
            TokenKind::MinusEqual => "-=",
            TokenKind::StarEqual => "*=",
            TokenKind::SlashEqual => "/=",
            TokenKind::PercentEqual => "%=",
            TokenKind::AmpersandEqual => "&=",
            TokenKind::BarEqual => "|=",
            TokenKind::CaretEqual => "^=",
            TokenKind::LeftShiftEqual => "<<=",
            TokenKind::RightShiftEqual => ">>=",
            TokenKind::Dereference => "*",
            TokenKind::Reference => "&",
            TokenKind::FunctionCall => "function call",
            TokenKind::Subscript => "subscript",
            TokenKind::Typecast => "typecast",
        }
    }

    /// Simple and compound assignment operators.
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::PlusEqual
                | TokenKind::MinusEqual
                | TokenKind::StarEqual
                | TokenKind::SlashEqual
                | TokenKind::PercentEqual
                | TokenKind::AmpersandEqual
                | TokenKind::BarEqual
                | TokenKind::CaretEqual
                | TokenKind::LeftShiftEqual
                | TokenKind::RightShiftEqual
        )
    }

    /// Prefix operators that recurse into another unary expression.
    ///
    /// `sizeof` is handled separately because it never parses its operand.
    pub fn is_prefix_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Ampersand
                | TokenKind::Star
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Bang
                | TokenKind::Tilde
                | TokenKind::DoublePlus
                | TokenKind::DoubleMinus
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A single token: its kind, plus the source text for identifiers and literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Option<String>,
}

impl Token {
    /// A token with no text (operators, punctuation, end of expression).
    pub fn new(kind: TokenKind) -> Self {
        Self { kind, text: None }
    }

    /// A [`TokenKind::LiteralOrId`] token.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::LiteralOrId,
            text: Some(text.into()),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Source text if present, otherwise the kind's display name.
    pub fn lexeme(&self) -> &str {
        self.text.as_deref().unwrap_or(self.kind.display_name())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{} '{}'", self.kind, text),
            None if self.kind == TokenKind::EndOfExpression => write!(f, "{}", self.kind),
            None => write!(f, "'{}'", self.kind),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at offset {offset}: {message}")]
pub struct LexError {
    pub message: String,
    pub offset: usize,
}

/// Anything that can feed tokens to the grammar engine.
///
/// After the end of input an implementation must keep returning
/// [`TokenKind::EndOfExpression`].
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token, LexError>;
}

/// Pre-lexed tokens, e.g. from an external lexer.
impl TokenSource for std::vec::IntoIter<Token> {
    fn next_token(&mut self) -> Result<Token, LexError> {
        Ok(self
            .next()
            .unwrap_or_else(|| Token::new(TokenKind::EndOfExpression)))
    }
}

/// Lexer for C expressions
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given expression text.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input, including the trailing end-of-expression token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is(TokenKind::EndOfExpression);
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn lex(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let start = self.position;
        let Some(ch) = self.advance() else {
            return Ok(Token::new(TokenKind::EndOfExpression));
        };

        let kind = match ch {
            '"' | '\'' => return self.quoted_literal(ch, start),
            '0'..='9' => return Ok(self.number_literal(start)),
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => {
                return Ok(self.number_literal(start));
            }
            'a'..='z' | 'A'..='Z' | '_' => return Ok(self.identifier_or_keyword(start)),

            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            ',' => TokenKind::Comma,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            '~' => TokenKind::Tilde,
            '+' => self.select(&[('+', TokenKind::DoublePlus), ('=', TokenKind::PlusEqual)], TokenKind::Plus),
            '-' => self.select(
                &[
                    ('-', TokenKind::DoubleMinus),
                    ('=', TokenKind::MinusEqual),
                    ('>', TokenKind::Arrow),
                ],
                TokenKind::Minus,
            ),
            '*' => self.select(&[('=', TokenKind::StarEqual)], TokenKind::Star),
            '/' => self.select(&[('=', TokenKind::SlashEqual)], TokenKind::Slash),
            '%' => self.select(&[('=', TokenKind::PercentEqual)], TokenKind::Percent),
            '^' => self.select(&[('=', TokenKind::CaretEqual)], TokenKind::Caret),
            '!' => self.select(&[('=', TokenKind::BangEqual)], TokenKind::Bang),
            '=' => self.select(&[('=', TokenKind::IsEqual)], TokenKind::Assign),
            '&' => self.select(
                &[('&', TokenKind::DoubleAmpersand), ('=', TokenKind::AmpersandEqual)],
                TokenKind::Ampersand,
            ),
            '|' => self.select(&[('|', TokenKind::DoubleBar), ('=', TokenKind::BarEqual)], TokenKind::Bar),
            '<' => {
                if self.peek() == Some('<') {
                    self.advance();
                    self.select(&[('=', TokenKind::LeftShiftEqual)], TokenKind::LeftShift)
                } else {
                    self.select(&[('=', TokenKind::Lte)], TokenKind::Lt)
                }
            }
            '>' => {
                if self.peek() == Some('>') {
                    self.advance();
                    self.select(&[('=', TokenKind::RightShiftEqual)], TokenKind::RightShift)
                } else {
                    self.select(&[('=', TokenKind::Gte)], TokenKind::Gt)
                }
            }

            _ => {
                return Err(LexError {
                    message: format!("Unexpected character: '{}'", ch),
                    offset: start,
                })
            }
        };

        Ok(Token::new(kind))
    }

    /// Consume one more character if it matches an entry of `followers`.
    fn select(&mut self, followers: &[(char, TokenKind)], single: TokenKind) -> TokenKind {
        for &(next, kind) in followers {
            if self.peek() == Some(next) {
                self.advance();
                return kind;
            }
        }
        single
    }

    /// Character or string literal, kept verbatim including quotes and escapes.
    fn quoted_literal(&mut self, quote: char, start: usize) -> Result<Token, LexError> {
        while let Some(ch) = self.advance() {
            if ch == '\\' {
                if self.advance().is_none() {
                    break;
                }
            } else if ch == quote {
                return Ok(Token::literal(self.slice(start)));
            }
        }

        let what = if quote == '"' { "string" } else { "character" };
        Err(LexError {
            message: format!("Unterminated {} literal", what),
            offset: start,
        })
    }

    /// Preprocessing-number style literal: `12`, `0x1f`, `1.5e-3`, `10UL`.
    fn number_literal(&mut self, start: usize) -> Token {
        while let Some(ch) = self.peek() {
            if matches!(ch, 'e' | 'E' | 'p' | 'P')
                && matches!(self.peek_ahead(1), Some('+') | Some('-'))
            {
                self.advance();
                self.advance();
            } else if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
                self.advance();
            } else {
                break;
            }
        }
        Token::literal(self.slice(start))
    }

    fn identifier_or_keyword(&mut self, start: usize) -> Token {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let ident = self.slice(start);
        if ident == "sizeof" {
            Token::new(TokenKind::Sizeof)
        } else {
            Token::literal(ident)
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn slice(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Result<Token, LexError> {
        self.lex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = Lexer::new("f(a[1], b->c)").tokenize().unwrap();

        assert_eq!(tokens[0], Token::literal("f"));
        assert!(tokens[1].is(TokenKind::OpenParen));
        assert_eq!(tokens[2], Token::literal("a"));
        assert!(tokens[3].is(TokenKind::OpenBracket));
        assert_eq!(tokens[4], Token::literal("1"));
        assert!(tokens[5].is(TokenKind::CloseBracket));
        assert!(tokens[6].is(TokenKind::Comma));
        assert_eq!(tokens[7], Token::literal("b"));
        assert!(tokens[8].is(TokenKind::Arrow));
        assert_eq!(tokens[9], Token::literal("c"));
        assert!(tokens[10].is(TokenKind::CloseParen));
        assert!(tokens[11].is(TokenKind::EndOfExpression));
        assert_eq!(tokens.len(), 12);
    }

    #[test]
    fn test_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("++ -- += -= == != && || <<= >>= << >> <= >= &= |= ^= %= /= *="),
            vec![
                DoublePlus,
                DoubleMinus,
                PlusEqual,
                MinusEqual,
                IsEqual,
                BangEqual,
                DoubleAmpersand,
                DoubleBar,
                LeftShiftEqual,
                RightShiftEqual,
                LeftShift,
                RightShift,
                Lte,
                Gte,
                AmpersandEqual,
                BarEqual,
                CaretEqual,
                PercentEqual,
                SlashEqual,
                StarEqual,
                EndOfExpression,
            ]
        );
    }

    #[test]
    fn test_greedy_operators_without_spaces() {
        use TokenKind::*;
        assert_eq!(
            kinds("a&&&b"),
            vec![LiteralOrId, DoubleAmpersand, Ampersand, LiteralOrId, EndOfExpression]
        );
        assert_eq!(
            kinds("x--->y"),
            vec![LiteralOrId, DoubleMinus, Arrow, LiteralOrId, EndOfExpression]
        );
    }

    #[test]
    fn test_sizeof_is_keyword() {
        let tokens = Lexer::new("sizeof sizeofx").tokenize().unwrap();
        assert_eq!(tokens[0], Token::new(TokenKind::Sizeof));
        assert_eq!(tokens[1], Token::literal("sizeofx"));
    }

    #[test]
    fn test_number_literals() {
        let tokens = Lexer::new("0x1F 1.5e-3 10UL .5").tokenize().unwrap();
        let texts: Vec<_> = tokens.iter().filter_map(|t| t.text.as_deref()).collect();
        assert_eq!(texts, vec!["0x1F", "1.5e-3", "10UL", ".5"]);
    }

    #[test]
    fn test_quoted_literals_kept_verbatim() {
        let tokens = Lexer::new(r#"'\n' "a\"b""#).tokenize().unwrap();
        assert_eq!(tokens[0], Token::literal(r"'\n'"));
        assert_eq!(tokens[1], Token::literal(r#""a\"b""#));
    }

    #[test]
    fn test_end_is_sticky() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().unwrap(), Token::literal("x"));
        for _ in 0..3 {
            assert!(lexer.next_token().unwrap().is(TokenKind::EndOfExpression));
        }
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("a $ b").tokenize().unwrap_err();
        assert_eq!(err.offset, 2);
        assert!(err.message.contains("'$'"));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("\"abc").tokenize().unwrap_err();
        assert_eq!(err.message, "Unterminated string literal");
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::literal("x").to_string(), "literal or identifier 'x'");
        assert_eq!(Token::new(TokenKind::Colon).to_string(), "':'");
        assert_eq!(
            Token::new(TokenKind::EndOfExpression).to_string(),
            "end of expression"
        );
    }

    #[test]
    fn test_vec_source_ends_with_end_token() {
        let mut source = vec![Token::literal("a")].into_iter();
        assert_eq!(source.next_token().unwrap(), Token::literal("a"));
        assert!(source.next_token().unwrap().is(TokenKind::EndOfExpression));
        assert!(source.next_token().unwrap().is(TokenKind::EndOfExpression));
    }
}
