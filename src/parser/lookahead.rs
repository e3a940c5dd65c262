//! Token stream with a two-token pushback buffer
//!
//! The grammar engine occasionally reads a token it cannot use yet (the end of
//! a postfix chain, the token after `(` that decides between a cast and a
//! parenthesized expression). It hands such tokens back with
//! [`TokenStream::push_back`] and they are returned again, most recent first.

use smallvec::SmallVec;
use tracing::trace;

use super::lexer::{LexError, Token, TokenSource};

/// Maximum number of tokens that may be pushed back at once.
pub const PUSHBACK_CAPACITY: usize = 2;

pub struct TokenStream<S> {
    source: S,
    pushed_back: SmallVec<[Token; PUSHBACK_CAPACITY]>,
}

impl<S: TokenSource> TokenStream<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pushed_back: SmallVec::new(),
        }
    }

    /// Next token: the most recently pushed-back one, else a fresh one from the source.
    pub fn next(&mut self) -> Result<Token, LexError> {
        match self.pushed_back.pop() {
            Some(token) => Ok(token),
            None => self.source.next_token(),
        }
    }

    /// Return a token to the stream.
    ///
    /// # Panics
    ///
    /// If the buffer already holds [`PUSHBACK_CAPACITY`] tokens. Malformed input
    /// cannot cause this; only a grammar rule that looks too far ahead can.
    pub fn push_back(&mut self, token: Token) {
        if self.pushed_back.len() == PUSHBACK_CAPACITY {
            panic!(
                "programmer error: pushed back too many tokens (capacity {}, pushing {})",
                PUSHBACK_CAPACITY, token
            );
        }
        trace!(token = %token, "push back");
        self.pushed_back.push(token);
    }

    pub fn pending(&self) -> usize {
        self.pushed_back.len()
    }
}
