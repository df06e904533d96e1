//! Cursor over the lexed token sequence.
//!
//! The parser owns one [`TokenStream`] and reads it left-to-right with one
//! token of look-ahead. The position is a plain index into the immutable
//! token vector, so the tentative parse that distinguishes functions from
//! global variables saves and restores it in O(1).

use minc_lex::{Token, TokenKind};
use minc_util::{CompileError, CompileResult};

/// A peek-one-ahead cursor over tokens.
///
/// The token vector always ends in an EOF token; the cursor never advances
/// past it, so [`TokenStream::peek`] is total.
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    /// Create a stream over an EOF-terminated token sequence.
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(matches!(
            tokens.last().map(|t| &t.kind),
            Some(TokenKind::Eof)
        ));
        Self { tokens, pos: 0 }
    }

    /// The current token.
    pub fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Consume and return the current token.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// True if the current token's lexeme is `lexeme`.
    pub fn at(&self, lexeme: &str) -> bool {
        self.peek().is(lexeme)
    }

    /// True at the EOF token.
    pub fn at_eof(&self) -> bool {
        self.peek().is_eof()
    }

    /// Consume the current token if its lexeme is `lexeme`.
    pub fn eat(&mut self, lexeme: &str) -> bool {
        if self.at(lexeme) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token, failing if it is not `lexeme`.
    pub fn expect(&mut self, lexeme: &str) -> CompileResult<Token> {
        if self.at(lexeme) {
            Ok(self.advance())
        } else {
            let found = self.peek();
            let got = if found.is_eof() {
                "end of input".to_string()
            } else {
                format!("'{}'", found.lexeme)
            };
            Err(CompileError::parse(
                found.span,
                format!("expected '{}', got {}", lexeme, got),
            ))
        }
    }

    /// Consume a number token, failing with `expected number` otherwise.
    pub fn expect_number(&mut self) -> CompileResult<(i64, Token)> {
        match self.peek().number() {
            Some(value) => Ok((value, self.advance())),
            None => Err(CompileError::parse(self.peek().span, "expected number")),
        }
    }

    /// Current position, for save/restore around tentative parses.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Restore a previously saved position.
    pub fn rewind(&mut self, pos: usize) {
        debug_assert!(pos <= self.pos);
        self.pos = pos;
    }
}
