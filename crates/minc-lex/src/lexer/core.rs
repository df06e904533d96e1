//! Core lexer implementation.

use minc_util::{CompileError, CompileResult, Span};

use crate::cursor::Cursor;
use crate::token::{convert_keywords, Token, TokenKind};

/// Lexer for the accepted C subset.
///
/// Transforms source text into a token sequence. Recognition priority:
/// comments and whitespace are skipped, then string literals, number
/// literals, identifiers, and punctuators are tried in that order. Any
/// other byte is an `invalid token` error; the lexer never recovers.
pub struct Lexer<'a> {
    /// Character cursor over the source.
    pub(crate) cursor: Cursor<'a>,
    /// Byte offset where the current token starts.
    pub(crate) token_start: usize,
    /// Line where the current token starts (1-based).
    pub(crate) token_line: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            token_start: 0,
            token_line: 1,
        }
    }

    /// Returns the next token, or [`TokenKind::Eof`] at end of input.
    pub fn next_token(&mut self) -> CompileResult<Token> {
        self.skip_whitespace_and_comments()?;

        self.token_start = self.cursor.position();
        self.token_line = self.cursor.line();

        if self.cursor.is_at_end() {
            return Ok(self.token(TokenKind::Eof));
        }

        match self.cursor.current_char() {
            '"' => self.lex_string(),
            c if c.is_ascii_digit() => self.lex_number(),
            c if c.is_ascii_alphabetic() || c == '_' => Ok(self.lex_identifier()),
            _ => self.lex_punct(),
        }
    }

    /// Builds a token spanning from `token_start` to the cursor.
    pub(crate) fn token(&self, kind: TokenKind) -> Token {
        let span = self.token_span();
        Token::new(kind, self.cursor.slice_from(self.token_start), span)
    }

    /// The span of the token currently being lexed.
    pub(crate) fn token_span(&self) -> Span {
        Span::new(self.token_start, self.cursor.position(), self.token_line)
    }

    /// A lex error anchored at the current token start.
    pub(crate) fn error_at_start(&self, message: impl Into<String>) -> CompileError {
        CompileError::lex(
            Span::point(self.token_start, self.token_line),
            message,
        )
    }

    /// A lex error anchored at the current cursor position.
    pub(crate) fn error_here(&self, message: impl Into<String>) -> CompileError {
        CompileError::lex(
            Span::point(self.cursor.position(), self.cursor.line()),
            message,
        )
    }
}

/// Tokenize an entire translation unit.
///
/// Returns the full token sequence ending in exactly one EOF token, with
/// keyword reclassification already applied, or the first lexical error.
pub fn tokenize(source: &str) -> CompileResult<Vec<Token>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        let done = token.is_eof();
        tokens.push(token);
        if done {
            break;
        }
    }

    convert_keywords(&mut tokens);
    Ok(tokens)
}
