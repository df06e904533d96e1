//! The fatal compile error type shared by the lexer, parser, and annotator.

use thiserror::Error;

use crate::diagnostic::render_snippet;
use crate::span::Span;

/// Which phase rejected the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Lexical error (invalid token, unterminated string, ...).
    Lex,
    /// Syntax error (expected-but-got mismatches).
    Parse,
    /// Semantic error (undefined variable, invalid pointer arithmetic, ...).
    Semantic,
}

/// A fatal, user-facing compile error.
///
/// Every phase produces a full value or returns one of these; nothing is
/// caught or recovered from downstream. The driver renders it with
/// [`CompileError::render`] and exits nonzero.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
}

impl CompileError {
    /// A lexical error at `span`.
    pub fn lex(span: Span, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Lex,
            message: message.into(),
            span,
        }
    }

    /// A syntax error at `span`.
    pub fn parse(span: Span, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Parse,
            message: message.into(),
            span,
        }
    }

    /// A semantic error at `span`.
    pub fn semantic(span: Span, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Semantic,
            message: message.into(),
            span,
        }
    }

    /// Render the error as a caret diagnostic against the source it came from.
    pub fn render(&self, source: &str) -> String {
        render_snippet(source, self.span.start, &self.message)
    }
}

/// Result alias used throughout the front end.
pub type CompileResult<T> = std::result::Result<T, CompileError>;
