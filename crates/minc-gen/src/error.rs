//! Error types for code generation.

use minc_util::Span;
use thiserror::Error;

/// Error type for assembly generation.
///
/// `NotAnLvalue` is the one user-facing failure (the parser accepts
/// `1 = 2`; address emission rejects it). Everything else signals a
/// compiler bug.
#[derive(Debug, Error)]
pub enum CodeGenError {
    /// Address requested of a node that does not designate storage.
    #[error("not an lvalue")]
    NotAnLvalue { span: Span },

    /// A node kind that cannot appear in statement position reached the
    /// statement emitter.
    #[error("internal error: invalid node in statement position")]
    InvalidStatement,
}

/// Result type alias for code generation.
pub type Result<T> = std::result::Result<T, CodeGenError>;
