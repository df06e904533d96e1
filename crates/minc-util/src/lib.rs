//! minc-util - Foundation types for the minc compiler.
//!
//! This crate provides the small, dependency-light building blocks shared by
//! every compiler phase:
//!
//! - [`span`] - byte-range source locations
//! - [`diagnostic`] - caret-style diagnostic rendering
//! - [`error`] - the fatal [`CompileError`] type all phases return
//! - [`index_vec`] - typed indices and index-addressed vectors, used to back
//!   the AST arena and the symbol table

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;

pub use diagnostic::render_snippet;
pub use error::{CompileError, CompileResult, ErrorKind};
pub use index_vec::{Idx, IndexVec};
pub use span::Span;

// Re-export the hash map used for name lookup tables.
pub use rustc_hash::FxHashMap;
