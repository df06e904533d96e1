//! Lexer module.
//!
//! The lexer implementation is split into focused components:
//! - `core` - main `Lexer` struct, dispatch, and the `tokenize` entry point
//! - `comment` - whitespace and comment skipping
//! - `identifier` - identifier lexing
//! - `number` - integer literal lexing
//! - `string` - string literal lexing and escape decoding
//! - `operator` - punctuator lexing

mod comment;
mod core;
mod identifier;
mod number;
mod operator;
mod string;

pub use core::{tokenize, Lexer};
