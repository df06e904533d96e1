//! minc-lex - Lexical analyzer.
//!
//! Transforms a source string into a finite token sequence with source
//! locations. The sequence always ends in exactly one EOF token; the first
//! unrecognized byte aborts lexing with an error instead of recovering.
//!
//! The main entry point is [`tokenize`]:
//!
//! ```
//! use minc_lex::tokenize;
//!
//! let tokens = tokenize("return 42;").unwrap();
//! assert_eq!(tokens.len(), 4); // return, 42, ;, EOF
//! ```

pub mod cursor;
#[cfg(test)]
mod edge_cases;
mod lexer;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{convert_keywords, is_keyword, Token, TokenKind, KEYWORDS};
