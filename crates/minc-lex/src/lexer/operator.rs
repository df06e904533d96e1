//! Punctuator lexing.

use minc_util::CompileResult;

use crate::token::{Token, TokenKind};
use crate::Lexer;

/// Two-character operators, tried before single characters.
const TWO_CHAR_PUNCTS: &[&str] = &["==", "!=", "<=", ">="];

impl<'a> Lexer<'a> {
    /// Lexes a punctuator.
    ///
    /// The two-character operators `==` `!=` `<=` `>=` take precedence;
    /// otherwise any single printable ASCII character is a one-character
    /// punctuator. Anything else is an `invalid token` error.
    pub(crate) fn lex_punct(&mut self) -> CompileResult<Token> {
        let first = self.cursor.current_char();
        let second = self.cursor.peek_char(1);

        let mut pair = String::with_capacity(2);
        pair.push(first);
        pair.push(second);
        if TWO_CHAR_PUNCTS.contains(&pair.as_str()) {
            self.cursor.advance();
            self.cursor.advance();
            return Ok(self.token(TokenKind::Punct));
        }

        if first.is_ascii_graphic() {
            self.cursor.advance();
            return Ok(self.token(TokenKind::Punct));
        }

        Err(self.error_here("invalid token"))
    }
}
