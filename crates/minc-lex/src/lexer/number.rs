//! Integer literal lexing.

use minc_util::CompileResult;

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a decimal integer literal.
    ///
    /// The lexeme is the maximal run of ASCII digits; the value is its
    /// base-10 interpretation.
    pub(crate) fn lex_number(&mut self) -> CompileResult<Token> {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        let value = text
            .parse::<i64>()
            .map_err(|_| self.error_at_start("integer literal overflow"))?;

        Ok(self.token(TokenKind::Num { value }))
    }
}
