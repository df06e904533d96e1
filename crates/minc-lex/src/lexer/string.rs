//! String literal lexing and escape decoding.

use minc_util::CompileResult;

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a double-quoted string literal.
    ///
    /// Decodes backslash escapes into bytes and appends the terminating
    /// NUL, so the payload of `"abc"` is `[97, 98, 99, 0]`. The token's
    /// lexeme is the raw source text including both quotes. A newline or
    /// end-of-input before the closing quote is an `unterminated string`
    /// error.
    pub(crate) fn lex_string(&mut self) -> CompileResult<Token> {
        self.cursor.advance();

        let mut bytes = Vec::new();

        loop {
            if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
                return Err(self.error_at_start("unterminated string"));
            }

            let c = self.cursor.current_char();

            if c == '"' {
                self.cursor.advance();
                break;
            }

            if c == '\\' {
                self.cursor.advance();
                bytes.push(self.read_escape()?);
            } else {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                self.cursor.advance();
            }
        }

        bytes.push(0);
        Ok(self.token(TokenKind::Str { bytes }))
    }

    /// Decodes one escape sequence (cursor is just past the backslash).
    fn read_escape(&mut self) -> CompileResult<u8> {
        let c = self.cursor.current_char();

        // Octal: up to three digits form one byte.
        if ('0'..='7').contains(&c) {
            let mut value = 0u32;
            let mut digits = 0;
            while digits < 3 {
                let d = self.cursor.current_char();
                if !('0'..='7').contains(&d) {
                    break;
                }
                value = (value << 3) | (d as u32 - '0' as u32);
                self.cursor.advance();
                digits += 1;
            }
            return Ok(value as u8);
        }

        // Hex: all consecutive digits form one byte; at least one required.
        if c == 'x' {
            self.cursor.advance();
            if !self.cursor.current_char().is_ascii_hexdigit() {
                return Err(self.error_here("expected hex digit"));
            }
            let mut value = 0u32;
            while self.cursor.current_char().is_ascii_hexdigit() {
                let d = self.cursor.current_char().to_digit(16).unwrap();
                value = (value << 4) | d;
                self.cursor.advance();
            }
            return Ok(value as u8);
        }

        self.cursor.advance();
        Ok(match c {
            'a' => 7,
            'b' => 8,
            'f' => 12,
            'n' => 10,
            'r' => 13,
            't' => 9,
            'v' => 11,
            'e' => 27,
            other => other as u8,
        })
    }
}
