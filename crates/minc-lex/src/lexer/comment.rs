//! Whitespace and comment skipping.

use minc_util::CompileResult;

use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Skips whitespace, line comments, and block comments.
    ///
    /// Called before lexing each token. Block comments do not nest: the
    /// first `*/` closes the comment.
    pub(crate) fn skip_whitespace_and_comments(&mut self) -> CompileResult<()> {
        loop {
            if self.cursor.is_at_end() {
                return Ok(());
            }

            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.cursor.advance();
                }
                '/' => match self.cursor.peek_char(1) {
                    '/' => self.skip_line_comment(),
                    '*' => self.skip_block_comment()?,
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    /// Skips from `//` to the end of the line.
    fn skip_line_comment(&mut self) {
        self.cursor.advance();
        self.cursor.advance();

        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }

    /// Skips a `/* ... */` block comment.
    fn skip_block_comment(&mut self) -> CompileResult<()> {
        let open = self.cursor.position();
        let open_line = self.cursor.line();
        self.cursor.advance();
        self.cursor.advance();

        while !self.cursor.is_at_end() {
            if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                self.cursor.advance();
                self.cursor.advance();
                return Ok(());
            }
            self.cursor.advance();
        }

        Err(minc_util::CompileError::lex(
            minc_util::Span::point(open, open_line),
            "unterminated comment",
        ))
    }
}
