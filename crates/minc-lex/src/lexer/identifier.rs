//! Identifier lexing.
//!
//! Identifiers start with an ASCII letter or underscore and continue with
//! alphanumerics or underscores. Keyword reclassification happens later,
//! in a pass over the finished token sequence.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an identifier (maximal run of `[A-Za-z0-9_]`).
    pub(crate) fn lex_identifier(&mut self) -> Token {
        loop {
            let c = self.cursor.current_char();
            if c.is_ascii_alphanumeric() || c == '_' {
                self.cursor.advance();
            } else {
                break;
            }
        }

        self.token(TokenKind::Ident)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::tokenize;
    use crate::token::TokenKind;

    #[test]
    fn test_plain_identifier() {
        let tokens = tokenize("foo bar_2 _x").unwrap();
        assert_eq!(tokens[0].lexeme, "foo");
        assert_eq!(tokens[1].lexeme, "bar_2");
        assert_eq!(tokens[2].lexeme, "_x");
        assert!(tokens[..3]
            .iter()
            .all(|t| matches!(t.kind, TokenKind::Ident)));
    }

    #[test]
    fn test_keywords_reclassified() {
        let tokens = tokenize("sizeof while forx").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].kind, TokenKind::Keyword);
        // "forx" is not the keyword "for".
        assert_eq!(tokens[2].kind, TokenKind::Ident);
    }

    #[test]
    fn test_identifier_with_digits() {
        let tokens = tokenize("a1b2").unwrap();
        assert_eq!(tokens[0].lexeme, "a1b2");
        assert_eq!(tokens.len(), 2);
    }
}
