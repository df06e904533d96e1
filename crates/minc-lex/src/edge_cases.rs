//! Edge case tests for minc-lex.

#[cfg(test)]
mod tests {
    use crate::token::TokenKind;
    use crate::tokenize;

    fn lexemes(source: &str) -> Vec<String> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .filter(|t| !t.is_eof())
            .map(|t| t.lexeme)
            .collect()
    }

    #[test]
    fn test_edge_whitespace_only() {
        let tokens = tokenize(" \t\r\n \n ").unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
    }

    #[test]
    fn test_edge_comment_only() {
        let tokens = tokenize("// just a comment").unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
    }

    #[test]
    fn test_edge_long_identifier() {
        let name = "a".repeat(10_000);
        let tokens = tokenize(&name).unwrap();
        assert_eq!(tokens[0].lexeme, name);
        assert_eq!(tokens[0].span.len(), 10_000);
    }

    #[test]
    fn test_edge_adjacent_punctuators() {
        // Maximal munch: <= wins over < followed by =.
        assert_eq!(lexemes("<=="), vec!["<=", "="]);
        assert_eq!(lexemes(">>="), vec![">", ">="]);
        assert_eq!(lexemes("!==!"), vec!["!=", "=", "!"]);
    }

    #[test]
    fn test_edge_no_space_between_tokens() {
        assert_eq!(
            lexemes("int*p=&x;"),
            vec!["int", "*", "p", "=", "&", "x", ";"]
        );
    }

    #[test]
    fn test_edge_number_then_identifier() {
        assert_eq!(lexemes("1x"), vec!["1", "x"]);
    }

    #[test]
    fn test_edge_i64_max_literal() {
        let source = i64::MAX.to_string();
        let tokens = tokenize(&source).unwrap();
        assert_eq!(tokens[0].number(), Some(i64::MAX));
    }

    #[test]
    fn test_edge_just_past_i64_max_overflows() {
        let source = "9223372036854775808"; // i64::MAX + 1
        assert!(tokenize(source).is_err());
    }

    #[test]
    fn test_edge_string_with_every_simple_escape() {
        let tokens = tokenize(r#""\a\b\e\f\n\r\t\v\0\x7f""#).unwrap();
        match &tokens[0].kind {
            TokenKind::Str { bytes } => {
                assert_eq!(bytes, &[7, 8, 27, 12, 10, 13, 9, 11, 0, 0x7f, 0]);
            }
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_edge_string_adjacent_to_punctuator() {
        let tokens = tokenize(r#"("s")"#).unwrap();
        assert_eq!(tokens[0].lexeme, "(");
        assert!(matches!(tokens[1].kind, TokenKind::Str { .. }));
        assert_eq!(tokens[2].lexeme, ")");
    }

    #[test]
    fn test_edge_block_comment_hides_string_quote() {
        let tokens = tokenize(r#"1 /* " */ 2"#).unwrap();
        assert_eq!(tokens[0].number(), Some(1));
        assert_eq!(tokens[1].number(), Some(2));
    }

    #[test]
    fn test_edge_line_comment_inside_block_comment_is_inert() {
        let tokens = tokenize("/* // still block */ 5").unwrap();
        assert_eq!(tokens[0].number(), Some(5));
    }

    #[test]
    fn test_edge_slash_not_starting_comment() {
        assert_eq!(lexemes("a / b"), vec!["a", "/", "b"]);
    }

    #[test]
    fn test_edge_all_keywords_reclassified() {
        let tokens = tokenize("return if else while for int char sizeof").unwrap();
        for token in tokens.iter().filter(|t| !t.is_eof()) {
            assert_eq!(token.kind, TokenKind::Keyword, "{} not a keyword", token.lexeme);
        }
    }

    #[test]
    fn test_edge_underscore_only_identifier() {
        let tokens = tokenize("_ __ _1").unwrap();
        assert_eq!(tokens[0].lexeme, "_");
        assert_eq!(tokens[1].lexeme, "__");
        assert_eq!(tokens[2].lexeme, "_1");
        assert!(matches!(tokens[0].kind, TokenKind::Ident));
    }

    #[test]
    fn test_edge_crlf_counts_one_line() {
        let tokens = tokenize("a\r\nb").unwrap();
        assert_eq!(tokens[0].span.line, 1);
        assert_eq!(tokens[1].span.line, 2);
    }

    #[test]
    fn test_edge_unterminated_comment_at_last_byte() {
        let err = tokenize("x /*").unwrap_err();
        assert_eq!(err.message, "unterminated comment");
    }

    #[test]
    fn test_edge_star_slash_outside_comment() {
        assert_eq!(lexemes("a */ b"), vec!["a", "*", "/", "b"]);
    }
}
