// f90nmlrs/src/scanner/mod.rs

//! Lexical scanner for Fortran namelist files.
//!
//! The lexer emits every token including whitespace and comments; the
//! [`scan`] helper drops those for parsing.

pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenType};

use crate::error::Result;

/// Scan a string into tokens, dropping whitespace and comments.
pub fn scan(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Lexer::new(input).tokenize()?;
    tokens.retain(|t| !matches!(t.token_type, TokenType::Whitespace | TokenType::Comment));
    Ok(tokens)
}

/// Scan a string preserving all tokens including whitespace and comments.
pub fn scan_with_whitespace(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(input: &str) -> Vec<TokenType> {
        scan(input).unwrap().into_iter().map(|t| t.token_type).collect()
    }

    #[test]
    fn test_scan_simple_namelist() {
        assert_eq!(
            types("&data_nml x=1 y=2.0 z=.true. /"),
            vec![
                TokenType::GroupStart,
                TokenType::Identifier,
                TokenType::Identifier,
                TokenType::Assign,
                TokenType::Integer,
                TokenType::Identifier,
                TokenType::Assign,
                TokenType::Real,
                TokenType::Identifier,
                TokenType::Assign,
                TokenType::Logical,
                TokenType::GroupEnd,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_scan_numbers() {
        let tokens = scan("42 3.14 1.23e4 1.23d-5 2_real64 -7 +.5 4184.d0").unwrap();
        let pairs: Vec<_> = tokens
            .iter()
            .map(|t| (t.token_type, t.lexeme.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (TokenType::Integer, "42"),
                (TokenType::Real, "3.14"),
                (TokenType::Real, "1.23e4"),
                (TokenType::Real, "1.23d-5"),
                (TokenType::Integer, "2_real64"),
                (TokenType::Integer, "-7"),
                (TokenType::Real, "+.5"),
                (TokenType::Real, "4184.d0"),
                (TokenType::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_scan_repeat_and_complex() {
        assert_eq!(
            types("3*1.0 (1.0, -2.0)"),
            vec![
                TokenType::Integer,
                TokenType::Star,
                TokenType::Real,
                TokenType::LeftParen,
                TokenType::Real,
                TokenType::Comma,
                TokenType::Real,
                TokenType::RightParen,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_scan_strings() {
        let tokens = scan(r#"'hello' "world" 'don''t'"#).unwrap();
        assert_eq!(tokens[0].lexeme, "'hello'");
        assert_eq!(tokens[1].lexeme, "\"world\"");
        assert_eq!(tokens[2].lexeme, "'don''t'");
        assert!(tokens[..3].iter().all(|t| t.token_type == TokenType::String));
    }

    #[test]
    fn test_string_may_span_lines() {
        let tokens = scan("x = 'line1\nline2' y = 2").unwrap();
        assert_eq!(tokens[2].lexeme, "'line1\nline2'");
        assert_eq!(tokens[2].token_type, TokenType::String);
        assert_eq!(tokens[3].line, 2);
    }

    #[test]
    fn test_unterminated_string_is_error() {
        assert!(scan("x = 'oops\n/").is_err());
    }

    #[test]
    fn test_scan_logicals() {
        let tokens = scan(".true. .false. .T. .F.").unwrap();
        assert!(tokens[..4].iter().all(|t| t.token_type == TokenType::Logical));
    }

    #[test]
    fn test_scan_derived_type_target() {
        assert_eq!(
            types("a(2)%b = 1"),
            vec![
                TokenType::Identifier,
                TokenType::LeftParen,
                TokenType::Integer,
                TokenType::RightParen,
                TokenType::Percent,
                TokenType::Identifier,
                TokenType::Assign,
                TokenType::Integer,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_scan_comments_preserved_on_request() {
        let tokens = scan_with_whitespace("x=1 ! This is a comment\ny=2").unwrap();
        let comment = tokens
            .iter()
            .find(|t| t.token_type == TokenType::Comment)
            .expect("Should find comment token");
        assert_eq!(comment.lexeme, "! This is a comment");
        assert!(scan("x=1 ! c").unwrap().iter().all(|t| t.token_type != TokenType::Comment));
    }

    #[test]
    fn test_line_column_tracking() {
        let tokens = scan("x=1\n  y=2").unwrap();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        let y = tokens.iter().find(|t| t.lexeme == "y").unwrap();
        assert_eq!((y.line, y.column), (2, 3));
    }
}
