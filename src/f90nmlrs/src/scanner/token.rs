// f90nmlrs/src/scanner/token.rs

//! Token types and structures for Fortran namelist lexical analysis.

use std::fmt;

/// A token in the Fortran namelist.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type of token
    pub token_type: TokenType,
    /// The raw text of the token
    pub lexeme: String,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, line: usize, column: usize) -> Self {
        Self {
            token_type,
            lexeme,
            line,
            column,
        }
    }

    /// Whether this token can start or continue a value list.
    pub fn is_literal(&self) -> bool {
        matches!(
            self.token_type,
            TokenType::Integer
                | TokenType::Real
                | TokenType::Logical
                | TokenType::String
                | TokenType::Identifier
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.token_type, self.lexeme)
    }
}

/// Types of tokens that can appear in a Fortran namelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// Namelist group start (&)
    GroupStart,
    /// Alternative group start and end ($)
    GroupStartAlt,
    /// Namelist group end (/)
    GroupEnd,
    /// Assignment operator (=)
    Assign,
    /// Comma separator (,)
    Comma,
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Colon (:)
    Colon,
    /// Percent sign (%)
    Percent,
    /// Repeat operator (*)
    Star,
    /// Identifier (variable names, group names, bare-word strings)
    Identifier,
    /// Integer literal
    Integer,
    /// Real number literal
    Real,
    /// Logical literal (.true., .false.)
    Logical,
    /// Quoted string literal
    String,
    /// Comment
    Comment,
    /// Whitespace
    Whitespace,
    /// End of file
    Eof,
    /// Invalid token
    Invalid,
}
