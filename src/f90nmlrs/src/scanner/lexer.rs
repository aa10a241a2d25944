// f90nmlrs/src/scanner/lexer.rs

//! Low-level lexical analysis for Fortran namelist tokens.

use super::token::{Token, TokenType};
use crate::error::{F90nmlError, Result};

/// Low-level lexer for Fortran namelist tokens.
pub struct Lexer {
    input: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
    comment_tokens: Vec<char>,
}

impl Lexer {
    /// Create a new lexer for the given input.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
            comment_tokens: vec!['!', '#'],
        }
    }

    /// Set comment tokens (default: ['!', '#']).
    pub fn with_comment_tokens(mut self, tokens: Vec<char>) -> Self {
        self.comment_tokens = tokens;
        self
    }

    /// Scan every token up to and including `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan_token()?;
            let is_eof = token.token_type == TokenType::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    /// Scan the next token.
    pub fn scan_token(&mut self) -> Result<Token> {
        let line = self.line;
        let column = self.column;
        let start = self.current;

        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::new(TokenType::Eof, String::new(), line, column)),
        };

        if c.is_whitespace() {
            while self.peek().map_or(false, char::is_whitespace) {
                self.advance();
            }
            return Ok(self.token_from(TokenType::Whitespace, start, line, column));
        }

        self.advance();
        let token_type = match c {
            '&' => TokenType::GroupStart,
            '$' => TokenType::GroupStartAlt,
            '/' => TokenType::GroupEnd,
            '=' => TokenType::Assign,
            ',' => TokenType::Comma,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            ':' => TokenType::Colon,
            '%' => TokenType::Percent,
            '*' => TokenType::Star,
            '\'' | '"' => {
                self.scan_string(c, line, column)?;
                TokenType::String
            }
            '+' | '-' => self.scan_signed(),
            '.' => self.scan_dot(),
            _ if c.is_ascii_digit() => self.scan_number(),
            _ if c.is_ascii_alphabetic() || c == '_' => {
                while self
                    .peek()
                    .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
                {
                    self.advance();
                }
                TokenType::Identifier
            }
            _ if self.comment_tokens.contains(&c) => {
                while self.peek().map_or(false, |c| c != '\n') {
                    self.advance();
                }
                TokenType::Comment
            }
            _ => TokenType::Invalid,
        };

        Ok(self.token_from(token_type, start, line, column))
    }

    fn token_from(&self, token_type: TokenType, start: usize, line: usize, column: usize) -> Token {
        let lexeme: String = self.input[start..self.current].iter().collect();
        Token::new(token_type, lexeme, line, column)
    }

    fn scan_signed(&mut self) -> TokenType {
        match (self.peek(), self.peek_ahead(1)) {
            (Some(c), _) if c.is_ascii_digit() => self.scan_number(),
            (Some('.'), Some(d)) if d.is_ascii_digit() => {
                self.advance();
                self.scan_number();
                TokenType::Real
            }
            _ => TokenType::Invalid,
        }
    }

    /// Scan the remainder of a numeric literal.
    ///
    /// The first digit (or sign) has already been consumed.
    fn scan_number(&mut self) -> TokenType {
        let mut is_real = false;
        self.skip_digits();

        if self.peek() == Some('.') && self.dot_continues_number() {
            is_real = true;
            self.advance();
            self.skip_digits();
        }

        if self.at_exponent() {
            is_real = true;
            self.advance();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }
            self.skip_digits();
        }

        // Kind specifier, e.g. 1.0_dp or 42_8
        if self.peek() == Some('_') {
            self.advance();
            while self
                .peek()
                .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
            {
                self.advance();
            }
        }

        if is_real {
            TokenType::Real
        } else {
            TokenType::Integer
        }
    }

    /// A '.' after digits belongs to the number unless it opens a dotted
    /// word such as `.true.`.
    fn dot_continues_number(&self) -> bool {
        match self.peek_ahead(1) {
            Some(c) if c.is_ascii_alphabetic() => {
                matches!(c, 'e' | 'E' | 'd' | 'D')
                    && self
                        .peek_ahead(2)
                        .map_or(false, |n| n.is_ascii_digit() || n == '+' || n == '-')
            }
            _ => true,
        }
    }

    fn at_exponent(&self) -> bool {
        matches!(self.peek(), Some('e' | 'E' | 'd' | 'D'))
            && match self.peek_ahead(1) {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => self.peek_ahead(2).map_or(false, |c| c.is_ascii_digit()),
                _ => false,
            }
    }

    fn skip_digits(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn scan_dot(&mut self) -> TokenType {
        if self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.scan_number();
            return TokenType::Real;
        }

        if !self.peek().map_or(false, |c| c.is_ascii_alphabetic()) {
            return TokenType::Invalid;
        }

        let word_start = self.current;
        while self.peek().map_or(false, |c| c.is_ascii_alphabetic()) {
            self.advance();
        }
        let word: String = self.input[word_start..self.current]
            .iter()
            .collect::<String>()
            .to_lowercase();
        if self.peek() == Some('.') {
            self.advance();
        }

        if word.starts_with('t') || word.starts_with('f') {
            TokenType::Logical
        } else {
            TokenType::Invalid
        }
    }

    /// Scan to the closing quote; a quoted string may span lines.
    fn scan_string(&mut self, quote: char, line: usize, column: usize) -> Result<()> {
        loop {
            match self.peek() {
                None => {
                    return Err(F90nmlError::invalid_syntax(
                        "Unterminated string literal",
                        line,
                        column,
                    ));
                }
                Some(c) if c == quote => {
                    self.advance();
                    // A doubled quote is an escaped quote
                    if self.peek() == Some(quote) {
                        self.advance();
                    } else {
                        return Ok(());
                    }
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.current).copied()
    }

    fn peek_ahead(&self, distance: usize) -> Option<char> {
        self.input.get(self.current + distance).copied()
    }
}
