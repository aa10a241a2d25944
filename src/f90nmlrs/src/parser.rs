// f90nmlrs/src/parser.rs

//! Token-level parser building a [`Namelist`] document.
//!
//! Text outside of groups is ignored. Each `&name ... /` (or
//! `$name ... $end`) group becomes a nested [`Namelist`] in the document;
//! a group name seen twice turns into an array of groups.

use crate::error::{F90nmlError, Result};
use crate::findex::{IndexRange, MAX_ARRAY_LEN};
use crate::fortran_types::{
    parse_character, parse_integer, parse_logical, parse_real, FortranValue,
};
use crate::namelist::Namelist;
use crate::scanner::{scan, Token, TokenType};

/// One `name` or `name(index)` step of an assignment target such as
/// `species(2)%mass`.
#[derive(Debug, Clone, PartialEq)]
struct Segment {
    name: String,
    index: Option<IndexRange>,
}

/// Parser over the significant tokens of a namelist text.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// Scan `input` and prepare a parser over its tokens.
    pub fn new(input: &str) -> Result<Self> {
        Ok(Self {
            tokens: scan(input)?,
            current: 0,
        })
    }

    /// Parse every group of the input.
    pub fn parse(&mut self) -> Result<Namelist> {
        let mut document = Namelist::new();

        while !self.is_at_end() {
            if self.check(TokenType::GroupStart) || self.check(TokenType::GroupStartAlt) {
                let (name, group) = self.parse_group()?;
                log::trace!("parsed group '{}' with {} entries", name, group.len());
                document.push_group(&name, group);
            } else {
                self.advance();
            }
        }

        Ok(document)
    }

    fn parse_group(&mut self) -> Result<(String, Namelist)> {
        let start = self.advance_token()?;
        let name = match self.peek() {
            Some(token) if token.token_type == TokenType::Identifier => token.lexeme.to_lowercase(),
            Some(token) => {
                return Err(F90nmlError::parse_error(
                    "Expected group name",
                    token.line,
                    token.column,
                ))
            }
            None => {
                return Err(F90nmlError::parse_error(
                    "Expected group name",
                    start.line,
                    start.column,
                ))
            }
        };
        self.advance();

        let mut group = Namelist::new();
        loop {
            let token = match self.peek() {
                Some(token) => token.clone(),
                None => return Err(F90nmlError::UnexpectedEof),
            };

            match token.token_type {
                TokenType::GroupEnd => {
                    self.advance();
                    break;
                }
                TokenType::GroupStart | TokenType::GroupStartAlt => {
                    // `&end`, `$end` or a lone `$` closes the group
                    self.advance();
                    if self.peek().map_or(false, |t| {
                        t.token_type == TokenType::Identifier && t.lexeme.eq_ignore_ascii_case("end")
                    }) {
                        self.advance();
                    } else if token.token_type == TokenType::GroupStart {
                        return Err(F90nmlError::parse_error(
                            format!("Group '{}' is not terminated", name),
                            token.line,
                            token.column,
                        ));
                    }
                    break;
                }
                TokenType::Identifier => self.parse_assignment(&mut group)?,
                _ => {
                    return Err(F90nmlError::parse_error(
                        format!("Unexpected token '{}' in group '{}'", token.lexeme, name),
                        token.line,
                        token.column,
                    ))
                }
            }
        }

        Ok((name, group))
    }

    fn parse_assignment(&mut self, group: &mut Namelist) -> Result<()> {
        let path = self.parse_target()?;

        let token = self.advance_token()?;
        if token.token_type != TokenType::Assign {
            return Err(F90nmlError::parse_error(
                format!("Expected '=' after '{}'", path_name(&path)),
                token.line,
                token.column,
            ));
        }

        let values = self.parse_values()?;
        assign(group, &path, values)
    }

    /// Parse `name[(index)][%name[(index)]...]`.
    fn parse_target(&mut self) -> Result<Vec<Segment>> {
        let mut path = Vec::new();
        loop {
            let token = self.advance_token()?;
            if token.token_type != TokenType::Identifier {
                return Err(F90nmlError::parse_error(
                    "Expected variable name",
                    token.line,
                    token.column,
                ));
            }
            let name = token.lexeme.to_lowercase();

            let index = if self.check(TokenType::LeftParen) {
                self.advance();
                Some(self.parse_index(&name)?)
            } else {
                None
            };
            path.push(Segment { name, index });

            if self.check(TokenType::Percent) {
                self.advance();
            } else {
                return Ok(path);
            }
        }
    }

    /// Parse `i`, `i:j`, `i:j:s`, `:` after the opening parenthesis.
    fn parse_index(&mut self, variable: &str) -> Result<IndexRange> {
        let mut parts: Vec<Option<i64>> = vec![None];
        loop {
            let token = self.advance_token()?;
            match token.token_type {
                TokenType::Integer => {
                    let value = parse_integer(&token.lexeme)?.as_integer()?;
                    if let Some(last) = parts.last_mut() {
                        *last = Some(value);
                    }
                }
                TokenType::Colon if parts.len() < 3 => parts.push(None),
                TokenType::RightParen => break,
                TokenType::Comma => {
                    return Err(F90nmlError::invalid_index(
                        variable,
                        "",
                        "multidimensional indices are not supported",
                    ))
                }
                _ => {
                    return Err(F90nmlError::parse_error(
                        format!("Invalid index for '{}'", variable),
                        token.line,
                        token.column,
                    ))
                }
            }
        }

        Ok(match parts.as_slice() {
            [single] => match single {
                Some(index) => IndexRange::single(*index),
                None => {
                    return Err(F90nmlError::invalid_index(variable, "()", "empty index"));
                }
            },
            [start, end] => IndexRange::new(*start, *end, None),
            [start, end, stride] => IndexRange::new(*start, *end, *stride),
            _ => unreachable!("at most three index parts are collected"),
        })
    }

    /// Parse the comma-separated value list after `=`.
    ///
    /// The list ends at the next assignment target or group terminator.
    /// An empty slot between commas (or before the first comma) is a null
    /// value; a trailing comma adds nothing.
    fn parse_values(&mut self) -> Result<Vec<FortranValue>> {
        let mut values = Vec::new();
        let mut expecting_value = true;

        loop {
            if self.at_value_list_end() {
                return Ok(values);
            }
            let token = match self.peek() {
                Some(token) => token.clone(),
                None => return Ok(values),
            };

            if token.token_type == TokenType::Comma {
                self.advance();
                if expecting_value {
                    values.push(FortranValue::Null);
                }
                expecting_value = true;
                continue;
            }

            if !expecting_value {
                return Err(F90nmlError::invalid_syntax(
                    format!("Expected ',' before '{}'", token.lexeme),
                    token.line,
                    token.column,
                ));
            }

            if token.token_type == TokenType::Integer && self.peek_type(1) == Some(TokenType::Star)
            {
                self.advance();
                self.advance();
                let count: usize = token.lexeme.parse().map_err(|_| {
                    F90nmlError::invalid_syntax(
                        format!("Invalid repeat count '{}'", token.lexeme),
                        token.line,
                        token.column,
                    )
                })?;
                if count > MAX_ARRAY_LEN.saturating_sub(values.len()) {
                    return Err(F90nmlError::invalid_syntax(
                        format!(
                            "Repeat count {} exceeds the limit of {} values",
                            count, MAX_ARRAY_LEN
                        ),
                        token.line,
                        token.column,
                    ));
                }
                let value = if self.at_value_start() {
                    self.parse_value()?
                } else {
                    FortranValue::Null
                };
                values.try_reserve(count).map_err(|e| {
                    F90nmlError::invalid_syntax(e.to_string(), token.line, token.column)
                })?;
                values.extend(std::iter::repeat(value).take(count));
            } else {
                values.push(self.parse_value()?);
            }
            expecting_value = false;
        }
    }

    fn parse_value(&mut self) -> Result<FortranValue> {
        let token = self.advance_token()?;
        match token.token_type {
            TokenType::Integer => parse_integer(&token.lexeme),
            TokenType::Real => parse_real(&token.lexeme),
            TokenType::Logical => parse_logical(&token.lexeme),
            TokenType::String => Ok(parse_character(&token.lexeme)),
            TokenType::Identifier => {
                Ok(parse_logical(&token.lexeme)
                    .unwrap_or_else(|_| FortranValue::Character(token.lexeme.clone())))
            }
            TokenType::LeftParen => self.parse_complex(&token),
            _ => Err(F90nmlError::invalid_syntax(
                format!("Unexpected '{}' in value list", token.lexeme),
                token.line,
                token.column,
            )),
        }
    }

    /// Parse the remainder of `(re, im)`.
    fn parse_complex(&mut self, open: &Token) -> Result<FortranValue> {
        let re = self.complex_part(open)?;
        self.expect_in_complex(TokenType::Comma, open)?;
        let im = self.complex_part(open)?;
        self.expect_in_complex(TokenType::RightParen, open)?;
        Ok(FortranValue::Complex(re, im))
    }

    fn complex_part(&mut self, open: &Token) -> Result<f64> {
        let token = self.advance_token()?;
        match token.token_type {
            TokenType::Integer | TokenType::Real => parse_real(&token.lexeme)?.as_real(),
            _ => Err(malformed_complex(open)),
        }
    }

    fn expect_in_complex(&mut self, token_type: TokenType, open: &Token) -> Result<()> {
        if self.advance_token()?.token_type == token_type {
            Ok(())
        } else {
            Err(malformed_complex(open))
        }
    }

    fn at_value_start(&self) -> bool {
        match self.peek() {
            Some(token) if token.token_type == TokenType::LeftParen => true,
            Some(token) if token.is_literal() => !self.at_target_start(),
            _ => false,
        }
    }

    fn at_value_list_end(&self) -> bool {
        match self.peek_type(0) {
            None
            | Some(TokenType::GroupEnd)
            | Some(TokenType::GroupStart)
            | Some(TokenType::GroupStartAlt)
            | Some(TokenType::Eof) => true,
            Some(TokenType::Identifier) => self.at_target_start(),
            _ => false,
        }
    }

    /// An identifier followed by `=`, `(` or `%` starts the next assignment.
    fn at_target_start(&self) -> bool {
        self.peek_type(0) == Some(TokenType::Identifier)
            && matches!(
                self.peek_type(1),
                Some(TokenType::Assign | TokenType::LeftParen | TokenType::Percent)
            )
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.peek_type(0) == Some(token_type)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens
            .get(self.current)
            .filter(|t| t.token_type != TokenType::Eof)
    }

    fn peek_type(&self, distance: usize) -> Option<TokenType> {
        self.tokens.get(self.current + distance).map(|t| t.token_type)
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    fn advance_token(&mut self) -> Result<Token> {
        let token = self.peek().cloned().ok_or(F90nmlError::UnexpectedEof)?;
        self.current += 1;
        Ok(token)
    }
}

fn malformed_complex(open: &Token) -> F90nmlError {
    F90nmlError::invalid_syntax("Malformed complex value", open.line, open.column)
}

fn path_name(path: &[Segment]) -> String {
    path.iter()
        .map(|s| match &s.index {
            Some(index) => format!("{}({})", s.name, index),
            None => s.name.clone(),
        })
        .collect::<Vec<_>>()
        .join("%")
}

/// Collapse a value list into the stored value.
fn collapse(mut values: Vec<FortranValue>) -> FortranValue {
    match values.len() {
        0 => FortranValue::Null,
        1 => values.remove(0),
        _ => FortranValue::Array(values),
    }
}

/// Take the value stored under `name` as a list of elements, leaving a
/// placeholder so the entry keeps its position.
fn take_elements(group: &mut Namelist, name: &str) -> Vec<FortranValue> {
    match group.get_mut(name) {
        Some(slot) => match std::mem::replace(slot, FortranValue::Null) {
            FortranValue::Array(values) => values,
            FortranValue::Null => Vec::new(),
            other => vec![other],
        },
        None => Vec::new(),
    }
}

/// Grow `elements` with nulls until `position` is addressable.
fn pad_to(elements: &mut Vec<FortranValue>, name: &str, position: usize) -> Result<()> {
    if elements.len() > position {
        return Ok(());
    }
    let missing = position + 1 - elements.len();
    elements.try_reserve(missing).map_err(|e| {
        let index = (position + 1).to_string();
        F90nmlError::invalid_index(name, index.as_str(), e.to_string().as_str())
    })?;
    elements.resize(position + 1, FortranValue::Null);
    Ok(())
}

fn assign(group: &mut Namelist, path: &[Segment], values: Vec<FortranValue>) -> Result<()> {
    let (segment, rest) = match path.split_first() {
        Some(split) => split,
        None => return Ok(()),
    };

    match (&segment.index, rest.is_empty()) {
        (None, true) => {
            group.insert_value(&segment.name, collapse(values));
        }
        (None, false) => {
            assign(group.insert_group(&segment.name), rest, values)?;
        }
        (Some(index), true) => {
            let values = if values.is_empty() {
                vec![FortranValue::Null]
            } else {
                values
            };
            let positions = index.positions(&segment.name, 1, values.len())?;
            let mut elements = take_elements(group, &segment.name);
            for (position, value) in positions.into_iter().zip(values) {
                pad_to(&mut elements, &segment.name, position)?;
                elements[position] = value;
            }
            group.insert_value(&segment.name, collapse(elements));
        }
        (Some(index), false) => {
            let position = match index.positions(&segment.name, 1, 1)?.as_slice() {
                [position] if index.is_single() => *position,
                _ => {
                    return Err(F90nmlError::invalid_index(
                        segment.name.as_str(),
                        index.to_string().as_str(),
                        "derived-type arrays take a single index",
                    ))
                }
            };
            let mut elements = take_elements(group, &segment.name);
            for element in elements.iter_mut().filter(|e| !e.is_group()) {
                *element = FortranValue::Null;
            }
            pad_to(&mut elements, &segment.name, position)?;
            if !elements[position].is_group() {
                elements[position] = FortranValue::Group(Namelist::new());
            }
            if let Some(inner) = elements[position].as_group_mut() {
                assign(inner, rest, values)?;
            }
            group.insert_value(&segment.name, collapse(elements));
        }
    }
    Ok(())
}
