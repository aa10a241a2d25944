// f90nmlrs/src/error.rs

//! Error types for the f90nml library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for f90nml operations.
pub type Result<T> = std::result::Result<T, F90nmlError>;

/// Errors that can occur when parsing or writing Fortran namelists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum F90nmlError {
    /// I/O error when reading or writing files
    #[error("I/O error: {0}")]
    Io(String),

    /// Parse error with position and message
    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    /// Invalid syntax in the namelist
    #[error("Invalid syntax at line {line}, column {column}: {message}")]
    InvalidSyntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// Unexpected end of file
    #[error("Unexpected end of file")]
    UnexpectedEof,

    /// Invalid value for a variable
    #[error("Invalid value '{value}' for variable '{variable}'. Expected type: {expected_type}")]
    InvalidValue {
        variable: String,
        value: String,
        expected_type: String,
    },

    /// Invalid array index
    #[error("Invalid index '{index}' for variable '{variable}': {message}")]
    InvalidIndex {
        variable: String,
        index: String,
        message: String,
    },

    /// Type conversion error
    #[error("Cannot convert '{value}' from {from} to {to}")]
    TypeConversion {
        from: String,
        to: String,
        value: String,
    },

    /// File already exists (when force=false)
    #[error("File already exists: {}", .0.display())]
    FileAlreadyExists(PathBuf),

    /// A value cannot be written in the requested position
    #[error("Invalid format for '{name}': {message}")]
    InvalidFormat { name: String, message: String },

    /// Serialization/deserialization error
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<io::Error> for F90nmlError {
    fn from(err: io::Error) -> Self {
        F90nmlError::Io(err.to_string())
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for F90nmlError {
    fn from(err: serde_json::Error) -> Self {
        F90nmlError::Json(err.to_string())
    }
}

impl F90nmlError {
    /// Create a new parse error.
    pub fn parse_error<S: Into<String>>(message: S, line: usize, column: usize) -> Self {
        F90nmlError::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create a new invalid syntax error.
    pub fn invalid_syntax<S: Into<String>>(message: S, line: usize, column: usize) -> Self {
        F90nmlError::InvalidSyntax {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create a new invalid value error.
    pub fn invalid_value<S: Into<String>>(variable: S, value: S, expected_type: S) -> Self {
        F90nmlError::InvalidValue {
            variable: variable.into(),
            value: value.into(),
            expected_type: expected_type.into(),
        }
    }

    /// Create a new invalid index error.
    pub fn invalid_index<S: Into<String>>(variable: S, index: S, message: S) -> Self {
        F90nmlError::InvalidIndex {
            variable: variable.into(),
            index: index.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid format error.
    pub fn invalid_format<S: Into<String>>(name: S, message: S) -> Self {
        F90nmlError::InvalidFormat {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Get the error category for grouping similar errors.
    pub fn category(&self) -> &'static str {
        match self {
            F90nmlError::Io(_) | F90nmlError::FileAlreadyExists(_) => "io",
            F90nmlError::Parse { .. }
            | F90nmlError::InvalidSyntax { .. }
            | F90nmlError::UnexpectedEof => "parsing",
            F90nmlError::InvalidValue { .. }
            | F90nmlError::InvalidIndex { .. }
            | F90nmlError::TypeConversion { .. } => "value",
            F90nmlError::InvalidFormat { .. } => "format",
            #[cfg(feature = "json")]
            F90nmlError::Json(_) => "serialization",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = F90nmlError::parse_error("Unexpected token", 10, 5);
        assert_eq!(
            err.to_string(),
            "Parse error at line 10, column 5: Unexpected token"
        );

        let err = F90nmlError::invalid_value("x", "abc", "integer");
        assert_eq!(
            err.to_string(),
            "Invalid value 'abc' for variable 'x'. Expected type: integer"
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(F90nmlError::UnexpectedEof.category(), "parsing");
        assert_eq!(
            F90nmlError::invalid_index("x", "0", "out of range").category(),
            "value"
        );
        assert_eq!(
            F90nmlError::invalid_format("nstep", "not a group").category(),
            "format"
        );
        let io_err: F90nmlError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(io_err.category(), "io");
    }
}
