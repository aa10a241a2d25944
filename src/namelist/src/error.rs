// src/error.rs

use crate::value::Value;
use f90nmlrs::F90nmlError;
use thiserror::Error;

/// Result type for namelist operations.
pub type Result<T> = std::result::Result<T, NamelistError>;

#[derive(Error, Debug)]
pub enum NamelistError {
    #[error("Attribute not found: {0}")]
    AttributeNotFound(String),

    #[error("Cannot write '{key}': expected a namelist group or a sequence of groups, found {found}")]
    Format { key: String, found: String },

    #[error("Invalid value for field '{field}': expected {expected}, found {found}")]
    InvalidFieldValue {
        field: String,
        expected: String,
        found: String,
    },

    #[error("Field '{0}' cannot be removed")]
    FieldNotRemovable(String),

    #[error("Refusing to overwrite existing key '{0}'")]
    DuplicateKey(String),

    #[error(transparent)]
    Codec(#[from] F90nmlError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NamelistError {
    /// A reserved field rejected `found` because it is not of type `expected`.
    pub fn invalid_field(field: &str, expected: &str, found: &Value) -> Self {
        NamelistError::InvalidFieldValue {
            field: field.to_string(),
            expected: expected.to_string(),
            found: found.type_name().to_string(),
        }
    }
}
