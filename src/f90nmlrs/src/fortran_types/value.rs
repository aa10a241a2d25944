// f90nmlrs/src/fortran_types/value.rs

//! Core FortranValue enum and basic operations.

use crate::error::{F90nmlError, Result};
use crate::namelist::Namelist;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a Fortran value that can appear in a namelist.
///
/// A value is either a scalar, a rank-1 array, or a nested group. Nested
/// groups appear at the top level of a document as namelist groups and
/// inside groups as derived types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FortranValue {
    /// Integer value
    Integer(i64),

    /// Real (floating-point) value
    Real(f64),

    /// Complex value (real, imaginary)
    Complex(f64, f64),

    /// Logical (boolean) value
    Logical(bool),

    /// Character string
    Character(String),

    /// Array of values
    Array(Vec<FortranValue>),

    /// Namelist group, or derived type when nested inside a group
    Group(Namelist),

    /// Null/unset value
    Null,
}

impl FortranValue {
    /// Create a new character value.
    pub fn character<S: Into<String>>(value: S) -> Self {
        FortranValue::Character(value.into())
    }

    /// Get the type name as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            FortranValue::Integer(_) => "integer",
            FortranValue::Real(_) => "real",
            FortranValue::Complex(_, _) => "complex",
            FortranValue::Logical(_) => "logical",
            FortranValue::Character(_) => "character",
            FortranValue::Array(_) => "array",
            FortranValue::Group(_) => "group",
            FortranValue::Null => "null",
        }
    }

    /// Check if this value is a group.
    pub fn is_group(&self) -> bool {
        matches!(self, FortranValue::Group(_))
    }

    /// Check if this value is an array whose elements are all groups.
    ///
    /// This is how repeated namelist groups and derived-type arrays are
    /// represented.
    pub fn is_group_array(&self) -> bool {
        match self {
            FortranValue::Array(values) => {
                !values.is_empty()
                    && values
                        .iter()
                        .all(|v| matches!(v, FortranValue::Group(_) | FortranValue::Null))
                    && values.iter().any(FortranValue::is_group)
            }
            _ => false,
        }
    }

    fn conversion_error(&self, to: &str) -> F90nmlError {
        F90nmlError::TypeConversion {
            from: self.type_name().to_string(),
            to: to.to_string(),
            value: self.summary(),
        }
    }

    /// Try to convert to an integer.
    pub fn as_integer(&self) -> Result<i64> {
        match self {
            FortranValue::Integer(i) => Ok(*i),
            FortranValue::Real(f)
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 =>
            {
                Ok(*f as i64)
            }
            _ => Err(self.conversion_error("integer")),
        }
    }

    /// Try to convert to a real number.
    pub fn as_real(&self) -> Result<f64> {
        match self {
            FortranValue::Real(f) => Ok(*f),
            FortranValue::Integer(i) => Ok(*i as f64),
            _ => Err(self.conversion_error("real")),
        }
    }

    /// Try to convert to a complex number.
    pub fn as_complex(&self) -> Result<(f64, f64)> {
        match self {
            FortranValue::Complex(r, i) => Ok((*r, *i)),
            FortranValue::Real(f) => Ok((*f, 0.0)),
            FortranValue::Integer(i) => Ok((*i as f64, 0.0)),
            _ => Err(self.conversion_error("complex")),
        }
    }

    /// Try to convert to a logical value.
    pub fn as_logical(&self) -> Result<bool> {
        match self {
            FortranValue::Logical(b) => Ok(*b),
            _ => Err(self.conversion_error("logical")),
        }
    }

    /// Try to convert to a string.
    pub fn as_character(&self) -> Result<&str> {
        match self {
            FortranValue::Character(s) => Ok(s),
            _ => Err(self.conversion_error("character")),
        }
    }

    /// Try to convert to an array.
    pub fn as_array(&self) -> Result<&[FortranValue]> {
        match self {
            FortranValue::Array(arr) => Ok(arr),
            _ => Err(self.conversion_error("array")),
        }
    }

    /// Try to convert to a group.
    pub fn as_group(&self) -> Result<&Namelist> {
        match self {
            FortranValue::Group(group) => Ok(group),
            _ => Err(self.conversion_error("group")),
        }
    }

    /// Get a mutable reference to the group, if this is one.
    pub fn as_group_mut(&mut self) -> Option<&mut Namelist> {
        match self {
            FortranValue::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Get a summary of this value for debugging/logging.
    pub fn summary(&self) -> String {
        match self {
            FortranValue::Integer(i) => format!("integer({})", i),
            FortranValue::Real(f) => format!("real({:.6})", f),
            FortranValue::Complex(r, i) => format!("complex({:.3}, {:.3})", r, i),
            FortranValue::Logical(b) => format!("logical({})", b),
            FortranValue::Character(s) => {
                let preview = if s.chars().count() > 20 {
                    format!("{}...", s.chars().take(17).collect::<String>())
                } else {
                    s.clone()
                };
                format!("character(\"{}\")", preview)
            }
            FortranValue::Array(arr) => format!("array[{}]", arr.len()),
            FortranValue::Group(group) => format!("group({} entries)", group.len()),
            FortranValue::Null => "null".to_string(),
        }
    }
}

impl fmt::Display for FortranValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::fortran_types::formatting::FormatOptions;
        write!(
            f,
            "{}",
            self.to_fortran_string_with_options(&FormatOptions::default())
        )
    }
}
