// src/value.rs

//! Values stored in a [`Namelist`].

use crate::namelist::Namelist;
use f90nmlrs::FortranValue;
use linked_hash_map::LinkedHashMap;

/// A namelist value.
///
/// `Map` is an input form only: [`coerce`] turns it into a nested
/// [`Namelist`] before anything is stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value set.
    #[default]
    Absent,
    Integer(i64),
    Real(f64),
    Complex(f64, f64),
    Logical(bool),
    Character(String),
    Sequence(Vec<Value>),
    Map(LinkedHashMap<String, Value>),
    Namelist(Box<Namelist>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Complex(_, _) => "complex",
            Value::Logical(_) => "logical",
            Value::Character(_) => "character",
            Value::Sequence(_) => "sequence",
            Value::Map(_) => "map",
            Value::Namelist(_) => "namelist",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// `None` for [`Value::Absent`], the value otherwise.
    pub fn into_option(self) -> Option<Value> {
        match self {
            Value::Absent => None,
            value => Some(value),
        }
    }

    pub fn as_namelist(&self) -> Option<&Namelist> {
        match self {
            Value::Namelist(namelist) => Some(namelist),
            _ => None,
        }
    }

    pub fn as_namelist_mut(&mut self) -> Option<&mut Namelist> {
        match self {
            Value::Namelist(namelist) => Some(namelist),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Character(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Logical(b) => Some(*b),
            _ => None,
        }
    }
}

/// Wrap plain mappings as nested namelists, recursing into sequences.
///
/// Every value stored in a namelist passes through here.
pub fn coerce(value: Value) -> Value {
    match value {
        Value::Map(map) => Value::Namelist(Box::new(Namelist::from_map(map))),
        Value::Sequence(values) => Value::Sequence(values.into_iter().map(coerce).collect()),
        value => value,
    }
}

macro_rules! impl_from_scalar {
    ($variant:ident, $cast:ty, $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::$variant(value as $cast)
                }
            }
        )*
    };
}

impl_from_scalar!(Integer, i64, i32, i64, u32);
impl_from_scalar!(Real, f64, f32, f64);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Logical(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Character(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Character(value.to_string())
    }
}

impl From<(f64, f64)> for Value {
    fn from((re, im): (f64, f64)) -> Self {
        Value::Complex(re, im)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Absent, Into::into)
    }
}

impl From<LinkedHashMap<String, Value>> for Value {
    fn from(map: LinkedHashMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<Namelist> for Value {
    fn from(namelist: Namelist) -> Self {
        Value::Namelist(Box::new(namelist))
    }
}

/// Decoded codec values; groups arrive as plain mappings.
impl From<FortranValue> for Value {
    fn from(value: FortranValue) -> Self {
        match value {
            FortranValue::Integer(i) => Value::Integer(i),
            FortranValue::Real(f) => Value::Real(f),
            FortranValue::Complex(re, im) => Value::Complex(re, im),
            FortranValue::Logical(b) => Value::Logical(b),
            FortranValue::Character(s) => Value::Character(s),
            FortranValue::Array(values) => {
                Value::Sequence(values.into_iter().map(Value::from).collect())
            }
            FortranValue::Group(group) => Value::Map(
                group
                    .into_iter()
                    .map(|(name, value)| (name, Value::from(value)))
                    .collect(),
            ),
            FortranValue::Null => Value::Absent,
        }
    }
}

// Rejected values are handed back to the caller.

impl TryFrom<Value> for i64 {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Integer(i) => Ok(i),
            other => Err(other),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Real(f) => Ok(f),
            Value::Integer(i) => Ok(i as f64),
            other => Err(other),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Logical(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Character(s) => Ok(s),
            other => Err(other),
        }
    }
}
