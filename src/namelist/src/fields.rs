// src/fields.rs

//! Reserved (declared) fields of a namelist.
//!
//! A namelist flavour declares a fixed set of field names by installing a
//! struct that implements [`ReservedFields`]. Those names are stored on
//! the struct, never in the dynamic mapping, and are written after the
//! dynamic entries when the namelist is flattened.

use crate::error::{NamelistError, Result};
use crate::value::Value;
use std::any::Any;
use std::fmt;

pub trait ReservedFields: fmt::Debug + Send + Sync {
    /// Declared names, in output order.
    fn field_names(&self) -> &'static [&'static str];

    /// Current value of a declared field, `None` when `name` is not declared.
    fn get_field(&self, name: &str) -> Option<Value>;

    /// Update a declared field in place.
    ///
    /// Implementations reject values of the wrong type with
    /// [`NamelistError::InvalidFieldValue`].
    fn set_field(&mut self, name: &str, value: Value) -> Result<()>;

    /// Reset a declared field to [`Value::Absent`].
    ///
    /// Override to refuse removal with [`NamelistError::FieldNotRemovable`].
    fn remove_field(&mut self, name: &str) -> Result<()> {
        self.set_field(name, Value::Absent)
    }

    fn clone_box(&self) -> Box<dyn ReservedFields>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn is_reserved(&self, name: &str) -> bool {
        self.field_names().contains(&name)
    }
}

impl Clone for Box<dyn ReservedFields> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// No reserved fields at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFields;

impl ReservedFields for NoFields {
    fn field_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn get_field(&self, _name: &str) -> Option<Value> {
        None
    }

    fn set_field(&mut self, name: &str, _value: Value) -> Result<()> {
        Err(NamelistError::AttributeNotFound(name.to_string()))
    }

    fn clone_box(&self) -> Box<dyn ReservedFields> {
        Box::new(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Store `value` into an optional typed slot, converting with `TryFrom`.
///
/// [`Value::Absent`] clears the slot. Meant for [`ReservedFields::set_field`]
/// implementations.
pub fn assign<T>(slot: &mut Option<T>, field: &str, expected: &str, value: Value) -> Result<()>
where
    T: TryFrom<Value, Error = Value>,
{
    *slot = match value {
        Value::Absent => None,
        value => Some(
            T::try_from(value).map_err(|found| NamelistError::invalid_field(field, expected, &found))?,
        ),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fields() {
        let mut fields = NoFields;
        assert!(fields.field_names().is_empty());
        assert!(!fields.is_reserved("anything"));
        assert_eq!(fields.get_field("anything"), None);
        assert!(fields.set_field("anything", Value::from(1)).is_err());
    }

    #[test]
    fn test_assign() {
        let mut slot: Option<i64> = None;
        assign(&mut slot, "nstep", "integer", Value::from(5)).unwrap();
        assert_eq!(slot, Some(5));

        let err = assign(&mut slot, "nstep", "integer", Value::from("five")).unwrap_err();
        assert!(matches!(err, NamelistError::InvalidFieldValue { .. }));
        assert_eq!(slot, Some(5));

        assign(&mut slot, "nstep", "integer", Value::Absent).unwrap();
        assert_eq!(slot, None);
    }
}
