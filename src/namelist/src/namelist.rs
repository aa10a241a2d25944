// src/namelist.rs

//! The recursive namelist container.

use crate::error::{NamelistError, Result};
use crate::fields::{NoFields, ReservedFields};
use crate::transform::{Transform, TransformOptions};
use crate::value::{coerce, Value};
use crate::FlatNamelist;
use f90nmlrs::{FortranValue, WriteOptions};
use linked_hash_map::LinkedHashMap;

/// What `set_field` does when a dynamic key already holds a different value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Replace the value and log the overwrite at info level.
    #[default]
    Allow,
    /// Fail with [`NamelistError::DuplicateKey`].
    Reject,
}

/// A recursive, ordered namelist.
///
/// Fields live in two tiers: the names declared by the installed
/// [`ReservedFields`] struct, and an insertion-ordered dynamic mapping for
/// everything else. A name is never stored in both.
#[derive(Debug, Clone)]
pub struct Namelist {
    entries: LinkedHashMap<String, Value>,
    reserved: Box<dyn ReservedFields>,
    transforms: Vec<Transform>,
    overwrite_policy: OverwritePolicy,
    write_options: WriteOptions,
}

impl Default for Namelist {
    fn default() -> Self {
        Self::new()
    }
}

impl Namelist {
    pub fn new() -> Self {
        Self {
            entries: LinkedHashMap::new(),
            reserved: Box::new(NoFields),
            transforms: Vec::new(),
            overwrite_policy: OverwritePolicy::default(),
            write_options: WriteOptions::default(),
        }
    }

    /// Build a namelist from a plain mapping, nesting inner mappings.
    pub fn from_map(map: LinkedHashMap<String, Value>) -> Self {
        let mut namelist = Self::new();
        for (name, value) in map {
            namelist.entries.insert(name, coerce(value));
        }
        namelist
    }

    /// Install the reserved-field struct.
    ///
    /// Dynamic entries named like a declared field are moved into it
    /// through its setter, which may reject them.
    pub fn with_fields<F: ReservedFields + 'static>(mut self, fields: F) -> Result<Self> {
        self.reserved = Box::new(fields);
        let colliding: Vec<String> = self
            .entries
            .keys()
            .filter(|name| self.reserved.is_reserved(name))
            .cloned()
            .collect();
        for name in colliding {
            if let Some(value) = self.entries.remove(&name) {
                self.reserved.set_field(&name, value)?;
            }
        }
        Ok(self)
    }

    /// Append a transform hook.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.register_transform(transform);
        self
    }

    pub fn with_overwrite_policy(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite_policy = policy;
        self
    }

    pub fn with_write_options(mut self, options: WriteOptions) -> Self {
        self.write_options = options;
        self
    }

    /// Append a transform hook; hooks run in registration order.
    pub fn register_transform(&mut self, transform: Transform) {
        self.transforms.push(transform);
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn overwrite_policy(&self) -> OverwritePolicy {
        self.overwrite_policy
    }

    pub fn set_overwrite_policy(&mut self, policy: OverwritePolicy) {
        self.overwrite_policy = policy;
    }

    pub fn write_options(&self) -> &WriteOptions {
        &self.write_options
    }

    /// The installed reserved-field struct, if it is a `T`.
    pub fn reserved<T: ReservedFields + 'static>(&self) -> Option<&T> {
        self.reserved.as_any().downcast_ref::<T>()
    }

    pub fn reserved_mut<T: ReservedFields + 'static>(&mut self) -> Option<&mut T> {
        self.reserved.as_any_mut().downcast_mut::<T>()
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.is_reserved(name)
    }

    /// Value of a reserved field (possibly `Absent`) or a copy of a dynamic entry.
    pub fn get_field(&self, name: &str) -> Result<Value> {
        if self.reserved.is_reserved(name) {
            return Ok(self.reserved.get_field(name).unwrap_or_default());
        }
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| NamelistError::AttributeNotFound(name.to_string()))
    }

    /// Borrow a dynamic entry.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.entries.get_mut(name)
    }

    /// Borrow a nested namelist.
    pub fn child(&self, name: &str) -> Option<&Namelist> {
        self.entries.get(name).and_then(Value::as_namelist)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Namelist> {
        self.entries.get_mut(name).and_then(Value::as_namelist_mut)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.reserved.is_reserved(name) || self.entries.contains_key(name)
    }

    pub fn set_field<V: Into<Value>>(&mut self, name: &str, value: V) -> Result<()> {
        let value = value.into();
        if self.reserved.is_reserved(name) {
            return self.reserved.set_field(name, value);
        }

        let value = coerce(value);
        match self.entries.get_mut(name) {
            Some(slot) => {
                if *slot != value {
                    match self.overwrite_policy {
                        OverwritePolicy::Allow => log::info!(
                            "overwriting '{}': {} replaced by {}",
                            name,
                            slot.type_name(),
                            value.type_name()
                        ),
                        OverwritePolicy::Reject => {
                            return Err(NamelistError::DuplicateKey(name.to_string()))
                        }
                    }
                }
                *slot = value;
            }
            None => {
                self.entries.insert(name.to_string(), value);
            }
        }
        Ok(())
    }

    /// Remove a dynamic entry, or reset a reserved field.
    ///
    /// Returns the value held before removal.
    pub fn remove_field(&mut self, name: &str) -> Result<Value> {
        if self.reserved.is_reserved(name) {
            let previous = self.reserved.get_field(name).unwrap_or_default();
            self.reserved.remove_field(name)?;
            return Ok(previous);
        }
        self.entries
            .remove(name)
            .ok_or_else(|| NamelistError::AttributeNotFound(name.to_string()))
    }

    /// Dynamic entries plus reserved fields that hold a value.
    pub fn len(&self) -> usize {
        self.entries.len() + self.set_reserved_names().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names that will be written: dynamic keys, then set reserved fields.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .keys()
            .map(String::as_str)
            .chain(self.set_reserved_names())
    }

    fn set_reserved_names(&self) -> impl Iterator<Item = &str> + '_ {
        let names: &[&str] = self.reserved.field_names();
        names.iter().copied().filter(move |name| {
            self.reserved
                .get_field(name)
                .map_or(false, |value| !value.is_absent())
        })
    }

    /// Dynamic entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Empty the dynamic mapping; reserved fields are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Assemble the flat structure handed to the codec.
    ///
    /// Nested namelists are flattened with their own hooks, `Absent`
    /// entries are dropped, set reserved fields are appended, then every
    /// hook runs in registration order.
    pub fn to_flat_namelist(&self, options: &TransformOptions) -> FlatNamelist {
        let mut flat = FlatNamelist::new();

        for (name, value) in &self.entries {
            if let Some(value) = flatten_value(value, options) {
                flat.insert_value(name, value);
            }
        }

        for name in self.reserved.field_names() {
            let value = self.reserved.get_field(name).unwrap_or_default();
            if let Some(value) = flatten_value(&value, options) {
                flat.insert_value(name, value);
            }
        }

        for transform in &self.transforms {
            log::debug!("running transform '{}'", transform.name());
            transform.apply(self, &mut flat, options);
        }

        flat
    }
}

fn flatten_value(value: &Value, options: &TransformOptions) -> Option<FortranValue> {
    Some(match value {
        Value::Absent => return None,
        Value::Integer(i) => FortranValue::Integer(*i),
        Value::Real(f) => FortranValue::Real(*f),
        Value::Complex(re, im) => FortranValue::Complex(*re, *im),
        Value::Logical(b) => FortranValue::Logical(*b),
        Value::Character(s) => FortranValue::Character(s.clone()),
        Value::Sequence(values) => FortranValue::Array(
            values
                .iter()
                .map(|v| flatten_value(v, options).unwrap_or(FortranValue::Null))
                .collect(),
        ),
        Value::Map(map) => {
            FortranValue::Group(Namelist::from_map(map.clone()).to_flat_namelist(options))
        }
        Value::Namelist(namelist) => FortranValue::Group(namelist.to_flat_namelist(options)),
    })
}

/// Attribute equality: same dynamic entries in the same order, same
/// reserved names and values.
impl PartialEq for Namelist {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
            && self.reserved.field_names() == other.reserved.field_names()
            && self
                .reserved
                .field_names()
                .iter()
                .all(|name| self.reserved.get_field(name) == other.reserved.get_field(name))
    }
}

impl From<LinkedHashMap<String, Value>> for Namelist {
    fn from(map: LinkedHashMap<String, Value>) -> Self {
        Self::from_map(map)
    }
}
