// f90nmlrs/src/namelist/core.rs

//! Core Namelist struct and basic operations.

use super::writer::write_group;
use crate::error::{F90nmlError, Result};
use crate::fortran_types::FortranValue;
use crate::WriteOptions;
use linked_hash_map::LinkedHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// An ordered mapping of names to Fortran values.
///
/// The same type represents a whole document (group names mapped to
/// groups, or to arrays of groups when a group is repeated) and a single
/// group (variable names mapped to values, nested groups being derived
/// types). Keys keep their insertion order; replacing the value of an
/// existing key keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namelist {
    entries: LinkedHashMap<String, FortranValue>,
}

impl Namelist {
    /// Create a new empty namelist.
    pub fn new() -> Self {
        Self {
            entries: LinkedHashMap::new(),
        }
    }

    /// Insert a value with automatic type conversion.
    pub fn insert<T: Into<FortranValue>>(&mut self, name: &str, value: T) -> &mut Self {
        self.insert_value(name, value.into());
        self
    }

    /// Insert a value, returning the value it replaced.
    pub fn insert_value(&mut self, name: &str, value: FortranValue) -> Option<FortranValue> {
        match self.entries.get_mut(name) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.insert(name.to_string(), value);
                None
            }
        }
    }

    /// Get the group stored under `name`, creating it when missing.
    ///
    /// A non-group value already stored under `name` is replaced.
    pub fn insert_group(&mut self, name: &str) -> &mut Namelist {
        if !matches!(self.entries.get(name), Some(FortranValue::Group(_))) {
            self.insert_value(name, FortranValue::Group(Namelist::new()));
        }
        match self.entries.get_mut(name) {
            Some(FortranValue::Group(group)) => group,
            _ => unreachable!("group '{}' was just inserted", name),
        }
    }

    /// Append a group, turning an existing group of the same name into a
    /// repeated group array.
    pub fn push_group(&mut self, name: &str, group: Namelist) {
        match self.entries.get_mut(name) {
            Some(FortranValue::Array(values)) if values.iter().all(FortranValue::is_group) => {
                values.push(FortranValue::Group(group));
            }
            Some(slot @ FortranValue::Group(_)) => {
                let first = std::mem::replace(slot, FortranValue::Null);
                *slot = FortranValue::Array(vec![first, FortranValue::Group(group)]);
            }
            _ => {
                self.insert_value(name, FortranValue::Group(group));
            }
        }
    }

    /// Get a value by name.
    pub fn get(&self, name: &str) -> Option<&FortranValue> {
        self.entries.get(name)
    }

    /// Get a mutable reference to a value by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut FortranValue> {
        self.entries.get_mut(name)
    }

    /// Get a group by name.
    pub fn get_group(&self, name: &str) -> Option<&Namelist> {
        match self.entries.get(name) {
            Some(FortranValue::Group(group)) => Some(group),
            _ => None,
        }
    }

    /// Get a mutable reference to a group by name.
    pub fn get_group_mut(&mut self, name: &str) -> Option<&mut Namelist> {
        self.entries.get_mut(name).and_then(FortranValue::as_group_mut)
    }

    /// Check if a key exists.
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove a value by name.
    pub fn remove(&mut self, name: &str) -> Option<FortranValue> {
        self.entries.remove(name)
    }

    /// Keep only the entries for which `keep` returns true.
    pub fn retain<F: FnMut(&str, &FortranValue) -> bool>(&mut self, mut keep: F) {
        let dropped: Vec<String> = self
            .entries
            .iter()
            .filter(|(name, value)| !keep(name, value))
            .map(|(name, _)| name.clone())
            .collect();
        for name in dropped {
            self.entries.remove(&name);
        }
    }

    /// Get all keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Get an iterator over all entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FortranValue)> {
        self.entries.iter()
    }

    /// Get a mutable iterator over all entries in order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut FortranValue)> {
        self.entries.iter_mut()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Check if the namelist is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Convenience methods for getting typed values
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name)?.as_integer().ok()
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name)?.as_real().ok()
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name)?.as_logical().ok()
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_character().ok()
    }

    /// Write every top-level group of this document.
    ///
    /// Top-level values must be groups or arrays of groups; a repeated
    /// group is written once per element, in order.
    pub fn write_groups<W: Write>(&self, writer: &mut W, options: &WriteOptions) -> Result<()> {
        let mut entries: Vec<_> = self.iter().collect();
        if options.sort_groups {
            entries.sort_by_key(|(name, _)| name.to_lowercase());
        }

        let mut first = true;
        for (name, value) in entries {
            let groups: Vec<&Namelist> = match value {
                FortranValue::Group(group) => vec![group],
                FortranValue::Array(values) if value.is_group_array() => {
                    values.iter().filter_map(|v| v.as_group().ok()).collect()
                }
                other => {
                    return Err(F90nmlError::invalid_format(
                        name.as_str(),
                        format!("top-level {} is not a namelist group", other.type_name())
                            .as_str(),
                    ))
                }
            };

            for group in groups {
                if !first {
                    writeln!(writer)?;
                }
                first = false;
                write_group(writer, name, group, options)?;
            }
        }
        Ok(())
    }

    /// Convert this document to a Fortran string representation.
    pub fn to_fortran_string(&self, options: &WriteOptions) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_groups(&mut buffer, options)?;
        String::from_utf8(buffer).map_err(|e| F90nmlError::Io(e.to_string()))
    }
}

impl fmt::Display for Namelist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_fortran_string(&WriteOptions::default()) {
            Ok(s) => write!(f, "{}", s),
            Err(_) => write!(f, "<invalid namelist>"),
        }
    }
}

impl<K: Into<String>, V: Into<FortranValue>> FromIterator<(K, V)> for Namelist {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut namelist = Namelist::new();
        for (name, value) in iter {
            let name = name.into();
            namelist.insert_value(&name, value.into());
        }
        namelist
    }
}

impl IntoIterator for Namelist {
    type Item = (String, FortranValue);
    type IntoIter = linked_hash_map::IntoIter<String, FortranValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_position_on_replace() {
        let mut nml = Namelist::new();
        nml.insert("a", 1).insert("b", 2).insert("c", 3);
        let old = nml.insert_value("a", FortranValue::Integer(10));

        assert_eq!(old, Some(FortranValue::Integer(1)));
        let keys: Vec<_> = nml.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(nml.get_i64("a"), Some(10));
    }

    #[test]
    fn test_insert_group_builder() {
        let mut nml = Namelist::new();
        nml.insert_group("control")
            .insert("calculation", "scf")
            .insert("tprnfor", true);
        nml.insert_group("control").insert("nstep", 50);

        let control = nml.get_group("control").unwrap();
        assert_eq!(control.get_str("calculation"), Some("scf"));
        assert_eq!(control.get_bool("tprnfor"), Some(true));
        assert_eq!(control.get_i64("nstep"), Some(50));
        assert_eq!(nml.len(), 1);
    }

    #[test]
    fn test_push_group_builds_group_array() {
        let mut nml = Namelist::new();
        let first: Namelist = [("x", 1)].into_iter().collect();
        let second: Namelist = [("x", 2)].into_iter().collect();
        nml.push_group("grp", first);
        assert!(nml.get("grp").unwrap().is_group());

        nml.push_group("grp", second);
        let value = nml.get("grp").unwrap();
        assert!(value.is_group_array());
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_retain() {
        let mut nml: Namelist = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        nml.retain(|name, _| name != "b");
        let keys: Vec<_> = nml.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_write_rejects_scalar_at_top_level() {
        let mut nml = Namelist::new();
        nml.insert("nstep", 3);
        let err = nml.to_fortran_string(&WriteOptions::default()).unwrap_err();
        assert!(matches!(err, F90nmlError::InvalidFormat { .. }));
    }

    #[test]
    fn test_write_repeated_groups() {
        let mut nml = Namelist::new();
        nml.push_group("grp", [("x", 1)].into_iter().collect());
        nml.push_group("grp", [("x", 2)].into_iter().collect());

        let output = nml.to_fortran_string(&WriteOptions::default()).unwrap();
        assert_eq!(output, "&grp\n    x = 1\n/\n\n&grp\n    x = 2\n/\n");
    }
}
