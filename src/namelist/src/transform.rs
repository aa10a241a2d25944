// src/transform.rs

//! Hooks that post-process the flat structure at serialization time.

use crate::namelist::Namelist;
use crate::FlatNamelist;
use f90nmlrs::FortranValue;
use linked_hash_map::LinkedHashMap;
use std::fmt;
use std::sync::Arc;

/// Signature of a transform hook: owner, in-progress flat structure, options.
pub type TransformFn = dyn Fn(&Namelist, &mut FlatNamelist, &TransformOptions) + Send + Sync;

/// A named transform hook.
///
/// Cloning shares the underlying function.
#[derive(Clone)]
pub struct Transform {
    name: String,
    func: Arc<TransformFn>,
}

impl Transform {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Namelist, &mut FlatNamelist, &TransformOptions) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, owner: &Namelist, flat: &mut FlatNamelist, options: &TransformOptions) {
        (self.func)(owner, flat, options)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform").field("name", &self.name).finish()
    }
}

/// Named parameters passed through to every transform hook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformOptions {
    params: LinkedHashMap<String, FortranValue>,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with<T: Into<FortranValue>>(mut self, key: &str, value: T) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<T: Into<FortranValue>>(&mut self, key: &str, value: T) {
        self.params.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FortranValue> {
        self.params.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_logical().ok()
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_character().ok()
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key)?.as_integer().ok()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FortranValue)> {
        self.params.iter()
    }
}
