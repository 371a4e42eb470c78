//! Variable registry
//!
//! Maps string identifiers to [`VariableRef`] handles. Lookup is by exact
//! string match. Registering or removing a variable never touches disk.

use std::collections::HashMap;

use crate::variable::VariableRef;

/// Identifier → variable map with unique keys
#[derive(Debug, Default, Clone)]
pub struct Registry {
    variables: HashMap<String, VariableRef>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `variable` under `id`
    ///
    /// Returns false and leaves the registry unchanged if `id` is taken.
    pub fn add(&mut self, id: impl Into<String>, variable: VariableRef) -> bool {
        let id = id.into();
        if self.variables.contains_key(&id) {
            return false;
        }
        self.variables.insert(id, variable);
        true
    }

    /// Unregister `id`. Returns false if it was not registered.
    pub fn remove(&mut self, id: &str) -> bool {
        self.variables.remove(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&VariableRef> {
        self.variables.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.variables.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterate `(id, variable)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariableRef)> {
        self.variables.iter().map(|(id, var)| (id.as_str(), var))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.variables.clear();
    }
}
