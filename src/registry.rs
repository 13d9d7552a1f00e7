// Copyright 2025 Cowboy AI, LLC.

//! Registry mapping data keys to the component kind that holds them

use crate::component::{ComponentKind, DataComponent};
use crate::errors::{DataError, DataResult};
use crate::key::DataKey;
use std::collections::HashMap;

/// Maps each key id to at most one component kind
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    kinds: HashMap<String, ComponentKind>,
}

impl KeyRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Map `key` to `kind`
    ///
    /// Registering the same mapping twice is allowed.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is already mapped to another kind
    pub fn register_kind(&mut self, key: &DataKey, kind: ComponentKind) -> DataResult<()> {
        match self.kinds.get(key.id()) {
            Some(existing) if *existing != kind => Err(DataError::KeyAlreadyRegistered {
                key: key.id().to_string(),
                kind: existing.name().to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.kinds.insert(key.id().to_string(), kind);
                Ok(())
            }
        }
    }

    /// Map `key` to the component type `T`
    pub fn register<T: DataComponent>(&mut self, key: &DataKey) -> DataResult<()> {
        self.register_kind(key, ComponentKind::of::<T>())
    }

    /// Map every key declared by `prototype` to its kind
    pub fn register_component(&mut self, prototype: &dyn DataComponent) -> DataResult<()> {
        let kind = prototype.kind();
        for key in prototype.slots().keys() {
            self.register_kind(key, kind)?;
        }
        Ok(())
    }

    /// Kind that holds `key`
    pub fn resolve(&self, key: &DataKey) -> Option<ComponentKind> {
        self.kinds.get(key.id()).copied()
    }

    /// Get the number of registered keys
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
