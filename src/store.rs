// Copyright 2025 Cowboy AI, LLC.

//! Ordered storage for the custom data components of one holder

use crate::component::{ComponentKind, DataComponent};
use crate::key::DataKey;
use crate::transaction::TransactionResult;
use crate::value::{ImmutableValue, ValueSnapshot};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// Storage for data components attached to a holder
///
/// Components are keyed by their [`ComponentKind`], so a store never holds
/// two components of the same kind. Iteration follows insertion order; a
/// replaced component moves to the end.
#[derive(Default)]
pub struct ComponentStore {
    components: IndexMap<ComponentKind, Box<dyn DataComponent>>,
}

impl ComponentStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            components: IndexMap::new(),
        }
    }

    /// Insert a component, returning the one of the same kind it displaced
    pub fn insert(&mut self, component: Box<dyn DataComponent>) -> Option<Box<dyn DataComponent>> {
        let kind = component.kind();
        let displaced = self.components.shift_remove(&kind);
        self.components.insert(kind, component);
        displaced
    }

    /// Remove the component of `kind`
    pub fn remove(&mut self, kind: ComponentKind) -> Option<Box<dyn DataComponent>> {
        self.components.shift_remove(&kind)
    }

    /// Borrow the component of `kind`
    pub fn get(&self, kind: ComponentKind) -> Option<&dyn DataComponent> {
        self.components.get(&kind).map(|c| &**c)
    }

    /// Check if a component of `kind` exists
    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.components.contains_key(&kind)
    }

    /// First component, in store order, that holds `key`
    pub fn first_supporting(&self, key: &DataKey) -> Option<&dyn DataComponent> {
        self.components
            .values()
            .find(|c| c.supports(key))
            .map(|c| &**c)
    }

    /// Mutable access to the first component that holds `key`
    pub fn first_supporting_mut(&mut self, key: &DataKey) -> Option<&mut Box<dyn DataComponent>> {
        self.components.values_mut().find(|c| c.supports(key))
    }

    /// Write `value` into the first component that holds `key`
    ///
    /// Reports the previous value as replaced and the stored value as
    /// success. A value the component refuses is reported as rejected.
    pub fn offer_value(&mut self, key: &DataKey, value: Value) -> TransactionResult {
        let Some(component) = self.first_supporting_mut(key) else {
            return TransactionResult::fail_no_data();
        };
        let replaced: ValueSnapshot = component
            .get_value(key)
            .map(|handle| handle.as_immutable())
            .into_iter()
            .collect();
        if component.set(key, value.clone()).is_err() {
            return TransactionResult::fail_result(vec![ImmutableValue::new(key.clone(), value)]);
        }
        let success: ValueSnapshot = component
            .get_value(key)
            .map(|handle| handle.as_immutable())
            .into_iter()
            .collect();
        TransactionResult::success_result(replaced, success)
    }

    /// Iterate over all components in store order
    pub fn iter(&self) -> impl Iterator<Item = &dyn DataComponent> {
        self.components.values().map(|c| &**c)
    }

    /// Kinds present, in store order
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.components.keys().copied()
    }

    /// Get the number of components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Clone for ComponentStore {
    fn clone(&self) -> Self {
        Self {
            components: self
                .components
                .iter()
                .map(|(kind, component)| (*kind, component.clone_box()))
                .collect(),
        }
    }
}

impl fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let component_names: Vec<&str> = self.components
            .values()
            .map(|c| c.type_name())
            .collect();
        f.debug_struct("ComponentStore")
            .field("components", &component_names)
            .finish()
    }
}
