// Copyright 2025 Cowboy AI, LLC.

//! Data component trait and slot storage for custom data

use crate::errors::{DataError, DataResult};
use crate::key::DataKey;
use crate::value::{ImmutableValue, ValueHandle, ValueSnapshot};
use indexmap::IndexMap;
use serde_json::Value;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable identifier for a concrete component type
///
/// Two kinds are equal when they name the same Rust type. The type name is
/// carried along for logging and error messages only.
#[derive(Clone, Copy)]
pub struct ComponentKind {
    id: TypeId,
    name: &'static str,
}

impl ComponentKind {
    /// Kind of the component type `T`
    pub fn of<T: DataComponent>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>()
                .rsplit("::")
                .next()
                .unwrap_or("Unknown"),
        }
    }

    /// Kind of a component instance
    pub fn of_component(component: &dyn DataComponent) -> Self {
        Self {
            id: Any::type_id(component.as_any()),
            name: component.type_name(),
        }
    }

    /// Short type name of the kind
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ComponentKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentKind {}

impl Hash for ComponentKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentKind({})", self.name)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Ordered key/value slots declared by a component type
///
/// Every declared key has a slot; a slot may be unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueSlots {
    slots: IndexMap<DataKey, Option<Value>>,
}

impl ValueSlots {
    /// Declare slots for `keys`, all unset
    pub fn new(keys: impl IntoIterator<Item = DataKey>) -> Self {
        Self {
            slots: keys.into_iter().map(|k| (k, None)).collect(),
        }
    }

    /// Set a slot while building
    pub fn with(mut self, key: &DataKey, value: Value) -> DataResult<Self> {
        self.set(key, value)?;
        Ok(self)
    }

    /// Check whether a slot exists for `key`
    pub fn supports(&self, key: &DataKey) -> bool {
        self.slots.contains_key(key)
    }

    /// Current value of a slot
    pub fn get(&self, key: &DataKey) -> Option<&Value> {
        self.slots.get(key).and_then(Option::as_ref)
    }

    /// Write a slot, returning the previous value
    ///
    /// # Errors
    ///
    /// Returns an error if no slot exists for `key` or the value has the wrong type
    pub fn set(&mut self, key: &DataKey, value: Value) -> DataResult<Option<Value>> {
        let (_, declared, slot) = self
            .slots
            .get_full_mut(key)
            .ok_or_else(|| DataError::UnsupportedKey(key.id().to_string()))?;
        if !declared.accepts(&value) {
            return Err(DataError::type_mismatch(declared, &value));
        }
        Ok(slot.replace(value))
    }

    /// The key as declared by this component
    ///
    /// A lookup key with the same id but another value type resolves to the
    /// declared key.
    pub fn declared(&self, key: &DataKey) -> Option<&DataKey> {
        self.slots.get_key_value(key).map(|(k, _)| k)
    }

    /// Unset a slot, returning the previous value
    pub fn clear(&mut self, key: &DataKey) -> Option<Value> {
        self.slots.get_mut(key).and_then(Option::take)
    }

    /// Declared keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &DataKey> {
        self.slots.keys()
    }

    /// Set slots in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&DataKey, &Value)> {
        self.slots
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k, v)))
    }

    /// Fill every unset slot from the matching slot of `other`
    pub fn fill_from(&mut self, other: &ValueSlots) {
        for (key, slot) in self.slots.iter_mut() {
            if slot.is_none() {
                *slot = other.get(key).cloned();
            }
        }
    }

    /// Capture every set slot
    pub fn snapshot(&self) -> ValueSnapshot {
        self.iter()
            .map(|(k, v)| ImmutableValue::new(k.clone(), v.clone()))
            .collect()
    }
}

/// Trait for typed bundles of custom data attached to a holder
///
/// The concrete Rust type of a component is its kind: a holder keeps at most
/// one component of each kind.
///
/// # Example
///
/// ```
/// use cim_custom_data::{DataComponent, DataKey, ValueSlots, ValueType};
/// use std::any::Any;
///
/// const OWNER: DataKey = DataKey::new("custom:owner", ValueType::Text);
///
/// #[derive(Debug, Clone)]
/// struct OwnerData(ValueSlots);
///
/// impl DataComponent for OwnerData {
///     fn as_any(&self) -> &dyn Any { self }
///     fn clone_box(&self) -> Box<dyn DataComponent> { Box::new(self.clone()) }
///     fn type_name(&self) -> &'static str { "OwnerData" }
///     fn slots(&self) -> &ValueSlots { &self.0 }
///     fn slots_mut(&mut self) -> &mut ValueSlots { &mut self.0 }
/// }
///
/// let mut owner = OwnerData(ValueSlots::new([OWNER]));
/// owner.set(&OWNER, serde_json::json!("alex")).unwrap();
/// assert_eq!(owner.get(&OWNER), Some(serde_json::json!("alex")));
/// ```
pub trait DataComponent: Any + Send + Sync + fmt::Debug {
    /// Get the component as Any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Clone the component into a box
    fn clone_box(&self) -> Box<dyn DataComponent>;

    /// Get the name of this component type
    fn type_name(&self) -> &'static str;

    /// Slot storage backing this component
    fn slots(&self) -> &ValueSlots;

    /// Mutable slot storage backing this component
    fn slots_mut(&mut self) -> &mut ValueSlots;

    /// Check whether this component holds `key`
    fn supports(&self, key: &DataKey) -> bool {
        self.slots().supports(key)
    }

    /// Raw value for `key`
    fn get(&self, key: &DataKey) -> Option<Value> {
        self.slots().get(key).cloned()
    }

    /// Detached value handle for `key`
    fn get_value(&self, key: &DataKey) -> Option<ValueHandle> {
        let slots = self.slots();
        let declared = slots.declared(key)?;
        let value = slots.get(key)?.clone();
        ValueHandle::new(declared.clone(), value).ok()
    }

    /// Write a value for `key`
    fn set(&mut self, key: &DataKey, value: Value) -> DataResult<()> {
        self.slots_mut().set(key, value).map(|_| ())
    }

    /// Immutable snapshot of every set value
    fn values(&self) -> ValueSnapshot {
        self.slots().snapshot()
    }

    /// Convert to JSON keyed by key id
    fn to_json(&self) -> Value {
        Value::Object(
            self.slots()
                .iter()
                .map(|(k, v)| (k.id().to_string(), v.clone()))
                .collect(),
        )
    }
}

impl dyn DataComponent {
    /// Kind of this component, taken from its runtime type
    pub fn kind(&self) -> ComponentKind {
        ComponentKind::of_component(self)
    }
}

impl Clone for Box<dyn DataComponent> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
