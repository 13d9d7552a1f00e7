// Copyright 2025 Cowboy AI, LLC.

//! Value snapshots and detached value handles

use crate::errors::{DataError, DataResult};
use crate::key::DataKey;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An immutable `(key, value)` pair captured from a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImmutableValue {
    key: DataKey,
    value: Value,
}

impl ImmutableValue {
    /// Capture a value
    pub fn new(key: DataKey, value: Value) -> Self {
        Self { key, value }
    }

    /// The key
    pub fn key(&self) -> &DataKey {
        &self.key
    }

    /// The captured value
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// The values of one component at one point in time
pub type ValueSnapshot = Vec<ImmutableValue>;

/// A mutable wrapper around a single value read from a component
///
/// The handle is detached: changing it never touches the component it was
/// read from. Offer the handle's value back through the composer to apply it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueHandle {
    key: DataKey,
    value: Value,
}

impl ValueHandle {
    /// Wrap a value, checking it against the key's value type
    pub fn new(key: DataKey, value: Value) -> DataResult<Self> {
        if !key.accepts(&value) {
            return Err(DataError::type_mismatch(&key, &value));
        }
        Ok(Self { key, value })
    }

    /// The key
    pub fn key(&self) -> &DataKey {
        &self.key
    }

    /// The current value
    pub fn get(&self) -> &Value {
        &self.value
    }

    /// Replace the value
    pub fn set(&mut self, value: Value) -> DataResult<&mut Self> {
        if !self.key.accepts(&value) {
            return Err(DataError::type_mismatch(&self.key, &value));
        }
        self.value = value;
        Ok(self)
    }

    /// Replace the value with `f(current)`
    pub fn transform<F>(&mut self, f: F) -> DataResult<&mut Self>
    where
        F: FnOnce(&Value) -> Value,
    {
        let next = f(&self.value);
        self.set(next)
    }

    /// Freeze the handle into an immutable value
    pub fn as_immutable(&self) -> ImmutableValue {
        ImmutableValue::new(self.key.clone(), self.value.clone())
    }

    /// Take the value out of the handle
    pub fn into_value(self) -> Value {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::ValueType;
    use serde_json::json;

    const LEVEL: DataKey = DataKey::new("custom:level", ValueType::Integer);

    #[test]
    fn test_handle_rejects_wrong_type() {
        assert!(ValueHandle::new(LEVEL, json!("ten")).is_err());

        let mut handle = ValueHandle::new(LEVEL, json!(10)).unwrap();
        let err = handle.set(json!(false)).unwrap_err();
        assert!(matches!(err, DataError::ValueTypeMismatch { .. }));
        assert_eq!(handle.get(), &json!(10));
    }

    #[test]
    fn test_handle_transform() {
        let mut handle = ValueHandle::new(LEVEL, json!(10)).unwrap();
        handle
            .transform(|v| json!(v.as_i64().unwrap_or_default() * 2))
            .unwrap();
        assert_eq!(handle.get(), &json!(20));
        assert_eq!(handle.as_immutable(), ImmutableValue::new(LEVEL, json!(20)));
        assert_eq!(handle.into_value(), json!(20));
    }
}
