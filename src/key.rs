// Copyright 2025 Cowboy AI, LLC.

//! Data keys and the value types they carry

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The type of value a [`DataKey`] accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// `true` or `false`
    Bool,
    /// Whole numbers
    Integer,
    /// Any number
    Float,
    /// Strings
    Text,
    /// JSON arrays
    List,
    /// JSON objects
    Object,
    /// Anything, including null
    Any,
}

impl ValueType {
    /// Check whether a JSON value is acceptable for this type
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ValueType::Bool => value.is_boolean(),
            ValueType::Integer => value.is_i64() || value.is_u64(),
            ValueType::Float => value.is_number(),
            ValueType::Text => value.is_string(),
            ValueType::List => value.is_array(),
            ValueType::Object => value.is_object(),
            ValueType::Any => true,
        }
    }

    /// Short name of the JSON type of `value`
    pub fn describe(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(n) if n.is_f64() => "float",
            Value::Number(_) => "integer",
            Value::String(_) => "text",
            Value::Array(_) => "list",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Bool => "bool",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Text => "text",
            ValueType::List => "list",
            ValueType::Object => "object",
            ValueType::Any => "any",
        };
        f.write_str(name)
    }
}

/// Globally unique identifier for one typed value
///
/// A key names exactly one value type. Keys compare and hash by id alone, so
/// the id is the key's identity everywhere a key is looked up. Which component
/// kind holds the key is recorded in a [`KeyRegistry`](crate::KeyRegistry).
///
/// # Example
///
/// ```
/// use cim_custom_data::{DataKey, ValueType};
///
/// const OWNER: DataKey = DataKey::new("custom:owner", ValueType::Text);
/// assert_eq!(OWNER.id(), "custom:owner");
/// assert!(OWNER.accepts(&serde_json::json!("steve")));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DataKey {
    id: Cow<'static, str>,
    value_type: ValueType,
}

impl DataKey {
    /// Create a key with a static id
    pub const fn new(id: &'static str, value_type: ValueType) -> Self {
        Self {
            id: Cow::Borrowed(id),
            value_type,
        }
    }

    /// Create a key with a runtime id
    pub fn owned(id: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            id: Cow::Owned(id.into()),
            value_type,
        }
    }

    /// The key id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The value type this key carries
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Check whether `value` can be stored under this key
    pub fn accepts(&self, value: &Value) -> bool {
        self.value_type.accepts(value)
    }
}

impl PartialEq for DataKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DataKey {}

impl Hash for DataKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}>", self.id, self.value_type)
    }
}
