// Copyright 2025 Cowboy AI, LLC.

//! Error types for custom data operations

use crate::key::ValueType;
use crate::transaction::Outcome;
use thiserror::Error;

/// Errors raised by components, registries and settings
///
/// Composer operations report "nothing to act on" through
/// [`TransactionResult`](crate::TransactionResult) outcomes, not through this type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// The component does not declare a slot for this key
    #[error("Unsupported key: {0}")]
    UnsupportedKey(String),

    /// A value does not match the value type of its key
    #[error("Value type mismatch for key {key}: expected {expected}, found {found}")]
    ValueTypeMismatch {
        /// Key being written
        key: String,
        /// Value type declared by the key
        expected: ValueType,
        /// JSON type of the offered value
        found: String,
    },

    /// The key is already mapped to a different component kind
    #[error("Key {key} already registered to {kind}")]
    KeyAlreadyRegistered {
        /// Key id
        key: String,
        /// Name of the kind that owns the key
        kind: String,
    },

    /// A transaction finished without applying anything
    #[error("Transaction not applied: {outcome:?}")]
    NotApplied {
        /// Outcome reported by the transaction
        outcome: Outcome,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for custom data operations
pub type DataResult<T> = Result<T, DataError>;

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Serialization(err.to_string())
    }
}

impl DataError {
    /// Build a type mismatch error for `value` offered under `key`
    pub fn type_mismatch(key: &crate::DataKey, value: &serde_json::Value) -> Self {
        DataError::ValueTypeMismatch {
            key: key.id().to_string(),
            expected: key.value_type(),
            found: ValueType::describe(value).to_string(),
        }
    }
}
