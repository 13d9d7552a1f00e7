// Copyright 2025 Cowboy AI, LLC.

//! # CIM Custom Data
//!
//! Custom data composition for domain objects such as entities and block
//! entities. A holder is extended at runtime with typed data components that
//! carry values the holder's own model does not know about.
//!
//! This crate provides:
//! - **DataComponent**: Trait for typed bundles of key/value slots
//! - **DataKey**: Globally unique identifiers for one typed value
//! - **ComponentStore**: Ordered storage with at most one component per kind
//! - **CustomDataComposer**: Attach, replace, query and detach with transactional results
//! - **MergeFunction**: Caller-supplied conflict resolution for attaches
//! - **DataTransactionService**: Mediator for holders that fire change events
//!
//! ## Design Principles
//!
//! 1. **Kinds are types**: A component's Rust type is its kind; the store is keyed by it
//! 2. **Copies out**: Queries hand out copies, never the stored instance
//! 3. **Results, not errors**: "Nothing to act on" is an outcome value
//! 4. **Explicit collaborators**: Mediator, storage hook and activation are passed in

#![warn(missing_docs)]

mod component;
mod composer;
mod errors;
mod holder;
mod key;
mod merge;
mod registry;
mod service;
mod settings;
mod store;
mod transaction;
mod value;

// Re-export core types
pub use component::{ComponentKind, DataComponent, ValueSlots};
pub use composer::CustomDataComposer;
pub use errors::{DataError, DataResult};
pub use holder::{Activation, ActivationFlag, ActivationQuery, HolderId};
pub use key::{DataKey, ValueType};
pub use merge::{CombineValues, Discard, KeepExisting, MergeFunction, PreferIncoming};
pub use registry::KeyRegistry;
pub use service::{
    CompletionFn, DataTransactionService, ImmediateTransactionService, NoStorage,
    StorageRemovalHook,
};
pub use settings::{ComposerSettings, NoOpAttachPolicy};
pub use store::ComponentStore;
pub use transaction::{Outcome, Resolution, TransactionResult};
pub use value::{ImmutableValue, ValueHandle, ValueSnapshot};
