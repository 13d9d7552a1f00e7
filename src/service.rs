// Copyright 2025 Cowboy AI, LLC.

//! Collaborators the composer calls into: the transaction mediator and the
//! storage removal hook

use crate::component::{ComponentKind, DataComponent};
use crate::holder::HolderId;
use crate::key::DataKey;
use crate::merge::MergeFunction;
use crate::registry::KeyRegistry;
use crate::store::ComponentStore;
use crate::transaction::{Resolution, TransactionResult};
use serde_json::Value;
use tracing::debug;

/// Completion callback handed to the mediator
///
/// The mediator calls it at most once, before returning, with its decision.
pub type CompletionFn<'a> = dyn FnMut(Resolution) -> TransactionResult + 'a;

/// Mediates changes to active holders through the event pipeline
///
/// Implementations decide whether a change goes ahead, may rewrite it, and
/// hand the decision back through the completion callback. The result of the
/// callback is normally returned as-is.
pub trait DataTransactionService {
    /// Resolve an attach of `incoming` against `existing` and report it
    ///
    /// `existing` is a copy of the stored component of the same kind.
    fn merge_and_notify(
        &self,
        holder: HolderId,
        existing: Option<&dyn DataComponent>,
        incoming: Box<dyn DataComponent>,
        merge: &dyn MergeFunction,
        complete: &mut CompletionFn<'_>,
    ) -> TransactionResult;

    /// Resolve the removal of the component of `kind`
    ///
    /// `existing` is a copy of the component about to be removed.
    fn remove_and_notify(
        &self,
        holder: HolderId,
        kind: ComponentKind,
        existing: &dyn DataComponent,
        complete: &mut CompletionFn<'_>,
    ) -> TransactionResult;

    /// Locate the component holding `key` in `store` and write `value`
    fn set_key_and_notify(
        &self,
        holder: HolderId,
        key: &DataKey,
        value: Value,
        store: &mut ComponentStore,
    ) -> TransactionResult;

    /// Component kind that holds `key`
    fn resolve_kind_for_key(&self, key: &DataKey) -> Option<ComponentKind>;
}

/// Told when a component leaves a holder for good, so its persisted form can be dropped
///
/// Not called when a component is replaced by another of its kind.
pub trait StorageRemovalHook {
    /// `component` was removed from `holder`
    fn on_component_fully_removed(&self, holder: HolderId, component: &dyn DataComponent);
}

/// Hook for holders without persisted custom data
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStorage;

impl StorageRemovalHook for NoStorage {
    fn on_component_fully_removed(&self, _holder: HolderId, _component: &dyn DataComponent) {}
}

/// Mediator that applies every change at once, without firing events
///
/// Nothing is ever vetoed. Kinds are resolved through a [`KeyRegistry`].
#[derive(Debug, Clone, Default)]
pub struct ImmediateTransactionService {
    registry: KeyRegistry,
}

impl ImmediateTransactionService {
    /// Create a mediator backed by `registry`
    pub fn new(registry: KeyRegistry) -> Self {
        Self { registry }
    }

    /// The key registry
    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    /// Mutable access to the key registry
    pub fn registry_mut(&mut self) -> &mut KeyRegistry {
        &mut self.registry
    }
}

impl DataTransactionService for ImmediateTransactionService {
    fn merge_and_notify(
        &self,
        holder: HolderId,
        existing: Option<&dyn DataComponent>,
        incoming: Box<dyn DataComponent>,
        merge: &dyn MergeFunction,
        complete: &mut CompletionFn<'_>,
    ) -> TransactionResult {
        debug!(%holder, kind = %incoming.kind(), "applying merge without events");
        let resolved = merge.merge(existing, incoming);
        complete(Resolution::Apply(resolved))
    }

    fn remove_and_notify(
        &self,
        holder: HolderId,
        kind: ComponentKind,
        _existing: &dyn DataComponent,
        complete: &mut CompletionFn<'_>,
    ) -> TransactionResult {
        debug!(%holder, %kind, "applying removal without events");
        complete(Resolution::Apply(None))
    }

    fn set_key_and_notify(
        &self,
        holder: HolderId,
        key: &DataKey,
        value: Value,
        store: &mut ComponentStore,
    ) -> TransactionResult {
        debug!(%holder, key = key.id(), "applying value without events");
        store.offer_value(key, value)
    }

    fn resolve_kind_for_key(&self, key: &DataKey) -> Option<ComponentKind> {
        self.registry.resolve(key)
    }
}
