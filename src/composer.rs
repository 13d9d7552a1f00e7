// Copyright 2025 Cowboy AI, LLC.

//! Custom data composition for one holder
//!
//! The composer owns the holder's [`ComponentStore`] and routes every change
//! either straight to the store (inactive holder) or through the
//! [`DataTransactionService`] (active holder), which reports back through a
//! completion callback.
//!
//! ```mermaid
//! graph LR
//!     A[attach / detach] --> B{holder active?}
//!     B -->|no| C[merge locally]
//!     B -->|yes| D[mediator]
//!     D -->|Resolution| E[apply replacement]
//!     C --> E
//!     E --> F[TransactionResult]
//! ```

use crate::component::{ComponentKind, DataComponent};
use crate::holder::{Activation, HolderId};
use crate::key::DataKey;
use crate::merge::MergeFunction;
use crate::service::{DataTransactionService, StorageRemovalHook};
use crate::settings::{ComposerSettings, NoOpAttachPolicy};
use crate::store::ComponentStore;
use crate::transaction::{Resolution, TransactionResult};
use crate::value::ValueHandle;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Attaches, replaces, queries and detaches custom data components of one holder
///
/// All calls for a holder are expected on the thread that drives the holder.
///
/// # Example
///
/// ```
/// use cim_custom_data::{
///     CustomDataComposer, DataComponent, DataKey, HolderId, ImmediateTransactionService,
///     NoStorage, Outcome, PreferIncoming, ValueSlots, ValueType,
/// };
/// use std::any::Any;
/// use std::sync::Arc;
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
/// let mut composer = CustomDataComposer::new(
///     HolderId::new(),
///     Arc::new(ImmediateTransactionService::default()),
///     Arc::new(NoStorage),
/// );
///
/// let owner = OwnerData(ValueSlots::new([OWNER]).with(&OWNER, serde_json::json!("alex")).unwrap());
/// let result = composer.attach_component(owner, &PreferIncoming);
/// assert_eq!(result.outcome(), Outcome::Success);
/// assert_eq!(composer.get_value_for_key(&OWNER), Some(serde_json::json!("alex")));
/// ```
pub struct CustomDataComposer {
    holder: HolderId,
    store: ComponentStore,
    activation: Activation,
    settings: ComposerSettings,
    transactions: Arc<dyn DataTransactionService>,
    storage: Arc<dyn StorageRemovalHook>,
}

impl CustomDataComposer {
    /// Create an empty composer for an inert holder
    pub fn new(
        holder: HolderId,
        transactions: Arc<dyn DataTransactionService>,
        storage: Arc<dyn StorageRemovalHook>,
    ) -> Self {
        Self {
            holder,
            store: ComponentStore::new(),
            activation: Activation::Inert,
            settings: ComposerSettings::default(),
            transactions,
            storage,
        }
    }

    /// Declare the holder's activation capability
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Replace the settings
    pub fn with_settings(mut self, settings: ComposerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The holder this composer belongs to
    pub fn holder(&self) -> HolderId {
        self.holder
    }

    /// Whether changes currently go through the mediator
    pub fn is_active(&self) -> bool {
        self.activation.is_active()
    }

    /// Get the number of components
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Attach `component`, resolving a clash with the existing component of
    /// its kind through `merge`
    pub fn attach_component<C: DataComponent>(
        &mut self,
        component: C,
        merge: &dyn MergeFunction,
    ) -> TransactionResult {
        self.attach_boxed(Box::new(component), merge)
    }

    /// Attach a boxed component
    pub fn attach_boxed(
        &mut self,
        component: Box<dyn DataComponent>,
        merge: &dyn MergeFunction,
    ) -> TransactionResult {
        let kind = component.kind();
        let existing = self.store.get(kind).map(|c| c.clone_box());
        let old_kind = existing.as_ref().map(|_| kind);

        if self.activation.is_active() {
            debug!(holder = %self.holder, %kind, replacing = old_kind.is_some(), "delegating attach");
            let Self {
                holder,
                store,
                settings,
                transactions,
                storage,
                ..
            } = self;
            let mut complete = |resolution: Resolution| {
                apply_replacement(*holder, store, &**storage, settings, old_kind, resolution)
            };
            return transactions.merge_and_notify(
                *holder,
                existing.as_deref(),
                component,
                merge,
                &mut complete,
            );
        }

        let resolved = merge.merge(existing.as_deref(), component);
        let result = self.apply(old_kind, Resolution::Apply(resolved));
        trace!(holder = %self.holder, %kind, outcome = result.outcome().name(), "component attached");
        result
    }

    /// Copy of the component of type `T`
    pub fn query_component<T: DataComponent + Clone>(&self) -> Option<T> {
        self.store
            .get(ComponentKind::of::<T>())?
            .as_any()
            .downcast_ref::<T>()
            .cloned()
    }

    /// Copy of the component of `kind`
    pub fn query_kind(&self, kind: ComponentKind) -> Option<Box<dyn DataComponent>> {
        self.store.get(kind).map(|c| c.clone_box())
    }

    /// Detach the component of type `T`
    pub fn detach_component<T: DataComponent>(&mut self) -> TransactionResult {
        self.detach_kind(ComponentKind::of::<T>())
    }

    /// Detach the component of `kind`
    pub fn detach_kind(&mut self, kind: ComponentKind) -> TransactionResult {
        let Some(existing) = self.store.get(kind).map(|c| c.clone_box()) else {
            trace!(holder = %self.holder, %kind, "nothing to detach");
            return TransactionResult::fail_no_data();
        };

        if self.activation.is_active() {
            debug!(holder = %self.holder, %kind, "delegating detach");
            let Self {
                holder,
                store,
                settings,
                transactions,
                storage,
                ..
            } = self;
            let mut complete = |resolution: Resolution| {
                apply_replacement(*holder, store, &**storage, settings, Some(kind), resolution)
            };
            return transactions.remove_and_notify(*holder, kind, &*existing, &mut complete);
        }

        let result = self.apply(Some(kind), Resolution::Apply(None));
        trace!(holder = %self.holder, %kind, outcome = result.outcome().name(), "component detached");
        result
    }

    /// Whether any component is attached
    pub fn has_components(&self) -> bool {
        !self.store.is_empty()
    }

    /// Whether any attached component holds `key`
    pub fn supports_key(&self, key: &DataKey) -> bool {
        self.store.first_supporting(key).is_some()
    }

    /// Value of `key` from the first component that holds it
    pub fn get_value_for_key(&self, key: &DataKey) -> Option<Value> {
        self.store.first_supporting(key)?.get(key)
    }

    /// Detached value handle for `key` from the first component that holds it
    pub fn get_value_handle_for_key(&self, key: &DataKey) -> Option<ValueHandle> {
        self.store.first_supporting(key)?.get_value(key)
    }

    /// Copies of all components in store order
    pub fn list_components(&self) -> Vec<Box<dyn DataComponent>> {
        self.store.iter().map(|c| c.clone_box()).collect()
    }

    /// Write `value` for `key`
    pub fn set_value_for_key(&mut self, key: &DataKey, value: Value) -> TransactionResult {
        if self.activation.is_active() {
            debug!(holder = %self.holder, key = key.id(), "delegating value offer");
            return self
                .transactions
                .set_key_and_notify(self.holder, key, value, &mut self.store);
        }

        let result = self.store.offer_value(key, value);
        trace!(holder = %self.holder, key = key.id(), outcome = result.outcome().name(), "value offered");
        result
    }

    /// Detach the component kind that holds `key`
    pub fn remove_key(&mut self, key: &DataKey) -> TransactionResult {
        match self.transactions.resolve_kind_for_key(key) {
            Some(kind) => self.detach_kind(kind),
            None => {
                trace!(holder = %self.holder, key = key.id(), "no kind registered for key");
                TransactionResult::fail_no_data()
            }
        }
    }

    fn apply(&mut self, old: Option<ComponentKind>, resolution: Resolution) -> TransactionResult {
        apply_replacement(
            self.holder,
            &mut self.store,
            self.storage.as_ref(),
            &self.settings,
            old,
            resolution,
        )
    }
}

/// Swap the component of kind `old` for the resolved component
///
/// A resolution to nothing is a full removal and notifies `storage`.
fn apply_replacement(
    holder: HolderId,
    store: &mut ComponentStore,
    storage: &dyn StorageRemovalHook,
    settings: &ComposerSettings,
    old: Option<ComponentKind>,
    resolution: Resolution,
) -> TransactionResult {
    let new = match resolution {
        Resolution::Cancelled => {
            debug!(%holder, "change cancelled by mediator");
            return TransactionResult::cancelled();
        }
        Resolution::Apply(new) => new,
    };

    if settings.no_op_attach == NoOpAttachPolicy::ReportUnchanged {
        if let (Some(old), Some(new)) = (old, new.as_ref()) {
            let same = new.kind() == old
                && store.get(old).is_some_and(|c| c.values() == new.values());
            if same {
                trace!(%holder, kind = %old, "attach left component unchanged");
                return TransactionResult::unchanged();
            }
        }
    }

    let mut replaced = Vec::new();
    let mut success = Vec::new();

    if let Some(old) = old {
        if let Some(removed) = store.remove(old) {
            replaced.extend(removed.values());
            if new.is_none() {
                debug!(%holder, kind = %old, "component fully removed");
                storage.on_component_fully_removed(holder, &*removed);
            }
        }
    }

    if let Some(new) = new {
        success.extend(new.values());
        if let Some(displaced) = store.insert(new) {
            replaced.extend(displaced.values());
        }
    }

    TransactionResult::success_result(replaced, success)
}

impl fmt::Debug for CustomDataComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomDataComposer")
            .field("holder", &self.holder)
            .field("store", &self.store)
            .field("activation", &self.activation)
            .field("settings", &self.settings)
            .finish()
    }
}
