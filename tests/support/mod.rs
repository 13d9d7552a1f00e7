//! Shared components and collaborators for integration tests.
#![allow(dead_code)]

use cim_custom_data::{
    CompletionFn, ComponentKind, ComponentStore, DataComponent, DataKey, DataTransactionService,
    HolderId, ImmutableValue, KeyRegistry, MergeFunction, Resolution, StorageRemovalHook,
    TransactionResult, ValueSlots, ValueType,
};
use serde_json::{json, Value};
use std::any::Any;
use std::sync::Mutex;

pub const OWNER: DataKey = DataKey::new("custom:owner", ValueType::Text);
pub const TRUSTED: DataKey = DataKey::new("custom:trusted", ValueType::Bool);
pub const LEVEL: DataKey = DataKey::new("custom:level", ValueType::Integer);
pub const TAGS: DataKey = DataKey::new("custom:tags", ValueType::List);
pub const UNREGISTERED: DataKey = DataKey::new("custom:unregistered", ValueType::Any);

macro_rules! data_component {
    ($name:ident) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub ValueSlots);

        impl DataComponent for $name {
            fn as_any(&self) -> &dyn Any { self }
            fn clone_box(&self) -> Box<dyn DataComponent> { Box::new(self.clone()) }
            fn type_name(&self) -> &'static str { stringify!($name) }
            fn slots(&self) -> &ValueSlots { &self.0 }
            fn slots_mut(&mut self) -> &mut ValueSlots { &mut self.0 }
        }
    };
}

data_component!(OwnerData);
data_component!(LevelData);
data_component!(TagData);

/// Two distinct types that report the same display name
#[derive(Debug, Clone)]
pub struct BadgeData(pub ValueSlots);

impl DataComponent for BadgeData {
    fn as_any(&self) -> &dyn Any { self }
    fn clone_box(&self) -> Box<dyn DataComponent> { Box::new(self.clone()) }
    fn type_name(&self) -> &'static str { "Badge" }
    fn slots(&self) -> &ValueSlots { &self.0 }
    fn slots_mut(&mut self) -> &mut ValueSlots { &mut self.0 }
}

#[derive(Debug, Clone)]
pub struct LegacyBadgeData(pub ValueSlots);

impl DataComponent for LegacyBadgeData {
    fn as_any(&self) -> &dyn Any { self }
    fn clone_box(&self) -> Box<dyn DataComponent> { Box::new(self.clone()) }
    fn type_name(&self) -> &'static str { "Badge" }
    fn slots(&self) -> &ValueSlots { &self.0 }
    fn slots_mut(&mut self) -> &mut ValueSlots { &mut self.0 }
}

pub fn owner(name: &str, trusted: bool) -> OwnerData {
    OwnerData(
        ValueSlots::new([OWNER, TRUSTED])
            .with(&OWNER, json!(name))
            .and_then(|s| s.with(&TRUSTED, json!(trusted)))
            .expect("owner slots"),
    )
}

pub fn owner_name_only(name: &str) -> OwnerData {
    OwnerData(
        ValueSlots::new([OWNER, TRUSTED])
            .with(&OWNER, json!(name))
            .expect("owner slots"),
    )
}

pub fn level(value: i64) -> LevelData {
    LevelData(ValueSlots::new([LEVEL]).with(&LEVEL, json!(value)).expect("level slots"))
}

pub fn tags(values: &[&str]) -> TagData {
    TagData(ValueSlots::new([TAGS]).with(&TAGS, json!(values)).expect("tag slots"))
}

pub fn level_snapshot(value: i64) -> Vec<ImmutableValue> {
    vec![ImmutableValue::new(LEVEL, json!(value))]
}

pub fn registry() -> KeyRegistry {
    let mut registry = KeyRegistry::new();
    registry.register::<OwnerData>(&OWNER).expect("owner key");
    registry.register::<OwnerData>(&TRUSTED).expect("trusted key");
    registry.register::<LevelData>(&LEVEL).expect("level key");
    registry.register::<TagData>(&TAGS).expect("tags key");
    registry
}

/// Records every component handed to the removal hook.
#[derive(Default)]
pub struct RecordingStorage {
    pub removed: Mutex<Vec<(HolderId, String)>>,
}

impl RecordingStorage {
    pub fn removed_kinds(&self) -> Vec<String> {
        self.removed
            .lock()
            .expect("storage lock")
            .iter()
            .map(|(_, kind)| kind.clone())
            .collect()
    }
}

impl StorageRemovalHook for RecordingStorage {
    fn on_component_fully_removed(&self, holder: HolderId, component: &dyn DataComponent) {
        self.removed
            .lock()
            .expect("storage lock")
            .push((holder, component.type_name().to_string()));
    }
}

/// How a scripted mediator answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run the merge and apply it
    Allow,
    /// Veto through `Resolution::Cancelled`
    Cancel,
    /// Veto by handing back the existing component
    EchoOriginal,
    /// Overwrite the level value before applying
    ClampLevel(i64),
}

/// Mediator that answers every change with a fixed decision and counts calls.
pub struct ScriptedService {
    pub decision: Decision,
    pub registry: KeyRegistry,
    pub calls: Mutex<Vec<&'static str>>,
}

impl ScriptedService {
    pub fn new(decision: Decision) -> Self {
        Self {
            decision,
            registry: registry(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

impl DataTransactionService for ScriptedService {
    fn merge_and_notify(
        &self,
        _holder: HolderId,
        existing: Option<&dyn DataComponent>,
        incoming: Box<dyn DataComponent>,
        merge: &dyn MergeFunction,
        complete: &mut CompletionFn<'_>,
    ) -> TransactionResult {
        self.record("merge");
        match self.decision {
            Decision::Allow => complete(Resolution::Apply(merge.merge(existing, incoming))),
            Decision::Cancel => complete(Resolution::Cancelled),
            Decision::EchoOriginal => complete(Resolution::Apply(existing.map(|c| c.clone_box()))),
            Decision::ClampLevel(max) => {
                let mut merged = merge.merge(existing, incoming);
                if let Some(component) = merged.as_mut() {
                    let over = component
                        .get(&LEVEL)
                        .and_then(|v| v.as_i64())
                        .is_some_and(|v| v > max);
                    if over {
                        component.set(&LEVEL, json!(max)).expect("clamp level");
                    }
                }
                complete(Resolution::Apply(merged))
            }
        }
    }

    fn remove_and_notify(
        &self,
        _holder: HolderId,
        _kind: ComponentKind,
        existing: &dyn DataComponent,
        complete: &mut CompletionFn<'_>,
    ) -> TransactionResult {
        self.record("remove");
        match self.decision {
            Decision::Cancel => complete(Resolution::Cancelled),
            Decision::EchoOriginal => complete(Resolution::Apply(Some(existing.clone_box()))),
            _ => complete(Resolution::Apply(None)),
        }
    }

    fn set_key_and_notify(
        &self,
        _holder: HolderId,
        key: &DataKey,
        value: Value,
        store: &mut ComponentStore,
    ) -> TransactionResult {
        self.record("set");
        match self.decision {
            Decision::Cancel | Decision::EchoOriginal => TransactionResult::cancelled(),
            _ => store.offer_value(key, value),
        }
    }

    fn resolve_kind_for_key(&self, key: &DataKey) -> Option<ComponentKind> {
        self.registry.resolve(key)
    }
}
