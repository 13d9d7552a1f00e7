// Copyright 2025 Cowboy AI, LLC.

//! Merge strategies that resolve an attach against an existing component

use crate::component::DataComponent;

/// Resolves an incoming component against the existing one of the same kind
///
/// Returning `None` means the attach resolves to removal of the existing
/// component. Any `Fn(Option<&dyn DataComponent>, Box<dyn DataComponent>) ->
/// Option<Box<dyn DataComponent>>` closure is a merge function.
pub trait MergeFunction {
    /// Merge `incoming` into `existing`
    fn merge(
        &self,
        existing: Option<&dyn DataComponent>,
        incoming: Box<dyn DataComponent>,
    ) -> Option<Box<dyn DataComponent>>;
}

impl<F> MergeFunction for F
where
    F: Fn(Option<&dyn DataComponent>, Box<dyn DataComponent>) -> Option<Box<dyn DataComponent>>,
{
    fn merge(
        &self,
        existing: Option<&dyn DataComponent>,
        incoming: Box<dyn DataComponent>,
    ) -> Option<Box<dyn DataComponent>> {
        self(existing, incoming)
    }
}

/// The incoming component wins outright
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferIncoming;

impl MergeFunction for PreferIncoming {
    fn merge(
        &self,
        _existing: Option<&dyn DataComponent>,
        incoming: Box<dyn DataComponent>,
    ) -> Option<Box<dyn DataComponent>> {
        Some(incoming)
    }
}

/// An existing component is kept; the incoming one only fills an empty kind
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepExisting;

impl MergeFunction for KeepExisting {
    fn merge(
        &self,
        existing: Option<&dyn DataComponent>,
        incoming: Box<dyn DataComponent>,
    ) -> Option<Box<dyn DataComponent>> {
        match existing {
            Some(existing) => Some(existing.clone_box()),
            None => Some(incoming),
        }
    }
}

/// Incoming values win; slots the incoming component leaves unset keep the existing value
#[derive(Debug, Clone, Copy, Default)]
pub struct CombineValues;

impl MergeFunction for CombineValues {
    fn merge(
        &self,
        existing: Option<&dyn DataComponent>,
        mut incoming: Box<dyn DataComponent>,
    ) -> Option<Box<dyn DataComponent>> {
        if let Some(existing) = existing {
            if existing.kind() == incoming.kind() {
                incoming.slots_mut().fill_from(existing.slots());
            }
        }
        Some(incoming)
    }
}

/// Resolves every attach to removal
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl MergeFunction for Discard {
    fn merge(
        &self,
        _existing: Option<&dyn DataComponent>,
        _incoming: Box<dyn DataComponent>,
    ) -> Option<Box<dyn DataComponent>> {
        None
    }
}
