// Copyright 2025 Cowboy AI, LLC.

//! Holder identity and activation capability

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identifier of the object that owns a set of custom data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HolderId(Uuid);

impl HolderId {
    /// Create a new random holder ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a holder ID from a UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for HolderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reports whether a holder is live in the world and able to fire change events
#[cfg_attr(test, mockall::automock)]
pub trait ActivationQuery {
    /// Whether the holder is fully initialized and registered
    fn is_active(&self) -> bool;
}

/// Activation capability a holder declares when its composer is built
#[derive(Clone, Default)]
pub enum Activation {
    /// The holder never takes part in event-mediated changes
    #[default]
    Inert,
    /// The holder reports its activity on every call
    Tracked(Arc<dyn ActivationQuery>),
}

impl Activation {
    /// Track activity through `query`
    pub fn tracked(query: impl ActivationQuery + 'static) -> Self {
        Activation::Tracked(Arc::new(query))
    }

    /// Whether changes must currently go through the mediator
    pub fn is_active(&self) -> bool {
        match self {
            Activation::Inert => false,
            Activation::Tracked(query) => query.is_active(),
        }
    }
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activation::Inert => f.write_str("Inert"),
            Activation::Tracked(_) => f.write_str("Tracked(..)"),
        }
    }
}

/// Activation backed by a shared flag, flipped by the host when it joins or leaves the world
#[derive(Debug, Clone, Default)]
pub struct ActivationFlag(Arc<std::sync::atomic::AtomicBool>);

impl ActivationFlag {
    /// Create an inactive flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag
    pub fn set_active(&self, active: bool) {
        self.0.store(active, std::sync::atomic::Ordering::SeqCst);
    }
}

impl ActivationQuery for ActivationFlag {
    fn is_active(&self) -> bool {
        self.0.load(std::sync::atomic::Ordering::SeqCst)
    }
}
