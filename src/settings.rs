// Copyright 2025 Cowboy AI, LLC.

//! Composer settings

use crate::errors::DataResult;
use schemars::{schema::RootSchema, schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

/// How an attach that changes nothing is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NoOpAttachPolicy {
    /// Replace the stored component anyway and report success with equal
    /// replaced and success snapshots
    #[default]
    ReportSuccess,
    /// Keep the stored component and report `Unchanged`
    ReportUnchanged,
}

/// Settings for a [`CustomDataComposer`](crate::CustomDataComposer)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComposerSettings {
    /// Reporting of attaches whose merge result equals the existing component
    pub no_op_attach: NoOpAttachPolicy,
}

impl ComposerSettings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> DataResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// JSON schema of the settings document
    pub fn json_schema() -> RootSchema {
        schema_for!(ComposerSettings)
    }
}
