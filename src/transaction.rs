// Copyright 2025 Cowboy AI, LLC.

//! Transaction results and mediator resolutions

use crate::component::DataComponent;
use crate::errors::{DataError, DataResult};
use crate::value::ValueSnapshot;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a data transaction ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// Changes were applied
    Success,
    /// There was nothing to act on
    FailNoData,
    /// The change was refused, see the rejected values
    Failure,
    /// A listener vetoed the change
    Cancelled,
    /// The change would not alter anything and was skipped
    Unchanged,
}

impl Outcome {
    /// Name of the outcome
    pub fn name(&self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::FailNoData => "FailNoData",
            Outcome::Failure => "Failure",
            Outcome::Cancelled => "Cancelled",
            Outcome::Unchanged => "Unchanged",
        }
    }

    /// Whether the outcome counts as success
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success | Outcome::Unchanged)
    }
}

/// Report of what a mutating operation replaced and set
///
/// Built in one step from its snapshot lists; never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResult {
    replaced: ValueSnapshot,
    success: ValueSnapshot,
    rejected: ValueSnapshot,
    outcome: Outcome,
}

impl TransactionResult {
    /// Build a result from its parts
    pub fn new(
        outcome: Outcome,
        replaced: ValueSnapshot,
        success: ValueSnapshot,
        rejected: ValueSnapshot,
    ) -> Self {
        Self {
            replaced,
            success,
            rejected,
            outcome,
        }
    }

    /// Successful result
    pub fn success_result(replaced: ValueSnapshot, success: ValueSnapshot) -> Self {
        Self::new(Outcome::Success, replaced, success, Vec::new())
    }

    /// Nothing to act on
    pub fn fail_no_data() -> Self {
        Self::new(Outcome::FailNoData, Vec::new(), Vec::new(), Vec::new())
    }

    /// Refused change
    pub fn fail_result(rejected: ValueSnapshot) -> Self {
        Self::new(Outcome::Failure, Vec::new(), Vec::new(), rejected)
    }

    /// Vetoed change
    pub fn cancelled() -> Self {
        Self::new(Outcome::Cancelled, Vec::new(), Vec::new(), Vec::new())
    }

    /// Skipped no-op change
    pub fn unchanged() -> Self {
        Self::new(Outcome::Unchanged, Vec::new(), Vec::new(), Vec::new())
    }

    /// Values that were replaced or removed
    pub fn replaced(&self) -> &ValueSnapshot {
        &self.replaced
    }

    /// Values that were newly set
    pub fn success(&self) -> &ValueSnapshot {
        &self.success
    }

    /// Values that were refused
    pub fn rejected(&self) -> &ValueSnapshot {
        &self.rejected
    }

    /// How the transaction ended
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Whether the transaction succeeded
    pub fn is_successful(&self) -> bool {
        self.outcome.is_success()
    }

    /// Convert a non-successful result into an error
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NotApplied`] unless the outcome is a success
    pub fn require_success(self) -> DataResult<Self> {
        if self.is_successful() {
            Ok(self)
        } else {
            Err(DataError::NotApplied {
                outcome: self.outcome,
            })
        }
    }
}

/// What a mediator decided about a pending change
///
/// `Apply(None)` means the change resolves to removal; `Cancelled` means
/// nothing may change.
#[derive(Debug)]
pub enum Resolution {
    /// Apply the resolved component, or remove when absent
    Apply(Option<Box<dyn DataComponent>>),
    /// Leave the store untouched
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{DataKey, ValueType};
    use crate::value::ImmutableValue;
    use serde_json::json;

    const LEVEL: DataKey = DataKey::new("custom:level", ValueType::Integer);

    #[test]
    fn test_outcome_success_flags() {
        assert!(Outcome::Success.is_success());
        assert!(Outcome::Unchanged.is_success());
        assert!(!Outcome::FailNoData.is_success());
        assert!(!Outcome::Failure.is_success());
        assert!(!Outcome::Cancelled.is_success());
        assert_eq!(Outcome::FailNoData.name(), "FailNoData");
    }

    #[test]
    fn test_fail_no_data_is_empty() {
        let result = TransactionResult::fail_no_data();
        assert_eq!(result.outcome(), Outcome::FailNoData);
        assert!(result.replaced().is_empty());
        assert!(result.success().is_empty());
        assert!(result.rejected().is_empty());
        assert!(!result.is_successful());
    }

    #[test]
    fn test_require_success() {
        let ok = TransactionResult::success_result(
            vec![ImmutableValue::new(LEVEL, json!(1))],
            vec![ImmutableValue::new(LEVEL, json!(2))],
        );
        assert!(ok.clone().require_success().is_ok());

        let err = TransactionResult::cancelled().require_success().unwrap_err();
        assert_eq!(
            err,
            DataError::NotApplied {
                outcome: Outcome::Cancelled
            }
        );
    }

    #[test]
    fn test_outcome_serde_names() {
        assert_eq!(serde_json::to_value(Outcome::FailNoData).unwrap(), json!("FAIL_NO_DATA"));
        assert_eq!(serde_json::to_value(Outcome::Success).unwrap(), json!("SUCCESS"));
    }
}
