//! Batch operation reporting.
//!
//! Bulk payroll actions are best-effort: one target's failure never rolls
//! back the others. The types here collect the per-target outcomes a bulk
//! operation returns to its caller. They are never persisted.

use serde::{Deserialize, Serialize};

/// The outcome of a bulk operation for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetOutcome {
    /// The action was applied to this target.
    Succeeded,
    /// The target was intentionally left alone.
    Skipped {
        /// Why the target was skipped.
        reason: String,
    },
    /// The action failed for this target.
    Failed {
        /// Why the action failed.
        reason: String,
    },
}

/// The outcome of a bulk operation for one named target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetReport {
    /// The employee id or record id the outcome refers to.
    pub target: String,
    /// What happened to the target.
    #[serde(flatten)]
    pub outcome: TargetOutcome,
}

/// The collected per-target outcomes of one bulk operation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::BatchOperationResult;
///
/// let mut result = BatchOperationResult::new();
/// result.record_success("emp_001");
/// result.record_skipped("emp_002", "already-finalized");
/// assert_eq!(result.succeeded(), 1);
/// assert_eq!(result.skipped(), 1);
/// assert_eq!(result.failed(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOperationResult {
    /// One report per target, in submission order.
    pub reports: Vec<TargetReport>,
}

impl BatchOperationResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful target.
    pub fn record_success(&mut self, target: impl Into<String>) {
        self.reports.push(TargetReport {
            target: target.into(),
            outcome: TargetOutcome::Succeeded,
        });
    }

    /// Records a skipped target with its reason.
    pub fn record_skipped(&mut self, target: impl Into<String>, reason: impl Into<String>) {
        self.reports.push(TargetReport {
            target: target.into(),
            outcome: TargetOutcome::Skipped {
                reason: reason.into(),
            },
        });
    }

    /// Records a failed target with its reason.
    pub fn record_failure(&mut self, target: impl Into<String>, reason: impl Into<String>) {
        self.reports.push(TargetReport {
            target: target.into(),
            outcome: TargetOutcome::Failed {
                reason: reason.into(),
            },
        });
    }

    /// The number of targets the action was applied to.
    pub fn succeeded(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, TargetOutcome::Succeeded))
            .count()
    }

    /// The number of targets intentionally left alone.
    pub fn skipped(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, TargetOutcome::Skipped { .. }))
            .count()
    }

    /// The number of targets the action failed for.
    pub fn failed(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, TargetOutcome::Failed { .. }))
            .count()
    }

    /// True when every target succeeded.
    pub fn is_complete_success(&self) -> bool {
        self.failed() == 0 && self.skipped() == 0
    }
}
