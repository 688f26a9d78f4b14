//! CycleTaskStatus enum for tracking execution of cycles and their tasks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Execution status of a cycle or of a task inside a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CycleTaskStatus {
    #[default]
    Assigned,
    InProgress,
    Finished,
    Verified,
}

impl CycleTaskStatus {
    /// Returns the canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleTaskStatus::Assigned => "Assigned",
            CycleTaskStatus::InProgress => "InProgress",
            CycleTaskStatus::Finished => "Finished",
            CycleTaskStatus::Verified => "Verified",
        }
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Assigned -> InProgress
    /// - InProgress -> Finished
    /// - Finished -> Verified
    /// - Finished -> InProgress (declined by the verifier)
    pub fn can_transition_to(&self, target: &CycleTaskStatus) -> bool {
        use CycleTaskStatus::*;
        matches!(
            (self, target),
            (Assigned, InProgress) | (InProgress, Finished) | (Finished, Verified) | (Finished, InProgress)
        )
    }
}

impl fmt::Display for CycleTaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CycleTaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Assigned" => Ok(CycleTaskStatus::Assigned),
            "InProgress" => Ok(CycleTaskStatus::InProgress),
            "Finished" => Ok(CycleTaskStatus::Finished),
            "Verified" => Ok(CycleTaskStatus::Verified),
            other => Err(ValidationError::invalid_value("status", other)),
        }
    }
}
