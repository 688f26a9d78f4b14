//! The derived state names and their display priority.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Aggregate status shown for anything that participates in cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowStateName {
    Overdue,
    InProgress,
    Finished,
    Assigned,
    Verified,
}

impl WorkflowStateName {
    /// Highest priority first. The first raised state wins.
    pub const PRIORITY: [WorkflowStateName; 5] = [
        WorkflowStateName::Overdue,
        WorkflowStateName::InProgress,
        WorkflowStateName::Finished,
        WorkflowStateName::Assigned,
        WorkflowStateName::Verified,
    ];

    /// Position in [`Self::PRIORITY`]; lower is more urgent.
    pub fn rank(&self) -> usize {
        match self {
            WorkflowStateName::Overdue => 0,
            WorkflowStateName::InProgress => 1,
            WorkflowStateName::Finished => 2,
            WorkflowStateName::Assigned => 3,
            WorkflowStateName::Verified => 4,
        }
    }

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStateName::Overdue => "Overdue",
            WorkflowStateName::InProgress => "InProgress",
            WorkflowStateName::Finished => "Finished",
            WorkflowStateName::Assigned => "Assigned",
            WorkflowStateName::Verified => "Verified",
        }
    }
}

impl fmt::Display for WorkflowStateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkflowStateName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkflowStateName::PRIORITY
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_value("workflow_state", s))
    }
}
