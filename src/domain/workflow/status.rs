//! WorkflowStatus enum for the lifecycle of workflow definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Lifecycle status of a workflow.
///
/// Serialized with the same capitalized names used for storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WorkflowStatus {
    #[default]
    Draft,
    Active,
    Inactive,
}

impl WorkflowStatus {
    /// The valid status strings.
    pub const VALID_STATES: [&'static str; 3] = ["Draft", "Active", "Inactive"];

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "Draft",
            WorkflowStatus::Active => "Active",
            WorkflowStatus::Inactive => "Inactive",
        }
    }

    /// Returns true if cycles of this workflow may be started.
    pub fn is_active(&self) -> bool {
        matches!(self, WorkflowStatus::Active)
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkflowStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(WorkflowStatus::Draft),
            "Active" => Ok(WorkflowStatus::Active),
            "Inactive" => Ok(WorkflowStatus::Inactive),
            other => Err(ValidationError::invalid_value("status", other)),
        }
    }
}
