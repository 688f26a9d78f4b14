//! Workflow state - The derived status of objects that take part in cycles.
//!
//! The state is never stored. It is computed on read from the cycle tasks
//! linked to an object:
//!
//! ```text
//! CycleTaskReader (port)  ->  Vec<CycleTaskSnapshot>  ->  derive_state()  ->  Option<WorkflowStateName>
//! ```
//!
//! Keeping the reduction pure lets it be tested without a database.

mod cycle_task;
mod name;
mod reducer;

pub use cycle_task::{CycleTaskRef, CycleTaskSnapshot};
pub use name::WorkflowStateName;
pub use reducer::{derive_state, derive_state_today};

use serde::Serialize;

/// Attribute name under which the derived state is published.
pub const WORKFLOW_STATE_ATTR: &str = "workflow_state";

/// Read-only API view of the derived state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkflowStateView {
    pub workflow_state: Option<WorkflowStateName>,
}
