//! Workflow command and query handlers.

// Command handlers
mod copy_workflow;
mod create_workflow;
mod update_workflow_frequency;

// Query handlers
mod get_workflow_state;

pub use copy_workflow::{
    CopyWorkflowCommand, CopyWorkflowError, CopyWorkflowHandler, CopyWorkflowResult,
};
pub use create_workflow::{
    CreateWorkflowCommand, CreateWorkflowError, CreateWorkflowHandler, CreateWorkflowResult,
};
pub use update_workflow_frequency::{
    UpdateWorkflowFrequencyCommand, UpdateWorkflowFrequencyError, UpdateWorkflowFrequencyHandler,
    UpdateWorkflowFrequencyResult,
};

// Query handlers
pub use get_workflow_state::{
    GetWorkflowStateError, GetWorkflowStateHandler, GetWorkflowStateQuery, GetWorkflowStateResult,
};
