//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod workflow;

pub use workflow::{
    CopyWorkflowCommand, CopyWorkflowError, CopyWorkflowHandler, CopyWorkflowResult,
    CreateWorkflowCommand, CreateWorkflowError, CreateWorkflowHandler, CreateWorkflowResult,
    GetWorkflowStateError, GetWorkflowStateHandler, GetWorkflowStateQuery, GetWorkflowStateResult,
    UpdateWorkflowFrequencyCommand, UpdateWorkflowFrequencyError, UpdateWorkflowFrequencyHandler,
    UpdateWorkflowFrequencyResult,
};
