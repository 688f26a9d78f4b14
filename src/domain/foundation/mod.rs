//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, time helpers, command metadata and error types
//! that form the vocabulary of the workflow domain.

mod command;
mod errors;
mod ids;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    ContextId, CycleId, CycleTaskGroupObjectId, PersonId, TaskGroupId, TaskGroupObjectId,
    UserId, WorkflowId, WorkflowPersonId,
};
pub use timestamp::{today, Timestamp};
