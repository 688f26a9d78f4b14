//! Workflow module - Reusable definitions of recurring task groups.
//!
//! A Workflow carries the schedule (frequency, window, recurrence), the
//! notification preferences and the people, task groups and cycles it owns.
//! Duplicating a workflow clones its definition, never its history.

mod aggregate;
mod folder;
mod frequency;
mod published;
mod status;

pub use aggregate::{Workflow, WorkflowOverrides, WorkflowPerson, WorkflowRecord};
pub use folder::FolderRef;
pub use frequency::{validate_frequency, Frequency};
pub use published::{PublishedWorkflow, FULLTEXT_ATTRS, PUBLISH_ATTRS, PUBLISH_ONLY_ATTRS};
pub use status::WorkflowStatus;
