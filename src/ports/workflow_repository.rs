//! Workflow repository port (write side).
//!
//! Defines the contract for persisting and retrieving Workflow aggregates
//! together with everything they own.
//!
//! # Design
//!
//! - **Aggregate-scoped**: people, task groups (with their objects) and
//!   cycles (with their tasks) are saved and loaded with the workflow
//! - **Cascading delete**: deleting a workflow deletes everything it owns

use crate::domain::foundation::{DomainError, WorkflowId};
use crate::domain::workflow::Workflow;
use async_trait::async_trait;

/// Repository port for Workflow aggregate persistence.
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    /// Save a new workflow.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if a workflow with the same id exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, workflow: &Workflow) -> Result<(), DomainError>;

    /// Replace an existing workflow, including its owned collections.
    ///
    /// # Errors
    ///
    /// - `WorkflowNotFound` if the workflow doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, workflow: &Workflow) -> Result<(), DomainError>;

    /// Find a workflow by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &WorkflowId) -> Result<Option<Workflow>, DomainError>;

    /// Delete a workflow and everything it owns.
    ///
    /// # Errors
    ///
    /// - `WorkflowNotFound` if the workflow doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &WorkflowId) -> Result<(), DomainError>;

    /// Check if a workflow exists.
    async fn exists(&self, id: &WorkflowId) -> Result<bool, DomainError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
