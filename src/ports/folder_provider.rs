//! Folder provider port.
//!
//! Attaching a document folder to a workflow is an optional capability.
//! When configured, a provider creates the folder and the workflow keeps a
//! [`FolderRef`] to it; when not, workflows have no folder.

use crate::domain::foundation::DomainError;
use crate::domain::workflow::{FolderRef, Workflow};
use async_trait::async_trait;

/// Port for an external document store.
#[async_trait]
pub trait FolderProvider: Send + Sync {
    /// Creates (or finds) the folder for `workflow`.
    ///
    /// # Errors
    ///
    /// - `StorageError` if the document store rejects the request
    async fn create_folder(&self, workflow: &Workflow) -> Result<FolderRef, DomainError>;
}
