//! In-memory folder provider.
//!
//! Hands out one deterministic folder id per workflow and remembers it.
//! Stands in for a real document store in development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, WorkflowId};
use crate::domain::workflow::{FolderRef, Workflow};
use crate::ports::FolderProvider;

/// Folder provider backed by a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFolderProvider {
    folders: Arc<RwLock<HashMap<WorkflowId, FolderRef>>>,
}

impl InMemoryFolderProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of folders created so far.
    pub async fn folder_count(&self) -> usize {
        self.folders.read().await.len()
    }
}

#[async_trait]
impl FolderProvider for InMemoryFolderProvider {
    async fn create_folder(&self, workflow: &Workflow) -> Result<FolderRef, DomainError> {
        let mut folders = self.folders.write().await;
        if let Some(existing) = folders.get(&workflow.id()) {
            return Ok(existing.clone());
        }
        let folder = FolderRef::new(format!("folder-{}", workflow.slug().to_lowercase()))?;
        folders.insert(workflow.id(), folder.clone());
        Ok(folder)
    }
}
