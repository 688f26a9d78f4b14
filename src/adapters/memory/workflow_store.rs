//! In-Memory Workflow Store Adapter
//!
//! Keeps workflow aggregates in memory and answers the cycle task query by
//! walking them. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, TaskGroupObjectId, WorkflowId};
use crate::domain::task_group::TrackedObject;
use crate::domain::workflow::Workflow;
use crate::domain::workflow_state::CycleTaskSnapshot;
use crate::ports::{CycleTaskReader, WorkflowRepository};

/// In-memory storage for workflows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkflowStore {
    workflows: Arc<RwLock<HashMap<WorkflowId, Workflow>>>,
}

impl InMemoryWorkflowStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored workflows.
    pub async fn len(&self) -> usize {
        self.workflows.read().await.len()
    }

    /// True if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.workflows.read().await.is_empty()
    }
}

#[async_trait]
impl WorkflowRepository for InMemoryWorkflowStore {
    async fn save(&self, workflow: &Workflow) -> Result<(), DomainError> {
        let mut workflows = self.workflows.write().await;
        if workflows.contains_key(&workflow.id()) {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                format!("Workflow already exists: {}", workflow.id()),
            ));
        }
        workflows.insert(workflow.id(), workflow.clone());
        Ok(())
    }

    async fn update(&self, workflow: &Workflow) -> Result<(), DomainError> {
        let mut workflows = self.workflows.write().await;
        match workflows.get_mut(&workflow.id()) {
            Some(stored) => {
                *stored = workflow.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::WorkflowNotFound,
                format!("Workflow not found: {}", workflow.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &WorkflowId) -> Result<Option<Workflow>, DomainError> {
        Ok(self.workflows.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &WorkflowId) -> Result<(), DomainError> {
        self.workflows
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::new(ErrorCode::WorkflowNotFound, format!("Workflow not found: {}", id)))
    }

    async fn exists(&self, id: &WorkflowId) -> Result<bool, DomainError> {
        Ok(self.workflows.read().await.contains_key(id))
    }
}

#[async_trait]
impl CycleTaskReader for InMemoryWorkflowStore {
    async fn find_for_object(&self, object: &TrackedObject) -> Result<Vec<CycleTaskSnapshot>, DomainError> {
        let workflows = self.workflows.read().await;
        let mut snapshots = Vec::new();

        for workflow in workflows.values() {
            let linked: Vec<TaskGroupObjectId> = workflow
                .task_groups()
                .iter()
                .flat_map(|tg| tg.objects())
                .filter(|link| link.object() == object)
                .map(|link| link.id())
                .collect();
            if linked.is_empty() {
                continue;
            }

            for cycle in workflow.cycles() {
                snapshots.extend(
                    CycleTaskSnapshot::of_cycle(cycle)
                        .into_iter()
                        .zip(cycle.tasks())
                        .filter(|(_, task)| linked.contains(&task.task_group_object_id()))
                        .map(|(snapshot, _)| snapshot),
                );
            }
        }

        Ok(snapshots)
    }
}
