//! CopyWorkflowHandler - Command handler for duplicating workflows.
//!
//! Copies the source definition into a new draft workflow, optionally
//! followed by deep copies of its task groups. History (people, cycles,
//! status) stays with the source.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, DomainError, WorkflowId};
use crate::domain::workflow::{Workflow, WorkflowOverrides};
use crate::ports::WorkflowRepository;

/// Command to duplicate a workflow.
#[derive(Debug, Clone)]
pub struct CopyWorkflowCommand {
    pub source_id: WorkflowId,
    pub overrides: WorkflowOverrides,
    /// Also copy the source's task groups into the new workflow.
    pub copy_task_groups: bool,
}

/// Result of a successful duplication.
#[derive(Debug, Clone)]
pub struct CopyWorkflowResult {
    pub workflow: Workflow,
    pub source_id: WorkflowId,
}

/// Error type for workflow duplication.
#[derive(Debug, Clone)]
pub enum CopyWorkflowError {
    /// Source workflow not found.
    NotFound(WorkflowId),
    /// Domain error (e.g., blank title override).
    Domain(DomainError),
}

impl std::fmt::Display for CopyWorkflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CopyWorkflowError::NotFound(id) => write!(f, "Workflow not found: {}", id),
            CopyWorkflowError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CopyWorkflowError {}

impl From<DomainError> for CopyWorkflowError {
    fn from(err: DomainError) -> Self {
        CopyWorkflowError::Domain(err)
    }
}

/// Handler for duplicating workflows.
pub struct CopyWorkflowHandler {
    repository: Arc<dyn WorkflowRepository>,
}

impl CopyWorkflowHandler {
    pub fn new(repository: Arc<dyn WorkflowRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CopyWorkflowCommand,
        metadata: CommandMetadata,
    ) -> Result<CopyWorkflowResult, CopyWorkflowError> {
        let source = self
            .repository
            .find_by_id(&cmd.source_id)
            .await?
            .ok_or(CopyWorkflowError::NotFound(cmd.source_id))?;

        let mut workflow = source.copy(None, cmd.overrides)?;
        if cmd.copy_task_groups {
            workflow = source.copy_task_groups(workflow);
        }

        self.repository.save(&workflow).await?;

        info!(
            source_id = %source.id(),
            workflow_id = %workflow.id(),
            task_groups = workflow.task_groups().len(),
            user_id = %metadata.user_id,
            correlation_id = %metadata.correlation_id(),
            "workflow copied"
        );

        Ok(CopyWorkflowResult {
            workflow,
            source_id: cmd.source_id,
        })
    }
}
