//! UpdateWorkflowFrequencyHandler - Command handler for changing a
//! workflow's schedule.
//!
//! The raw value goes through frequency validation; a rejected value leaves
//! the stored workflow untouched.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{today, CommandMetadata, DomainError, WorkflowId};
use crate::domain::workflow::{Frequency, Workflow};
use crate::ports::WorkflowRepository;

/// Command to change a workflow's frequency.
#[derive(Debug, Clone)]
pub struct UpdateWorkflowFrequencyCommand {
    pub workflow_id: WorkflowId,
    /// Raw frequency; `None` resets to continuous.
    pub frequency: Option<String>,
}

/// Result of a successful frequency change.
#[derive(Debug, Clone)]
pub struct UpdateWorkflowFrequencyResult {
    pub workflow: Workflow,
    pub previous: Frequency,
}

/// Error type for frequency updates.
#[derive(Debug, Clone)]
pub enum UpdateWorkflowFrequencyError {
    /// Workflow not found.
    NotFound(WorkflowId),
    /// Invalid frequency or persistence failure.
    Domain(DomainError),
}

impl std::fmt::Display for UpdateWorkflowFrequencyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateWorkflowFrequencyError::NotFound(id) => write!(f, "Workflow not found: {}", id),
            UpdateWorkflowFrequencyError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for UpdateWorkflowFrequencyError {}

impl From<DomainError> for UpdateWorkflowFrequencyError {
    fn from(err: DomainError) -> Self {
        UpdateWorkflowFrequencyError::Domain(err)
    }
}

/// Handler for frequency updates.
pub struct UpdateWorkflowFrequencyHandler {
    repository: Arc<dyn WorkflowRepository>,
}

impl UpdateWorkflowFrequencyHandler {
    pub fn new(repository: Arc<dyn WorkflowRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateWorkflowFrequencyCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateWorkflowFrequencyResult, UpdateWorkflowFrequencyError> {
        let mut workflow = self
            .repository
            .find_by_id(&cmd.workflow_id)
            .await?
            .ok_or(UpdateWorkflowFrequencyError::NotFound(cmd.workflow_id))?;

        let previous = workflow.frequency();
        if let Err(err) = workflow.set_frequency(cmd.frequency.as_deref()) {
            warn!(
                workflow_id = %cmd.workflow_id,
                value = ?cmd.frequency,
                "rejected workflow frequency"
            );
            return Err(err.into());
        }

        // Reschedule from the window start, or from today for open windows.
        let from = workflow.start_date().unwrap_or_else(today);
        workflow.schedule_next_cycle(from);

        self.repository.update(&workflow).await?;

        info!(
            workflow_id = %workflow.id(),
            previous = %previous,
            frequency = %workflow.frequency(),
            user_id = %metadata.user_id,
            "workflow frequency updated"
        );

        Ok(UpdateWorkflowFrequencyResult { workflow, previous })
    }
}
