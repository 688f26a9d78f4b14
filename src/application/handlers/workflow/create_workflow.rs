//! CreateWorkflowHandler - Command handler for creating workflows.
//!
//! Builds a draft workflow, attaches a document folder when a folder
//! provider is configured, and persists it.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::foundation::{CommandMetadata, DomainError, PersonId};
use crate::domain::workflow::Workflow;
use crate::ports::{FolderProvider, WorkflowRepository};

/// Command to create a new workflow.
#[derive(Debug, Clone, Default)]
pub struct CreateWorkflowCommand {
    pub title: String,
    pub description: Option<String>,
    /// Raw frequency; `None` means continuous.
    pub frequency: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub recurrences: bool,
    /// People to associate with the workflow.
    pub people: Vec<PersonId>,
}

/// Result of successful workflow creation.
#[derive(Debug, Clone)]
pub struct CreateWorkflowResult {
    pub workflow: Workflow,
}

/// Error type for workflow creation.
#[derive(Debug, Clone)]
pub enum CreateWorkflowError {
    /// Validation or persistence failure.
    Domain(DomainError),
}

impl std::fmt::Display for CreateWorkflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateWorkflowError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CreateWorkflowError {}

impl From<DomainError> for CreateWorkflowError {
    fn from(err: DomainError) -> Self {
        CreateWorkflowError::Domain(err)
    }
}

/// Handler for creating workflows.
pub struct CreateWorkflowHandler {
    repository: Arc<dyn WorkflowRepository>,
    folder_provider: Option<Arc<dyn FolderProvider>>,
}

impl CreateWorkflowHandler {
    pub fn new(repository: Arc<dyn WorkflowRepository>) -> Self {
        Self {
            repository,
            folder_provider: None,
        }
    }

    /// Enables the folder capability.
    pub fn with_folder_provider(mut self, provider: Arc<dyn FolderProvider>) -> Self {
        self.folder_provider = Some(provider);
        self
    }

    pub async fn handle(
        &self,
        cmd: CreateWorkflowCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateWorkflowResult, CreateWorkflowError> {
        let mut workflow = Workflow::new(cmd.title).map_err(DomainError::from)?;
        workflow.set_description(cmd.description);
        workflow.set_frequency(cmd.frequency.as_deref())?;
        workflow.set_dates(cmd.start_date, cmd.end_date);
        workflow.set_recurrences(cmd.recurrences);
        if let Some(start) = cmd.start_date {
            workflow.schedule_next_cycle(start);
        }
        for person in cmd.people {
            workflow.add_person(person);
        }

        if let Some(provider) = &self.folder_provider {
            let folder = provider.create_folder(&workflow).await?;
            workflow.attach_folder(folder);
        }

        self.repository.save(&workflow).await?;

        info!(
            workflow_id = %workflow.id(),
            user_id = %metadata.user_id,
            correlation_id = %metadata.correlation_id(),
            frequency = %workflow.frequency(),
            "workflow created"
        );

        Ok(CreateWorkflowResult { workflow })
    }
}
