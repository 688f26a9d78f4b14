//! GetWorkflowStateHandler - Query handler for an object's derived
//! workflow state.
//!
//! Fetches the cycle tasks executing the object, then reduces them. The
//! state is recomputed on every call.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::foundation::{today, DomainError};
use crate::domain::task_group::TrackedObject;
use crate::domain::workflow_state::{derive_state, WorkflowStateView};
use crate::ports::CycleTaskReader;

/// Query for the workflow state of one tracked object.
#[derive(Debug, Clone)]
pub struct GetWorkflowStateQuery {
    pub object: TrackedObject,
}

/// Result of the state query.
pub type GetWorkflowStateResult = WorkflowStateView;

/// Error type for the state query.
#[derive(Debug, Clone)]
pub enum GetWorkflowStateError {
    /// Read failure, with its original error code.
    Domain(DomainError),
}

impl std::fmt::Display for GetWorkflowStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetWorkflowStateError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GetWorkflowStateError {}

impl From<DomainError> for GetWorkflowStateError {
    fn from(err: DomainError) -> Self {
        GetWorkflowStateError::Domain(err)
    }
}

/// Handler for the derived workflow state.
pub struct GetWorkflowStateHandler {
    reader: Arc<dyn CycleTaskReader>,
}

impl GetWorkflowStateHandler {
    pub fn new(reader: Arc<dyn CycleTaskReader>) -> Self {
        Self { reader }
    }

    /// Evaluates the state as of the current UTC date.
    pub async fn handle(
        &self,
        query: GetWorkflowStateQuery,
    ) -> Result<GetWorkflowStateResult, GetWorkflowStateError> {
        self.handle_on(query, today()).await
    }

    /// Evaluates the state as of `today`.
    pub async fn handle_on(
        &self,
        query: GetWorkflowStateQuery,
        today: NaiveDate,
    ) -> Result<GetWorkflowStateResult, GetWorkflowStateError> {
        let tasks = self.reader.find_for_object(&query.object).await?;
        let workflow_state = derive_state(&tasks, today);

        debug!(
            object = %query.object,
            tasks = tasks.len(),
            state = ?workflow_state,
            "workflow state derived"
        );

        Ok(WorkflowStateView { workflow_state })
    }
}
