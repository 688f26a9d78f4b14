//! Cycle aggregate - One concrete execution of a workflow.
//!
//! A Cycle owns the CycleTaskGroupObjects generated for it: one per task
//! group object of the workflow at the time the cycle started. Only cycles
//! flagged `is_current` contribute to a workflow's derived state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ContextId, CycleId, CycleTaskGroupObjectId, DomainError, ErrorCode, TaskGroupObjectId,
    ValidationError, WorkflowId,
};

use super::CycleTaskStatus;

/// The execution of one task group object inside a cycle.
///
/// `status` is kept as the raw stored string: rows may be written by other
/// services, so values outside [`CycleTaskStatus`] can appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleTaskGroupObject {
    id: CycleTaskGroupObjectId,
    cycle_id: CycleId,
    task_group_object_id: TaskGroupObjectId,
    status: Option<String>,
    end_date: Option<NaiveDate>,
}

impl CycleTaskGroupObject {
    /// Reconstitutes a cycle task from persisted data.
    pub fn reconstitute(
        id: CycleTaskGroupObjectId,
        cycle_id: CycleId,
        task_group_object_id: TaskGroupObjectId,
        status: Option<String>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            cycle_id,
            task_group_object_id,
            status,
            end_date,
        }
    }

    pub fn id(&self) -> CycleTaskGroupObjectId {
        self.id
    }

    pub fn cycle_id(&self) -> CycleId {
        self.cycle_id
    }

    pub fn task_group_object_id(&self) -> TaskGroupObjectId {
        self.task_group_object_id
    }

    /// The raw stored status, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn set_end_date(&mut self, end_date: Option<NaiveDate>) {
        self.end_date = end_date;
    }

    /// Moves the task to `target`, enforcing [`CycleTaskStatus::can_transition_to`].
    ///
    /// A task with no status is treated as `Assigned`.
    pub fn transition_to(&mut self, target: CycleTaskStatus) -> Result<(), DomainError> {
        let current = match self.status.as_deref() {
            None | Some("") => CycleTaskStatus::Assigned,
            Some(raw) => raw.parse::<CycleTaskStatus>()?,
        };
        if !current.can_transition_to(&target) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Cannot move task from {} to {}", current, target),
            )
            .with_detail("field", "status"));
        }
        self.status = Some(target.as_str().to_string());
        Ok(())
    }
}

/// The Cycle aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    id: CycleId,
    workflow_id: WorkflowId,
    context_id: ContextId,
    title: String,
    status: CycleTaskStatus,
    is_current: bool,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    tasks: Vec<CycleTaskGroupObject>,
}

impl Cycle {
    /// Starts a new, current cycle for a workflow.
    pub fn new(
        workflow_id: WorkflowId,
        context_id: ContextId,
        title: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        Ok(Self {
            id: CycleId::new(),
            workflow_id,
            context_id,
            title,
            status: CycleTaskStatus::Assigned,
            is_current: true,
            start_date: None,
            end_date: None,
            tasks: Vec::new(),
        })
    }

    /// Reconstitutes a cycle from persisted data.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: CycleId,
        workflow_id: WorkflowId,
        context_id: ContextId,
        title: String,
        status: CycleTaskStatus,
        is_current: bool,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        tasks: Vec<CycleTaskGroupObject>,
    ) -> Self {
        Self {
            id,
            workflow_id,
            context_id,
            title,
            status,
            is_current,
            start_date,
            end_date,
            tasks,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> CycleId {
        self.id
    }

    pub fn workflow_id(&self) -> WorkflowId {
        self.workflow_id
    }

    pub fn context_id(&self) -> ContextId {
        self.context_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> CycleTaskStatus {
        self.status
    }

    /// Returns true if this is the execution currently in progress.
    pub fn is_current(&self) -> bool {
        self.is_current
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn tasks(&self) -> &[CycleTaskGroupObject] {
        &self.tasks
    }

    pub fn task_mut(&mut self, id: CycleTaskGroupObjectId) -> Option<&mut CycleTaskGroupObject> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations
    // ───────────────────────────────────────────────────────────────

    /// Sets the active window of this cycle.
    pub fn set_window(&mut self, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) {
        self.start_date = start_date;
        self.end_date = end_date;
    }

    /// Adds the execution of a task group object to this cycle.
    ///
    /// New tasks start without a status (unassigned work shows as `Assigned`).
    pub fn add_task(
        &mut self,
        task_group_object_id: TaskGroupObjectId,
        end_date: Option<NaiveDate>,
    ) -> CycleTaskGroupObjectId {
        let task = CycleTaskGroupObject {
            id: CycleTaskGroupObjectId::new(),
            cycle_id: self.id,
            task_group_object_id,
            status: None,
            end_date,
        };
        let id = task.id;
        self.tasks.push(task);
        id
    }

    /// Moves the cycle itself to `target`.
    pub fn transition_to(&mut self, target: CycleTaskStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&target) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Cannot move cycle from {} to {}", self.status, target),
            )
            .with_detail("field", "status"));
        }
        self.status = target;
        Ok(())
    }

    /// Marks this cycle as superseded; it no longer affects derived state.
    pub fn retire(&mut self) {
        self.is_current = false;
    }
}
