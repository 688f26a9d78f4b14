//! TaskGroup and TaskGroupObject entities.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ContextId, PersonId, TaskGroupId, TaskGroupObjectId, ValidationError, WorkflowId,
};

use super::TrackedObject;

/// Link between a task group and one tracked business object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGroupObject {
    id: TaskGroupObjectId,
    task_group_id: TaskGroupId,
    context_id: ContextId,
    object: TrackedObject,
}

impl TaskGroupObject {
    /// Reconstitutes a link from persisted data.
    pub fn reconstitute(
        id: TaskGroupObjectId,
        task_group_id: TaskGroupId,
        context_id: ContextId,
        object: TrackedObject,
    ) -> Self {
        Self {
            id,
            task_group_id,
            context_id,
            object,
        }
    }

    pub fn id(&self) -> TaskGroupObjectId {
        self.id
    }

    pub fn task_group_id(&self) -> TaskGroupId {
        self.task_group_id
    }

    pub fn context_id(&self) -> ContextId {
        self.context_id
    }

    pub fn object(&self) -> &TrackedObject {
        &self.object
    }
}

/// A named bundle of tracked objects inside a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGroup {
    id: TaskGroupId,
    workflow_id: WorkflowId,
    context_id: ContextId,
    title: String,
    description: Option<String>,
    contact_id: Option<PersonId>,
    objects: Vec<TaskGroupObject>,
}

impl TaskGroup {
    /// Creates an empty task group for a workflow.
    ///
    /// # Errors
    ///
    /// Returns `EmptyField` if the title is blank.
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
            id: TaskGroupId::new(),
            workflow_id,
            context_id,
            title,
            description: None,
            contact_id: None,
            objects: Vec::new(),
        })
    }

    /// Reconstitutes a task group from persisted data.
    pub fn reconstitute(
        id: TaskGroupId,
        workflow_id: WorkflowId,
        context_id: ContextId,
        title: String,
        description: Option<String>,
        contact_id: Option<PersonId>,
        objects: Vec<TaskGroupObject>,
    ) -> Self {
        Self {
            id,
            workflow_id,
            context_id,
            title,
            description,
            contact_id,
            objects,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> TaskGroupId {
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

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn contact_id(&self) -> Option<PersonId> {
        self.contact_id
    }

    pub fn objects(&self) -> &[TaskGroupObject] {
        &self.objects
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations
    // ───────────────────────────────────────────────────────────────

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn set_contact(&mut self, contact_id: Option<PersonId>) {
        self.contact_id = contact_id;
    }

    /// Links a tracked object to this group.
    ///
    /// Linking the same object twice is a no-op; the existing link is returned.
    pub fn add_object(&mut self, object: TrackedObject) -> TaskGroupObjectId {
        if let Some(existing) = self.objects.iter().find(|o| o.object == object) {
            return existing.id;
        }
        let link = TaskGroupObject {
            id: TaskGroupObjectId::new(),
            task_group_id: self.id,
            context_id: self.context_id,
            object,
        };
        let id = link.id;
        self.objects.push(link);
        id
    }

    /// Unlinks a tracked object. Returns true if a link was removed.
    pub fn remove_object(&mut self, object: &TrackedObject) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| &o.object != object);
        self.objects.len() != before
    }

    /// Deep-copies this group into another workflow.
    ///
    /// The copy gets a fresh id, belongs to `workflow_id`, lives in
    /// `context_id`, and gets fresh links to the same tracked objects.
    pub fn copy(&self, workflow_id: WorkflowId, context_id: ContextId) -> TaskGroup {
        let id = TaskGroupId::new();
        let objects = self
            .objects
            .iter()
            .map(|o| TaskGroupObject {
                id: TaskGroupObjectId::new(),
                task_group_id: id,
                context_id,
                object: o.object.clone(),
            })
            .collect();

        TaskGroup {
            id,
            workflow_id,
            context_id,
            title: self.title.clone(),
            description: self.description.clone(),
            contact_id: self.contact_id,
            objects,
        }
    }
}
