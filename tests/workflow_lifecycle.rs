//! Integration tests for the workflow lifecycle.
//!
//! Drives the handlers end to end over the in-memory adapters:
//! 1. Create a workflow and give it task groups linked to tracked objects
//! 2. Activate it and start cycles
//! 3. Move cycle tasks through their statuses
//! 4. Query the derived workflow state of the tracked objects
//! 5. Copy the workflow and check the source is untouched

use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use grc_workflows::adapters::{InMemoryFolderProvider, InMemoryWorkflowStore};
use grc_workflows::application::handlers::{
    CopyWorkflowCommand, CopyWorkflowHandler, CreateWorkflowCommand, CreateWorkflowHandler,
    GetWorkflowStateHandler, GetWorkflowStateQuery, UpdateWorkflowFrequencyCommand,
    UpdateWorkflowFrequencyError, UpdateWorkflowFrequencyHandler,
};
use grc_workflows::domain::cycle::CycleTaskStatus;
use grc_workflows::domain::foundation::{CommandMetadata, ErrorCode, UserId, WorkflowId};
use grc_workflows::domain::task_group::TrackedObject;
use grc_workflows::domain::workflow::{Frequency, Workflow, WorkflowOverrides, WorkflowStatus};
use grc_workflows::domain::workflow_state::WorkflowStateName;
use grc_workflows::ports::WorkflowRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn metadata() -> CommandMetadata {
    CommandMetadata::new(UserId::new("auditor@example.com").unwrap()).with_source("integration-test")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Fixture {
    store: Arc<InMemoryWorkflowStore>,
    control: TrackedObject,
    system: TrackedObject,
}

impl Fixture {
    fn new() -> Self {
        Self {
            store: Arc::new(InMemoryWorkflowStore::new()),
            control: TrackedObject::new("Control", Uuid::new_v4()).unwrap(),
            system: TrackedObject::new("System", Uuid::new_v4()).unwrap(),
        }
    }

    /// Creates an active monthly workflow with two task groups.
    async fn active_workflow(&self) -> Workflow {
        let created = CreateWorkflowHandler::new(self.store.clone())
            .handle(
                CreateWorkflowCommand {
                    title: "Quarterly access review".to_string(),
                    frequency: Some("monthly".to_string()),
                    start_date: Some(date(2024, 1, 1)),
                    recurrences: true,
                    ..Default::default()
                },
                metadata(),
            )
            .await
            .unwrap();

        let mut workflow = created.workflow;
        let controls = workflow.add_task_group("Controls").unwrap();
        workflow
            .task_group_mut(controls)
            .unwrap()
            .add_object(self.control.clone());
        let systems = workflow.add_task_group("Systems").unwrap();
        workflow
            .task_group_mut(systems)
            .unwrap()
            .add_object(self.system.clone());
        workflow.set_status("Active").unwrap();
        self.store.update(&workflow).await.unwrap();
        workflow
    }

    async fn reload(&self, id: WorkflowId) -> Workflow {
        self.store.find_by_id(&id).await.unwrap().unwrap()
    }

    async fn state_of(&self, object: &TrackedObject, today: NaiveDate) -> Option<WorkflowStateName> {
        GetWorkflowStateHandler::new(self.store.clone())
            .handle_on(
                GetWorkflowStateQuery {
                    object: object.clone(),
                },
                today,
            )
            .await
            .unwrap()
            .workflow_state
    }
}

// =============================================================================
// Cycle execution and derived state
// =============================================================================

#[tokio::test]
async fn object_without_cycles_has_no_state() {
    let fx = Fixture::new();
    fx.active_workflow().await;

    assert_eq!(fx.state_of(&fx.control, date(2024, 1, 5)).await, None);
}

#[tokio::test]
async fn new_cycle_tasks_are_assigned() {
    let fx = Fixture::new();
    let mut workflow = fx.active_workflow().await;

    workflow
        .start_cycle("January", date(2024, 1, 1), Some(date(2024, 1, 31)))
        .unwrap();
    fx.store.update(&workflow).await.unwrap();

    assert_eq!(fx.state_of(&fx.control, date(2024, 1, 5)).await, Some(WorkflowStateName::Assigned));
    assert_eq!(fx.state_of(&fx.system, date(2024, 1, 5)).await, Some(WorkflowStateName::Assigned));
}

#[tokio::test]
async fn task_progress_drives_state() {
    let fx = Fixture::new();
    let mut workflow = fx.active_workflow().await;
    let cycle_id = workflow
        .start_cycle("January", date(2024, 1, 1), Some(date(2024, 1, 31)))
        .unwrap();

    let control_task = {
        let link_id = workflow.task_groups()[0].objects()[0].id();
        let cycle = workflow.cycles().iter().find(|c| c.id() == cycle_id).unwrap();
        cycle
            .tasks()
            .iter()
            .find(|t| t.task_group_object_id() == link_id)
            .unwrap()
            .id()
    };
    let cycle = workflow.cycle_mut(cycle_id).unwrap();
    let task = cycle.task_mut(control_task).unwrap();
    task.transition_to(CycleTaskStatus::InProgress).unwrap();
    fx.store.update(&workflow).await.unwrap();

    assert_eq!(fx.state_of(&fx.control, date(2024, 1, 15)).await, Some(WorkflowStateName::InProgress));
    assert_eq!(fx.state_of(&fx.control, date(2024, 1, 31)).await, Some(WorkflowStateName::Overdue));
    assert_eq!(fx.state_of(&fx.system, date(2024, 1, 15)).await, Some(WorkflowStateName::Assigned));

    let task = workflow.cycle_mut(cycle_id).unwrap().task_mut(control_task).unwrap();
    task.transition_to(CycleTaskStatus::Finished).unwrap();
    task.transition_to(CycleTaskStatus::Verified).unwrap();
    fx.store.update(&workflow).await.unwrap();

    // Verified tasks are never overdue.
    assert_eq!(fx.state_of(&fx.control, date(2024, 2, 15)).await, Some(WorkflowStateName::Verified));
}

#[tokio::test]
async fn retired_cycles_do_not_count() {
    let fx = Fixture::new();
    let mut workflow = fx.active_workflow().await;
    let january = workflow
        .start_cycle("January", date(2024, 1, 1), Some(date(2024, 1, 31)))
        .unwrap();
    workflow.cycle_mut(january).unwrap().retire();
    fx.store.update(&workflow).await.unwrap();

    assert_eq!(fx.state_of(&fx.control, date(2024, 3, 1)).await, None);

    workflow.start_cycle("February", date(2024, 2, 1), None).unwrap();
    fx.store.update(&workflow).await.unwrap();

    assert_eq!(fx.state_of(&fx.control, date(2024, 3, 1)).await, Some(WorkflowStateName::Assigned));
}

#[tokio::test]
async fn starting_a_cycle_retires_the_previous_one() {
    let fx = Fixture::new();
    let mut workflow = fx.active_workflow().await;
    workflow
        .start_cycle("January", date(2024, 1, 1), Some(date(2024, 1, 31)))
        .unwrap();
    workflow
        .start_cycle("February", date(2024, 2, 1), Some(date(2024, 2, 29)))
        .unwrap();
    fx.store.update(&workflow).await.unwrap();

    let reloaded = fx.reload(workflow.id()).await;
    assert_eq!(reloaded.cycles().iter().filter(|c| c.is_current()).count(), 1);

    // January's tasks are past due but no longer count.
    assert_eq!(fx.state_of(&fx.control, date(2024, 2, 10)).await, Some(WorkflowStateName::Assigned));
}

#[tokio::test]
async fn draft_workflow_cannot_start_cycle() {
    let mut workflow = Workflow::new("Draft").unwrap();
    assert_eq!(workflow.status(), WorkflowStatus::Draft);

    let err = workflow.start_cycle("C", date(2024, 1, 1), None).unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert!(workflow.cycles().is_empty());
}

#[tokio::test]
async fn starting_cycle_schedules_next_occurrence() {
    let fx = Fixture::new();
    let mut workflow = fx.active_workflow().await;

    workflow.start_cycle("March", date(2024, 3, 15), None).unwrap();

    assert_eq!(workflow.next_cycle_start_date(), Some(date(2024, 4, 15)));
}

// =============================================================================
// Frequency updates
// =============================================================================

#[tokio::test]
async fn frequency_update_round_trips_through_store() {
    let fx = Fixture::new();
    let workflow = fx.active_workflow().await;
    let handler = UpdateWorkflowFrequencyHandler::new(fx.store.clone());

    handler
        .handle(
            UpdateWorkflowFrequencyCommand {
                workflow_id: workflow.id(),
                frequency: Some("annually".to_string()),
            },
            metadata(),
        )
        .await
        .unwrap();
    assert_eq!(fx.reload(workflow.id()).await.frequency(), Frequency::Annually);

    let err = handler
        .handle(
            UpdateWorkflowFrequencyCommand {
                workflow_id: workflow.id(),
                frequency: Some("Annually".to_string()),
            },
            metadata(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, UpdateWorkflowFrequencyError::Domain(ref e) if e.code == ErrorCode::InvalidValue));
    assert_eq!(fx.reload(workflow.id()).await.frequency(), Frequency::Annually);

    handler
        .handle(
            UpdateWorkflowFrequencyCommand {
                workflow_id: workflow.id(),
                frequency: None,
            },
            metadata(),
        )
        .await
        .unwrap();
    assert_eq!(fx.reload(workflow.id()).await.frequency(), Frequency::Continuous);
}

// =============================================================================
// Duplication
// =============================================================================

#[tokio::test]
async fn copy_carries_definition_and_task_groups_not_history() {
    let fx = Fixture::new();
    let mut source = fx.active_workflow().await;
    source.start_cycle("January", date(2024, 1, 1), None).unwrap();
    fx.store.update(&source).await.unwrap();

    let copy = CopyWorkflowHandler::new(fx.store.clone())
        .handle(
            CopyWorkflowCommand {
                source_id: source.id(),
                overrides: WorkflowOverrides::default().with_title("Access review 2025"),
                copy_task_groups: true,
            },
            metadata(),
        )
        .await
        .unwrap()
        .workflow;

    assert_eq!(copy.title(), "Access review 2025");
    assert_eq!(copy.frequency(), Frequency::Monthly);
    assert_eq!(copy.start_date(), source.start_date());
    assert_eq!(copy.status(), WorkflowStatus::Draft);
    assert!(copy.cycles().is_empty());
    assert_ne!(copy.context_id(), source.context_id());

    assert_eq!(copy.task_groups().len(), 2);
    for (copied, original) in copy.task_groups().iter().zip(source.task_groups()) {
        assert_ne!(copied.id(), original.id());
        assert_eq!(copied.workflow_id(), copy.id());
        assert_eq!(copied.context_id(), copy.context_id());
        assert_eq!(copied.title(), original.title());
        assert_eq!(copied.objects()[0].object(), original.objects()[0].object());
    }

    let reloaded_source = fx.reload(source.id()).await;
    assert_eq!(reloaded_source.task_groups(), source.task_groups());
    assert_eq!(reloaded_source.cycles().len(), 1);

    // The copy has no cycles, so it adds nothing to the derived state.
    assert_eq!(fx.state_of(&fx.control, date(2024, 1, 2)).await, Some(WorkflowStateName::Assigned));
}

// =============================================================================
// Folders and publication
// =============================================================================

#[tokio::test]
async fn folder_capability_is_opt_in() {
    let store = Arc::new(InMemoryWorkflowStore::new());
    let cmd = CreateWorkflowCommand {
        title: "Vendor assessment".to_string(),
        ..Default::default()
    };

    let without = CreateWorkflowHandler::new(store.clone())
        .handle(cmd.clone(), metadata())
        .await
        .unwrap();
    let with = CreateWorkflowHandler::new(store.clone())
        .with_folder_provider(Arc::new(InMemoryFolderProvider::new()))
        .handle(cmd, metadata())
        .await
        .unwrap();

    assert!(without.workflow.folder().is_none());
    assert!(with.workflow.folder().is_some());
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn published_view_lists_api_fields() {
    let fx = Fixture::new();
    let workflow = fx.active_workflow().await;

    let json = serde_json::to_value(workflow.published()).unwrap();

    assert_eq!(json["frequency"], "monthly");
    assert_eq!(json["recurrences"], true);
    assert_eq!(json["task_groups"].as_array().unwrap().len(), 2);
    assert!(json.get("status").is_none());
    assert!(workflow
        .fulltext_values()
        .iter()
        .any(|(name, value)| *name == "status" && value == "Active"));
}
