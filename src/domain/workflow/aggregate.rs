//! Workflow aggregate - The root entity for recurring task definitions.
//!
//! A Workflow owns, by composition, its people associations, its task
//! groups and its cycles: removing the workflow removes all of them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{
    ContextId, CycleId, DomainError, ErrorCode, PersonId, TaskGroupId, Timestamp,
    ValidationError, WorkflowId, WorkflowPersonId,
};
use crate::domain::task_group::TaskGroup;

use super::{validate_frequency, FolderRef, Frequency, WorkflowStatus};

/// Association of a person with a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowPerson {
    id: WorkflowPersonId,
    workflow_id: WorkflowId,
    person_id: PersonId,
    context_id: ContextId,
}

impl WorkflowPerson {
    /// Reconstitutes an association from persisted data.
    pub fn reconstitute(
        id: WorkflowPersonId,
        workflow_id: WorkflowId,
        person_id: PersonId,
        context_id: ContextId,
    ) -> Self {
        Self {
            id,
            workflow_id,
            person_id,
            context_id,
        }
    }

    pub fn id(&self) -> WorkflowPersonId {
        self.id
    }

    pub fn workflow_id(&self) -> WorkflowId {
        self.workflow_id
    }

    pub fn person_id(&self) -> PersonId {
        self.person_id
    }

    pub fn context_id(&self) -> ContextId {
        self.context_id
    }
}

/// Field overrides applied by [`Workflow::copy`].
///
/// Only the copied columns can be overridden. Nested `Option`s distinguish
/// "keep the source value" (`None`) from "set to null" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowOverrides {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub notify_on_change: Option<bool>,
    pub notify_custom_message: Option<Option<String>>,
    pub frequency: Option<Frequency>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
}

impl WorkflowOverrides {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn with_dates(mut self, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        self
    }
}

/// Persisted shape of a workflow, used to rebuild the aggregate.
#[derive(Debug, Clone)]
pub struct WorkflowRecord {
    pub id: WorkflowId,
    pub context_id: ContextId,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: WorkflowStatus,
    pub recurrences: bool,
    pub frequency: Frequency,
    pub notify_on_change: bool,
    pub notify_custom_message: Option<String>,
    pub object_approval: bool,
    pub next_cycle_start_date: Option<NaiveDate>,
    pub folder: Option<FolderRef>,
    pub workflow_people: Vec<WorkflowPerson>,
    pub task_groups: Vec<TaskGroup>,
    pub cycles: Vec<Cycle>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The Workflow aggregate root.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    id: WorkflowId,
    context_id: ContextId,
    slug: String,
    title: String,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    status: WorkflowStatus,
    recurrences: bool,
    frequency: Frequency,
    notify_on_change: bool,
    notify_custom_message: Option<String>,
    object_approval: bool,
    next_cycle_start_date: Option<NaiveDate>,
    folder: Option<FolderRef>,
    workflow_people: Vec<WorkflowPerson>,
    task_groups: Vec<TaskGroup>,
    cycles: Vec<Cycle>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Workflow {
    /// Creates a draft workflow with its own access-control context.
    ///
    /// # Errors
    ///
    /// Returns `EmptyField` if the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, ValidationError> {
        let title = validate_title(title.into())?;
        let id = WorkflowId::new();
        let now = Timestamp::now();

        Ok(Self {
            id,
            context_id: ContextId::new(),
            slug: slug_for(id),
            title,
            description: None,
            start_date: None,
            end_date: None,
            status: WorkflowStatus::default(),
            recurrences: false,
            frequency: Frequency::default(),
            notify_on_change: false,
            notify_custom_message: None,
            object_approval: false,
            next_cycle_start_date: None,
            folder: None,
            workflow_people: Vec::new(),
            task_groups: Vec::new(),
            cycles: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a workflow from persisted data.
    pub fn reconstitute(record: WorkflowRecord) -> Self {
        Self {
            id: record.id,
            context_id: record.context_id,
            slug: record.slug,
            title: record.title,
            description: record.description,
            start_date: record.start_date,
            end_date: record.end_date,
            status: record.status,
            recurrences: record.recurrences,
            frequency: record.frequency,
            notify_on_change: record.notify_on_change,
            notify_custom_message: record.notify_custom_message,
            object_approval: record.object_approval,
            next_cycle_start_date: record.next_cycle_start_date,
            folder: record.folder,
            workflow_people: record.workflow_people,
            task_groups: record.task_groups,
            cycles: record.cycles,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> WorkflowId {
        self.id
    }

    pub fn context_id(&self) -> ContextId {
        self.context_id
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    pub fn recurrences(&self) -> bool {
        self.recurrences
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn notify_on_change(&self) -> bool {
        self.notify_on_change
    }

    pub fn notify_custom_message(&self) -> Option<&str> {
        self.notify_custom_message.as_deref()
    }

    pub fn object_approval(&self) -> bool {
        self.object_approval
    }

    pub fn next_cycle_start_date(&self) -> Option<NaiveDate> {
        self.next_cycle_start_date
    }

    pub fn folder(&self) -> Option<&FolderRef> {
        self.folder.as_ref()
    }

    pub fn workflow_people(&self) -> &[WorkflowPerson] {
        &self.workflow_people
    }

    /// The people associated with this workflow, in association order.
    pub fn people(&self) -> Vec<PersonId> {
        self.workflow_people.iter().map(|wp| wp.person_id).collect()
    }

    pub fn task_groups(&self) -> &[TaskGroup] {
        &self.task_groups
    }

    pub fn task_group_mut(&mut self, id: TaskGroupId) -> Option<&mut TaskGroup> {
        self.task_groups.iter_mut().find(|tg| tg.id() == id)
    }

    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn cycle_mut(&mut self, id: CycleId) -> Option<&mut Cycle> {
        self.cycles.iter_mut().find(|c| c.id() == id)
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ───────────────────────────────────────────────────────────────
    // Field writes
    // ───────────────────────────────────────────────────────────────

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
        self.title = validate_title(title.into())?;
        self.touch();
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    /// Sets the active window of the workflow.
    pub fn set_dates(&mut self, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) {
        self.start_date = start_date;
        self.end_date = end_date;
        self.touch();
    }

    /// Writes the frequency through [`validate_frequency`].
    ///
    /// `None` stores the default frequency. On error the previous value is
    /// kept.
    pub fn set_frequency(&mut self, value: Option<&str>) -> Result<(), DomainError> {
        self.frequency = validate_frequency(value)?;
        self.touch();
        Ok(())
    }

    /// Writes the status, which must be one of [`WorkflowStatus::VALID_STATES`].
    ///
    /// On error the previous value is kept.
    pub fn set_status(&mut self, value: &str) -> Result<(), DomainError> {
        self.status = value.parse::<WorkflowStatus>()?;
        self.touch();
        Ok(())
    }

    pub fn set_recurrences(&mut self, recurrences: bool) {
        self.recurrences = recurrences;
        self.touch();
    }

    pub fn set_notifications(&mut self, notify_on_change: bool, custom_message: Option<String>) {
        self.notify_on_change = notify_on_change;
        self.notify_custom_message = custom_message;
        self.touch();
    }

    pub fn set_object_approval(&mut self, object_approval: bool) {
        self.object_approval = object_approval;
        self.touch();
    }

    pub fn attach_folder(&mut self, folder: FolderRef) {
        self.folder = Some(folder);
        self.touch();
    }

    /// Recomputes `next_cycle_start_date` from `from`.
    ///
    /// Cleared unless the workflow recurs and its frequency has a next
    /// occurrence.
    pub fn schedule_next_cycle(&mut self, from: NaiveDate) {
        self.next_cycle_start_date = if self.recurrences {
            self.frequency.next_occurrence(from)
        } else {
            None
        };
        self.touch();
    }

    // ───────────────────────────────────────────────────────────────
    // Owned collections
    // ───────────────────────────────────────────────────────────────

    /// Associates a person with the workflow. Adding the same person twice
    /// returns the existing association.
    pub fn add_person(&mut self, person_id: PersonId) -> WorkflowPersonId {
        if let Some(existing) = self.workflow_people.iter().find(|wp| wp.person_id == person_id) {
            return existing.id;
        }
        let association = WorkflowPerson {
            id: WorkflowPersonId::new(),
            workflow_id: self.id,
            person_id,
            context_id: self.context_id,
        };
        let id = association.id;
        self.workflow_people.push(association);
        self.touch();
        id
    }

    /// Removes a person's association. Returns true if one was removed.
    pub fn remove_person(&mut self, person_id: PersonId) -> bool {
        let before = self.workflow_people.len();
        self.workflow_people.retain(|wp| wp.person_id != person_id);
        let removed = self.workflow_people.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Creates an empty task group owned by this workflow.
    pub fn add_task_group(&mut self, title: impl Into<String>) -> Result<TaskGroupId, ValidationError> {
        let task_group = TaskGroup::new(self.id, self.context_id, title)?;
        let id = task_group.id();
        self.task_groups.push(task_group);
        self.touch();
        Ok(id)
    }

    /// Removes a task group and everything linked to it.
    pub fn remove_task_group(&mut self, id: TaskGroupId) -> bool {
        let before = self.task_groups.len();
        self.task_groups.retain(|tg| tg.id() != id);
        let removed = self.task_groups.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Starts a new cycle executing every task group object of the workflow.
    ///
    /// Each generated cycle task is due on `end_date`. Earlier cycles are
    /// retired, so only the new cycle is current. The next recurrence is
    /// rescheduled from `start_date`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the workflow is not `Active`
    /// - `EmptyField` if the title is blank
    pub fn start_cycle(
        &mut self,
        title: impl Into<String>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<CycleId, DomainError> {
        if !self.status.is_active() {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Cannot start a cycle for a {} workflow", self.status),
            )
            .with_detail("field", "status"));
        }

        let mut cycle = Cycle::new(self.id, self.context_id, title)?;
        cycle.set_window(Some(start_date), end_date);
        for previous in &mut self.cycles {
            previous.retire();
        }
        for object in self.task_groups.iter().flat_map(|tg| tg.objects()) {
            cycle.add_task(object.id(), end_date);
        }

        let id = cycle.id();
        self.cycles.push(cycle);
        self.schedule_next_cycle(start_date);
        Ok(id)
    }

    // ───────────────────────────────────────────────────────────────
    // Duplication
    // ───────────────────────────────────────────────────────────────

    /// Copies this workflow's definition columns into `target`.
    ///
    /// Copies title, description, notify_on_change, notify_custom_message,
    /// frequency, start_date and end_date, applying `overrides` on top.
    /// When `target` is `None` a new draft workflow (own id and context) is
    /// created. People, task groups, cycles and status are never copied.
    ///
    /// # Errors
    ///
    /// Returns `EmptyField` if a title override is blank.
    pub fn copy(
        &self,
        target: Option<Workflow>,
        overrides: WorkflowOverrides,
    ) -> Result<Workflow, DomainError> {
        let mut target = match target {
            Some(existing) => existing,
            None => Workflow::new(self.title.clone())?,
        };

        target.title = validate_title(overrides.title.unwrap_or_else(|| self.title.clone()))?;
        target.description = overrides.description.unwrap_or_else(|| self.description.clone());
        target.notify_on_change = overrides.notify_on_change.unwrap_or(self.notify_on_change);
        target.notify_custom_message = overrides
            .notify_custom_message
            .unwrap_or_else(|| self.notify_custom_message.clone());
        target.frequency = overrides.frequency.unwrap_or(self.frequency);
        target.start_date = overrides.start_date.unwrap_or(self.start_date);
        target.end_date = overrides.end_date.unwrap_or(self.end_date);
        target.touch();

        Ok(target)
    }

    /// Appends a deep copy of every task group to `target`.
    ///
    /// Copies belong to `target` and live in its context. This workflow is
    /// left untouched.
    pub fn copy_task_groups(&self, mut target: Workflow) -> Workflow {
        for task_group in &self.task_groups {
            let copy = task_group.copy(target.id, target.context_id);
            target.task_groups.push(copy);
        }
        target.touch();
        target
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

fn validate_title(title: String) -> Result<String, ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    Ok(title)
}

fn slug_for(id: WorkflowId) -> String {
    let simple = id.as_uuid().simple().to_string();
    format!("WORKFLOW-{}", &simple[..8]).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task_group::TrackedObject;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn source() -> Workflow {
        let mut wf = Workflow::new("W1").unwrap();
        wf.set_description(Some("Quarterly access review".to_string()));
        wf.set_notifications(true, Some("Please review".to_string()));
        wf.set_frequency(Some("quarterly")).unwrap();
        wf.set_dates(Some(date(2024, 1, 1)), Some(date(2024, 3, 31)));
        wf.set_status("Active").unwrap();
        wf.set_recurrences(true);
        wf.set_object_approval(true);
        wf.add_person(PersonId::new());
        wf
    }

    // ════════════════════════════════════════════════════════════════
    // Construction and field validation
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn new_workflow_has_defaults() {
        let wf = Workflow::new("Vendor review").unwrap();

        assert_eq!(wf.status(), WorkflowStatus::Draft);
        assert_eq!(wf.frequency(), Frequency::Continuous);
        assert!(!wf.recurrences());
        assert!(!wf.notify_on_change());
        assert!(!wf.object_approval());
        assert!(wf.folder().is_none());
        assert!(wf.slug().starts_with("WORKFLOW-"));
    }

    #[test]
    fn new_rejects_blank_title() {
        assert!(Workflow::new("  ").is_err());
    }

    #[test]
    fn set_frequency_accepts_every_canonical_value() {
        let mut wf = Workflow::new("W").unwrap();
        for raw in Frequency::VALID_FREQUENCIES {
            wf.set_frequency(Some(raw)).unwrap();
            assert_eq!(wf.frequency().as_str(), raw);
        }
    }

    #[test]
    fn set_frequency_none_stores_continuous() {
        let mut wf = Workflow::new("W").unwrap();
        wf.set_frequency(Some("weekly")).unwrap();

        wf.set_frequency(None).unwrap();

        assert_eq!(wf.frequency(), Frequency::Continuous);
    }

    #[test]
    fn set_frequency_rejects_unknown_and_keeps_previous() {
        let mut wf = Workflow::new("W").unwrap();
        wf.set_frequency(Some("monthly")).unwrap();

        let err = wf.set_frequency(Some("fortnightly")).unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidValue);
        assert_eq!(err.detail("value"), Some("fortnightly"));
        assert_eq!(wf.frequency(), Frequency::Monthly);
    }

    #[test]
    fn set_status_rejects_unknown_and_keeps_previous() {
        let mut wf = Workflow::new("W").unwrap();
        wf.set_status("Active").unwrap();

        assert!(wf.set_status("Closed").is_err());
        assert_eq!(wf.status(), WorkflowStatus::Active);
    }

    // ════════════════════════════════════════════════════════════════
    // People
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn people_view_follows_associations() {
        let mut wf = Workflow::new("W").unwrap();
        let alice = PersonId::new();
        let bob = PersonId::new();

        let first = wf.add_person(alice);
        wf.add_person(bob);
        assert_eq!(wf.add_person(alice), first);
        assert_eq!(wf.people(), vec![alice, bob]);
        assert_eq!(wf.workflow_people()[0].context_id(), wf.context_id());

        assert!(wf.remove_person(alice));
        assert!(!wf.remove_person(alice));
        assert_eq!(wf.people(), vec![bob]);
    }

    // ════════════════════════════════════════════════════════════════
    // Copy
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn copy_duplicates_definition_columns_only() {
        let src = source();

        let copy = src.copy(None, WorkflowOverrides::default()).unwrap();

        assert_ne!(copy.id(), src.id());
        assert_ne!(copy.context_id(), src.context_id());
        assert_eq!(copy.title(), "W1");
        assert_eq!(copy.description(), src.description());
        assert_eq!(copy.notify_on_change(), src.notify_on_change());
        assert_eq!(copy.notify_custom_message(), src.notify_custom_message());
        assert_eq!(copy.frequency(), Frequency::Quarterly);
        assert_eq!(copy.start_date(), src.start_date());
        assert_eq!(copy.end_date(), src.end_date());

        assert_eq!(copy.status(), WorkflowStatus::Draft);
        assert!(!copy.recurrences());
        assert!(!copy.object_approval());
        assert!(copy.people().is_empty());
        assert!(copy.task_groups().is_empty());
        assert!(copy.cycles().is_empty());
    }

    #[test]
    fn copy_applies_overrides() {
        let src = source();

        let copy = src
            .copy(None, WorkflowOverrides::default().with_title("override"))
            .unwrap();

        assert_eq!(copy.title(), "override");
        assert_eq!(copy.description(), src.description());
        assert_eq!(copy.frequency(), src.frequency());
        assert_eq!(copy.start_date(), src.start_date());
    }

    #[test]
    fn copy_can_override_to_null() {
        let src = source();

        let copy = src
            .copy(None, WorkflowOverrides::default().with_description(None).with_dates(None, None))
            .unwrap();

        assert_eq!(copy.description(), None);
        assert_eq!(copy.start_date(), None);
        assert_eq!(copy.end_date(), None);
    }

    #[test]
    fn copy_into_existing_target_keeps_its_identity() {
        let src = source();
        let mut target = Workflow::new("Target").unwrap();
        let person = PersonId::new();
        target.add_person(person);
        let target_id = target.id();

        let copy = src.copy(Some(target), WorkflowOverrides::default()).unwrap();

        assert_eq!(copy.id(), target_id);
        assert_eq!(copy.title(), "W1");
        assert_eq!(copy.people(), vec![person]);
    }

    #[test]
    fn copy_rejects_blank_title_override() {
        let err = source()
            .copy(None, WorkflowOverrides::default().with_title(""))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyField);
    }

    #[test]
    fn copy_task_groups_reparents_deep_copies() {
        let mut src = source();
        let a = src.add_task_group("A").unwrap();
        src.add_task_group("B").unwrap();
        src.task_group_mut(a)
            .unwrap()
            .add_object(TrackedObject::new("Control", Uuid::new_v4()).unwrap());
        let original = src.task_groups().to_vec();

        let target = src.copy(None, WorkflowOverrides::default()).unwrap();
        let target = src.copy_task_groups(target);

        assert_eq!(target.task_groups().len(), 2);
        for (copy, orig) in target.task_groups().iter().zip(&original) {
            assert_ne!(copy.id(), orig.id());
            assert_eq!(copy.title(), orig.title());
            assert_eq!(copy.workflow_id(), target.id());
            assert_eq!(copy.context_id(), target.context_id());
            assert_eq!(copy.objects().len(), orig.objects().len());
        }
        assert_eq!(src.task_groups(), original.as_slice());
    }

    #[test]
    fn copy_task_groups_appends_to_existing_groups() {
        let mut src = source();
        src.add_task_group("A").unwrap();
        let mut target = Workflow::new("T").unwrap();
        target.add_task_group("Existing").unwrap();

        let target = src.copy_task_groups(target);

        let titles: Vec<_> = target.task_groups().iter().map(|tg| tg.title()).collect();
        assert_eq!(titles, vec!["Existing", "A"]);
    }

    // ════════════════════════════════════════════════════════════════
    // Cycles and scheduling
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn start_cycle_requires_active_workflow() {
        let mut wf = Workflow::new("W").unwrap();
        let err = wf.start_cycle("C1", date(2024, 1, 1), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(wf.cycles().is_empty());
    }

    #[test]
    fn start_cycle_generates_a_task_per_object() {
        let mut wf = source();
        let tg = wf.add_task_group("Controls").unwrap();
        let group = wf.task_group_mut(tg).unwrap();
        group.add_object(TrackedObject::new("Control", Uuid::new_v4()).unwrap());
        group.add_object(TrackedObject::new("System", Uuid::new_v4()).unwrap());

        let due = date(2024, 3, 31);
        let cycle_id = wf.start_cycle("Q1", date(2024, 1, 1), Some(due)).unwrap();

        let cycle = wf.cycles().iter().find(|c| c.id() == cycle_id).unwrap();
        assert!(cycle.is_current());
        assert_eq!(cycle.context_id(), wf.context_id());
        assert_eq!(cycle.tasks().len(), 2);
        assert!(cycle.tasks().iter().all(|t| t.end_date() == Some(due)));
        assert_eq!(wf.next_cycle_start_date(), Some(date(2024, 4, 1)));
    }

    #[test]
    fn new_cycle_supersedes_earlier_cycles() {
        use crate::domain::workflow_state::{derive_state, CycleTaskSnapshot, WorkflowStateName};

        let mut wf = source();
        let tg = wf.add_task_group("Controls").unwrap();
        wf.task_group_mut(tg)
            .unwrap()
            .add_object(TrackedObject::new("Control", Uuid::new_v4()).unwrap());

        let january = wf.start_cycle("C1", date(2024, 1, 1), Some(date(2024, 1, 31))).unwrap();
        let february = wf.start_cycle("C2", date(2024, 2, 1), Some(date(2024, 2, 29))).unwrap();

        let current: Vec<CycleId> = wf.cycles().iter().filter(|c| c.is_current()).map(|c| c.id()).collect();
        assert_eq!(current, vec![february]);
        assert!(wf.cycles().iter().any(|c| c.id() == january && !c.is_current()));

        let tasks: Vec<CycleTaskSnapshot> = wf.cycles().iter().flat_map(CycleTaskSnapshot::of_cycle).collect();
        assert_eq!(derive_state(&tasks, date(2024, 2, 10)), Some(WorkflowStateName::Assigned));
    }

    #[test]
    fn schedule_next_cycle_requires_recurrences() {
        let mut wf = Workflow::new("W").unwrap();
        wf.set_frequency(Some("weekly")).unwrap();

        wf.schedule_next_cycle(date(2024, 1, 1));
        assert_eq!(wf.next_cycle_start_date(), None);

        wf.set_recurrences(true);
        wf.schedule_next_cycle(date(2024, 1, 1));
        assert_eq!(wf.next_cycle_start_date(), Some(date(2024, 1, 8)));
    }

    #[test]
    fn removing_task_group_drops_it() {
        let mut wf = Workflow::new("W").unwrap();
        let tg = wf.add_task_group("A").unwrap();

        assert!(wf.remove_task_group(tg));
        assert!(wf.task_groups().is_empty());
        assert!(!wf.remove_task_group(tg));
    }
}
