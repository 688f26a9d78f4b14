//! API and search-index surface of a workflow.

use serde::Serialize;

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{PersonId, WorkflowId};
use crate::domain::task_group::TaskGroup;

use super::{Frequency, Workflow, WorkflowPerson};

/// Fields published over the API. `people` is publish-only: it is derived
/// from `workflow_people` and cannot be written back.
pub const PUBLISH_ATTRS: [&str; 9] = [
    "workflow_people",
    "people",
    "task_groups",
    "frequency",
    "notify_on_change",
    "notify_custom_message",
    "cycles",
    "object_approval",
    "recurrences",
];

/// Published fields that clients may not write.
pub const PUBLISH_ONLY_ATTRS: [&str; 1] = ["people"];

/// Fields indexed for full-text search.
pub const FULLTEXT_ATTRS: [&str; 2] = ["notify_custom_message", "status"];

/// Serializable API view of a workflow.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedWorkflow<'a> {
    pub id: WorkflowId,
    pub title: &'a str,
    pub workflow_people: &'a [WorkflowPerson],
    pub people: Vec<PersonId>,
    pub task_groups: &'a [TaskGroup],
    pub frequency: Frequency,
    pub notify_on_change: bool,
    pub notify_custom_message: Option<&'a str>,
    pub cycles: &'a [Cycle],
    pub object_approval: bool,
    pub recurrences: bool,
}

impl Workflow {
    pub const PUBLISH_ATTRS: [&'static str; 9] = PUBLISH_ATTRS;
    pub const FULLTEXT_ATTRS: [&'static str; 2] = FULLTEXT_ATTRS;

    /// Builds the API view of this workflow.
    pub fn published(&self) -> PublishedWorkflow<'_> {
        PublishedWorkflow {
            id: self.id(),
            title: self.title(),
            workflow_people: self.workflow_people(),
            people: self.people(),
            task_groups: self.task_groups(),
            frequency: self.frequency(),
            notify_on_change: self.notify_on_change(),
            notify_custom_message: self.notify_custom_message(),
            cycles: self.cycles(),
            object_approval: self.object_approval(),
            recurrences: self.recurrences(),
        }
    }

    /// The (attribute, value) pairs to index for full-text search.
    ///
    /// Attributes without a value are omitted.
    pub fn fulltext_values(&self) -> Vec<(&'static str, String)> {
        let mut values = Vec::with_capacity(FULLTEXT_ATTRS.len());
        if let Some(message) = self.notify_custom_message() {
            values.push(("notify_custom_message", message.to_string()));
        }
        values.push(("status", self.status().to_string()));
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_view_exposes_every_publish_attr() {
        let mut wf = Workflow::new("W").unwrap();
        wf.add_person(PersonId::new());
        wf.add_task_group("TG").unwrap();

        let json = serde_json::to_value(wf.published()).unwrap();

        for attr in PUBLISH_ATTRS {
            assert!(json.get(attr).is_some(), "missing {}", attr);
        }
        assert_eq!(json["frequency"], "continuous");
        assert_eq!(json["people"].as_array().unwrap().len(), 1);
        assert_eq!(json["task_groups"][0]["title"], "TG");
    }

    #[test]
    fn people_is_publish_only() {
        for attr in PUBLISH_ONLY_ATTRS {
            assert!(PUBLISH_ATTRS.contains(&attr));
        }
    }

    #[test]
    fn fulltext_attrs_cover_indexed_values() {
        let mut wf = Workflow::new("W").unwrap();
        wf.set_notifications(false, Some("Reminder".to_string()));

        let names: Vec<&str> = wf.fulltext_values().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, Workflow::FULLTEXT_ATTRS);
        assert_eq!(Workflow::PUBLISH_ATTRS.len(), 9);
    }

    #[test]
    fn fulltext_values_skip_missing_message() {
        let mut wf = Workflow::new("W").unwrap();
        assert_eq!(wf.fulltext_values(), vec![("status", "Draft".to_string())]);

        wf.set_notifications(true, Some("Heads up".to_string()));
        assert_eq!(
            wf.fulltext_values(),
            vec![
                ("notify_custom_message", "Heads up".to_string()),
                ("status", "Draft".to_string()),
            ]
        );
    }
}
