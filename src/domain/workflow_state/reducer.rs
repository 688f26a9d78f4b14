//! Priority-ordered reduction of cycle tasks into one state name.

use chrono::NaiveDate;
use tracing::warn;

use crate::domain::foundation::today;

use super::{CycleTaskRef, WorkflowStateName};

const VERIFIED: &str = "Verified";

/// Reduces cycle tasks into the single most urgent state name.
///
/// For every item whose cycle is current:
/// - a due date on or before `today` raises `Overdue`, unless the item is
///   `Verified`;
/// - otherwise, an item without a status raises `Assigned`;
/// - in both cases the item's own status name is raised as well.
///
/// Items of non-current cycles are skipped entirely. Statuses that are not
/// a [`WorkflowStateName`] never affect the result and are logged.
///
/// Returns the first raised state in [`WorkflowStateName::PRIORITY`] order,
/// or `None` when nothing was raised.
pub fn derive_state<I>(items: I, today: NaiveDate) -> Option<WorkflowStateName>
where
    I: IntoIterator,
    I::Item: CycleTaskRef,
{
    let mut raised = [false; WorkflowStateName::PRIORITY.len()];

    for item in items {
        if !item.cycle_is_current() {
            continue;
        }

        let status = item.status().filter(|s| !s.is_empty());
        let overdue = item
            .end_date()
            .map_or(false, |due| due <= today && status != Some(VERIFIED));

        if overdue {
            raised[WorkflowStateName::Overdue.rank()] = true;
        } else if status.is_none() {
            raised[WorkflowStateName::Assigned.rank()] = true;
        }

        if let Some(raw) = status {
            match raw.parse::<WorkflowStateName>() {
                Ok(name) => raised[name.rank()] = true,
                Err(_) => warn!(status = raw, "Ignoring unrecognized cycle task status"),
            }
        }
    }

    WorkflowStateName::PRIORITY
        .iter()
        .copied()
        .find(|name| raised[name.rank()])
}

/// [`derive_state`] evaluated against the current UTC date.
pub fn derive_state_today<I>(items: I) -> Option<WorkflowStateName>
where
    I: IntoIterator,
    I::Item: CycleTaskRef,
{
    derive_state(items, today())
}
