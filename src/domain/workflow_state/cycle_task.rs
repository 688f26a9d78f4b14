//! Inputs to the state reduction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{CycleId, CycleTaskGroupObjectId};

/// Anything the state reduction can consume: a cycle, or a task that
/// resolves to its owning cycle.
pub trait CycleTaskRef {
    /// Whether the owning cycle (or the cycle itself) is the current execution.
    fn cycle_is_current(&self) -> bool;

    /// The raw status string, if any.
    fn status(&self) -> Option<&str>;

    /// The due date, if any.
    fn end_date(&self) -> Option<NaiveDate>;
}

impl<T: CycleTaskRef + ?Sized> CycleTaskRef for &T {
    fn cycle_is_current(&self) -> bool {
        (**self).cycle_is_current()
    }

    fn status(&self) -> Option<&str> {
        (**self).status()
    }

    fn end_date(&self) -> Option<NaiveDate> {
        (**self).end_date()
    }
}

impl CycleTaskRef for Cycle {
    fn cycle_is_current(&self) -> bool {
        self.is_current()
    }

    fn status(&self) -> Option<&str> {
        Some(Cycle::status(self).as_str())
    }

    fn end_date(&self) -> Option<NaiveDate> {
        Cycle::end_date(self)
    }
}

/// A cycle task joined with its cycle's `is_current` flag.
///
/// This is the row shape returned by [`crate::ports::CycleTaskReader`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleTaskSnapshot {
    pub cycle_task_id: CycleTaskGroupObjectId,
    pub cycle_id: CycleId,
    pub cycle_is_current: bool,
    pub status: Option<String>,
    pub end_date: Option<NaiveDate>,
}

impl CycleTaskSnapshot {
    /// Snapshots every task of a cycle.
    pub fn of_cycle(cycle: &Cycle) -> Vec<CycleTaskSnapshot> {
        cycle
            .tasks()
            .iter()
            .map(|task| CycleTaskSnapshot {
                cycle_task_id: task.id(),
                cycle_id: cycle.id(),
                cycle_is_current: cycle.is_current(),
                status: task.status().map(str::to_string),
                end_date: task.end_date(),
            })
            .collect()
    }
}

impl CycleTaskRef for CycleTaskSnapshot {
    fn cycle_is_current(&self) -> bool {
        self.cycle_is_current
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
}
