//! Cycle module - Concrete executions of a workflow.
//!
//! A Cycle is one time-bound run of a workflow's task groups. It owns a
//! CycleTaskGroupObject for every tracked object it executes.

mod aggregate;
mod status;

pub use aggregate::{Cycle, CycleTaskGroupObject};
pub use status::CycleTaskStatus;
