//! Task group module - Bundles of tracked objects inside a workflow.
//!
//! A TaskGroup belongs to exactly one workflow and shares its access-control
//! context. Each TaskGroupObject links one tracked business object (a
//! control, a system, a policy...) to the group.

mod entity;
mod tracked_object;

pub use entity::{TaskGroup, TaskGroupObject};
pub use tracked_object::TrackedObject;
