//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, dates, errors, command metadata)
//! - `permissions` - Role descriptors and the role registry
//! - `workflow` - Workflow aggregate, frequency validation and duplication
//! - `task_group` - Task groups and the tracked objects they link
//! - `cycle` - Cycle executions and their cycle tasks
//! - `workflow_state` - Derived state reduction over cycle tasks

pub mod cycle;
pub mod foundation;
pub mod permissions;
pub mod task_group;
pub mod workflow;
pub mod workflow_state;
