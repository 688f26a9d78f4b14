//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresWorkflowRepository` - Workflow aggregate persistence
//! - `PostgresCycleTaskReader` - Cycle task query behind the derived state

mod cycle_task_reader;
mod workflow_repository;

pub use cycle_task_reader::PostgresCycleTaskReader;
pub use workflow_repository::PostgresWorkflowRepository;
