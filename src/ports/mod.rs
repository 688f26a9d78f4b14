//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `WorkflowRepository` - Workflow aggregate persistence
//! - `CycleTaskReader` - Query feeding the derived workflow state
//! - `FolderProvider` - Optional document-folder capability

mod cycle_task_reader;
mod folder_provider;
mod workflow_repository;

pub use cycle_task_reader::CycleTaskReader;
pub use folder_provider::FolderProvider;
pub use workflow_repository::WorkflowRepository;
