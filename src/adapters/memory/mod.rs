//! In-memory adapters for tests and local development.

mod folder_provider;
mod workflow_store;

pub use folder_provider::InMemoryFolderProvider;
pub use workflow_store::InMemoryWorkflowStore;
