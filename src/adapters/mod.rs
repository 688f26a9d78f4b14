//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory store and folder provider for tests and development
//! - `postgres` - PostgreSQL persistence

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryFolderProvider, InMemoryWorkflowStore};
pub use postgres::{PostgresCycleTaskReader, PostgresWorkflowRepository};
