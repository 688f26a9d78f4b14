//! Cycle task reader port (read side).
//!
//! Finds every cycle task executing a given tracked object: the join of
//! cycle task group objects with the task group objects linking that
//! object, plus each task's cycle `is_current` flag.

use crate::domain::foundation::DomainError;
use crate::domain::task_group::TrackedObject;
use crate::domain::workflow_state::CycleTaskSnapshot;
use async_trait::async_trait;

/// Read-only query port feeding the derived state computation.
///
/// Results are not cached: every call reflects the current data.
#[async_trait]
pub trait CycleTaskReader: Send + Sync {
    /// All cycle tasks, current or not, that execute `object`.
    async fn find_for_object(&self, object: &TrackedObject) -> Result<Vec<CycleTaskSnapshot>, DomainError>;
}
