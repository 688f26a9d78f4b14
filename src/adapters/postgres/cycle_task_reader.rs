//! PostgreSQL implementation of CycleTaskReader.
//!
//! One join per call: cycle tasks, through their task group object, filtered
//! by the tracked object, with the owning cycle's `is_current` flag.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{CycleId, CycleTaskGroupObjectId, DomainError};
use crate::domain::task_group::TrackedObject;
use crate::domain::workflow_state::CycleTaskSnapshot;
use crate::ports::CycleTaskReader;

/// PostgreSQL implementation of CycleTaskReader.
#[derive(Clone)]
pub struct PostgresCycleTaskReader {
    pool: PgPool,
}

impl PostgresCycleTaskReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CycleTaskReader for PostgresCycleTaskReader {
    async fn find_for_object(&self, object: &TrackedObject) -> Result<Vec<CycleTaskSnapshot>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT ctgo.id, ctgo.cycle_id, ctgo.status, ctgo.end_date, c.is_current
            FROM cycle_task_group_objects ctgo
            JOIN task_group_objects tgo ON tgo.id = ctgo.task_group_object_id
            JOIN cycles c ON c.id = ctgo.cycle_id
            WHERE tgo.object_type = $1 AND tgo.object_id = $2
            "#,
        )
        .bind(object.object_type())
        .bind(object.object_id())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch cycle tasks", e))?;

        tracing::debug!(object = %object, rows = rows.len(), "cycle tasks fetched");

        Ok(rows
            .into_iter()
            .map(|row| CycleTaskSnapshot {
                cycle_task_id: CycleTaskGroupObjectId::from_uuid(row.get("id")),
                cycle_id: CycleId::from_uuid(row.get("cycle_id")),
                cycle_is_current: row.get("is_current"),
                status: row.get("status"),
                end_date: row.get("end_date"),
            })
            .collect())
    }
}
