//! PostgreSQL implementation of WorkflowRepository.
//!
//! A workflow spans six tables: `workflows`, `workflow_people`,
//! `task_groups`, `task_group_objects`, `cycles` and
//! `cycle_task_group_objects`. Saves and updates write the whole aggregate
//! inside one transaction; owned rows are replaced on update. Every owned
//! row carries a `position` column holding its index in the aggregate, and
//! loads order by it so collections come back in insertion order.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

use crate::domain::cycle::{Cycle, CycleTaskGroupObject, CycleTaskStatus};
use crate::domain::foundation::{
    ContextId, CycleId, CycleTaskGroupObjectId, DomainError, ErrorCode, PersonId, TaskGroupId,
    TaskGroupObjectId, Timestamp, WorkflowId, WorkflowPersonId,
};
use crate::domain::task_group::{TaskGroup, TaskGroupObject, TrackedObject};
use crate::domain::workflow::{
    validate_frequency, FolderRef, Workflow, WorkflowPerson, WorkflowRecord, WorkflowStatus,
};
use crate::ports::WorkflowRepository;

/// PostgreSQL implementation of WorkflowRepository.
#[derive(Clone)]
pub struct PostgresWorkflowRepository {
    pool: PgPool,
}

impl PostgresWorkflowRepository {
    /// Creates a new PostgresWorkflowRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkflowRepository for PostgresWorkflowRepository {
    async fn save(&self, workflow: &Workflow) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO workflows (
                id, context_id, slug, title, description, start_date, end_date,
                status, recurrences, frequency, notify_on_change,
                notify_custom_message, object_approval, next_cycle_start_date,
                folder, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(workflow.id().as_uuid())
        .bind(workflow.context_id().as_uuid())
        .bind(workflow.slug())
        .bind(workflow.title())
        .bind(workflow.description())
        .bind(workflow.start_date())
        .bind(workflow.end_date())
        .bind(workflow.status().as_str())
        .bind(workflow.recurrences())
        .bind(workflow.frequency().as_str())
        .bind(workflow.notify_on_change())
        .bind(workflow.notify_custom_message())
        .bind(workflow.object_approval())
        .bind(workflow.next_cycle_start_date())
        .bind(workflow.folder().map(FolderRef::as_str))
        .bind(workflow.created_at().as_datetime())
        .bind(workflow.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::AlreadyExists,
                    format!("Workflow already exists: {}", workflow.id()),
                )
            } else {
                DomainError::database("Failed to insert workflow", e)
            }
        })?;

        insert_children(&mut tx, workflow).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        tracing::debug!(workflow_id = %workflow.id(), "workflow saved");
        Ok(())
    }

    async fn update(&self, workflow: &Workflow) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let result = sqlx::query(
            r#"
            UPDATE workflows SET
                title = $2,
                description = $3,
                start_date = $4,
                end_date = $5,
                status = $6,
                recurrences = $7,
                frequency = $8,
                notify_on_change = $9,
                notify_custom_message = $10,
                object_approval = $11,
                next_cycle_start_date = $12,
                folder = $13,
                updated_at = $14
            WHERE id = $1
            "#,
        )
        .bind(workflow.id().as_uuid())
        .bind(workflow.title())
        .bind(workflow.description())
        .bind(workflow.start_date())
        .bind(workflow.end_date())
        .bind(workflow.status().as_str())
        .bind(workflow.recurrences())
        .bind(workflow.frequency().as_str())
        .bind(workflow.notify_on_change())
        .bind(workflow.notify_custom_message())
        .bind(workflow.object_approval())
        .bind(workflow.next_cycle_start_date())
        .bind(workflow.folder().map(FolderRef::as_str))
        .bind(workflow.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to update workflow", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::WorkflowNotFound,
                format!("Workflow not found: {}", workflow.id()),
            ));
        }

        delete_children(&mut tx, &workflow.id()).await?;
        insert_children(&mut tx, workflow).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        tracing::debug!(workflow_id = %workflow.id(), "workflow updated");
        Ok(())
    }

    async fn find_by_id(&self, id: &WorkflowId) -> Result<Option<Workflow>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, context_id, slug, title, description, start_date, end_date,
                   status, recurrences, frequency, notify_on_change,
                   notify_custom_message, object_approval, next_cycle_start_date,
                   folder, created_at, updated_at
            FROM workflows WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch workflow", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let workflow_people = load_people(&self.pool, id).await?;
        let task_groups = load_task_groups(&self.pool, id).await?;
        let cycles = load_cycles(&self.pool, id).await?;

        let record = row_to_record(row, workflow_people, task_groups, cycles)?;
        Ok(Some(Workflow::reconstitute(record)))
    }

    async fn delete(&self, id: &WorkflowId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        delete_children(&mut tx, id).await?;

        let result = sqlx::query("DELETE FROM workflows WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete workflow", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::WorkflowNotFound,
                format!("Workflow not found: {}", id),
            ));
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn exists(&self, id: &WorkflowId) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM workflows WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to check workflow existence", e))?;

        Ok(result.0 > 0)
    }
}

// ───────────────────────────────────────────────────────────────
// Writes
// ───────────────────────────────────────────────────────────────

async fn insert_children(conn: &mut PgConnection, workflow: &Workflow) -> Result<(), DomainError> {
    for (index, person) in workflow.workflow_people().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO workflow_people (id, workflow_id, person_id, context_id, position)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(person.id().as_uuid())
        .bind(person.workflow_id().as_uuid())
        .bind(person.person_id().as_uuid())
        .bind(person.context_id().as_uuid())
        .bind(position(index)?)
        .execute(&mut *conn)
        .await
        .map_err(|e| DomainError::database("Failed to insert workflow person", e))?;
    }

    for (index, task_group) in workflow.task_groups().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO task_groups (id, workflow_id, context_id, title, description, contact_id, position)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(task_group.id().as_uuid())
        .bind(task_group.workflow_id().as_uuid())
        .bind(task_group.context_id().as_uuid())
        .bind(task_group.title())
        .bind(task_group.description())
        .bind(task_group.contact_id().map(|id| *id.as_uuid()))
        .bind(position(index)?)
        .execute(&mut *conn)
        .await
        .map_err(|e| DomainError::database("Failed to insert task group", e))?;

        for (index, link) in task_group.objects().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO task_group_objects (id, task_group_id, context_id, object_type, object_id, position)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(link.id().as_uuid())
            .bind(link.task_group_id().as_uuid())
            .bind(link.context_id().as_uuid())
            .bind(link.object().object_type())
            .bind(link.object().object_id())
            .bind(position(index)?)
            .execute(&mut *conn)
            .await
            .map_err(|e| DomainError::database("Failed to insert task group object", e))?;
        }
    }

    for (index, cycle) in workflow.cycles().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO cycles (
                id, workflow_id, context_id, title, status, is_current, start_date, end_date, position
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(cycle.id().as_uuid())
        .bind(cycle.workflow_id().as_uuid())
        .bind(cycle.context_id().as_uuid())
        .bind(cycle.title())
        .bind(cycle.status().as_str())
        .bind(cycle.is_current())
        .bind(cycle.start_date())
        .bind(cycle.end_date())
        .bind(position(index)?)
        .execute(&mut *conn)
        .await
        .map_err(|e| DomainError::database("Failed to insert cycle", e))?;

        for (index, task) in cycle.tasks().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO cycle_task_group_objects (
                    id, cycle_id, task_group_object_id, status, end_date, position
                ) VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(task.id().as_uuid())
            .bind(task.cycle_id().as_uuid())
            .bind(task.task_group_object_id().as_uuid())
            .bind(task.status())
            .bind(task.end_date())
            .bind(position(index)?)
            .execute(&mut *conn)
            .await
            .map_err(|e| DomainError::database("Failed to insert cycle task", e))?;
        }
    }

    Ok(())
}

/// Converts a collection index into the stored `position`.
fn position(index: usize) -> Result<i32, DomainError> {
    i32::try_from(index).map_err(|_| {
        DomainError::new(
            ErrorCode::ValidationFailed,
            format!("Collection too large to persist: index {}", index),
        )
    })
}

/// Removes every row owned by a workflow, children first.
async fn delete_children(conn: &mut PgConnection, id: &WorkflowId) -> Result<(), DomainError> {
    let statements = [
        (
            "DELETE FROM cycle_task_group_objects WHERE cycle_id IN \
             (SELECT id FROM cycles WHERE workflow_id = $1)",
            "cycle tasks",
        ),
        ("DELETE FROM cycles WHERE workflow_id = $1", "cycles"),
        (
            "DELETE FROM task_group_objects WHERE task_group_id IN \
             (SELECT id FROM task_groups WHERE workflow_id = $1)",
            "task group objects",
        ),
        ("DELETE FROM task_groups WHERE workflow_id = $1", "task groups"),
        ("DELETE FROM workflow_people WHERE workflow_id = $1", "workflow people"),
    ];

    for (sql, what) in statements {
        sqlx::query(sql)
            .bind(id.as_uuid())
            .execute(&mut *conn)
            .await
            .map_err(|e| DomainError::database(&format!("Failed to delete {}", what), e))?;
    }

    Ok(())
}

// ───────────────────────────────────────────────────────────────
// Reads
// ───────────────────────────────────────────────────────────────

async fn load_people(pool: &PgPool, id: &WorkflowId) -> Result<Vec<WorkflowPerson>, DomainError> {
    let rows = sqlx::query(
        r#"
        SELECT id, workflow_id, person_id, context_id
        FROM workflow_people WHERE workflow_id = $1
        ORDER BY position
        "#,
    )
    .bind(id.as_uuid())
    .fetch_all(pool)
    .await
    .map_err(|e| DomainError::database("Failed to fetch workflow people", e))?;

    Ok(rows
        .into_iter()
        .map(|row| {
            WorkflowPerson::reconstitute(
                WorkflowPersonId::from_uuid(row.get("id")),
                WorkflowId::from_uuid(row.get("workflow_id")),
                PersonId::from_uuid(row.get("person_id")),
                ContextId::from_uuid(row.get("context_id")),
            )
        })
        .collect())
}

async fn load_task_groups(pool: &PgPool, id: &WorkflowId) -> Result<Vec<TaskGroup>, DomainError> {
    let rows = sqlx::query(
        r#"
        SELECT id, workflow_id, context_id, title, description, contact_id
        FROM task_groups WHERE workflow_id = $1
        ORDER BY position
        "#,
    )
    .bind(id.as_uuid())
    .fetch_all(pool)
    .await
    .map_err(|e| DomainError::database("Failed to fetch task groups", e))?;

    let object_rows = sqlx::query(
        r#"
        SELECT tgo.id, tgo.task_group_id, tgo.context_id, tgo.object_type, tgo.object_id
        FROM task_group_objects tgo
        JOIN task_groups tg ON tg.id = tgo.task_group_id
        WHERE tg.workflow_id = $1
        ORDER BY tgo.position
        "#,
    )
    .bind(id.as_uuid())
    .fetch_all(pool)
    .await
    .map_err(|e| DomainError::database("Failed to fetch task group objects", e))?;

    let mut objects = Vec::with_capacity(object_rows.len());
    for row in object_rows {
        let object_type: String = row.get("object_type");
        let object_id: Uuid = row.get("object_id");
        objects.push(TaskGroupObject::reconstitute(
            TaskGroupObjectId::from_uuid(row.get("id")),
            TaskGroupId::from_uuid(row.get("task_group_id")),
            ContextId::from_uuid(row.get("context_id")),
            TrackedObject::new(object_type, object_id)?,
        ));
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let group_id = TaskGroupId::from_uuid(row.get("id"));
            let contact: Option<Uuid> = row.get("contact_id");
            TaskGroup::reconstitute(
                group_id,
                WorkflowId::from_uuid(row.get("workflow_id")),
                ContextId::from_uuid(row.get("context_id")),
                row.get("title"),
                row.get("description"),
                contact.map(PersonId::from_uuid),
                objects
                    .iter()
                    .filter(|link| link.task_group_id() == group_id)
                    .cloned()
                    .collect(),
            )
        })
        .collect())
}

async fn load_cycles(pool: &PgPool, id: &WorkflowId) -> Result<Vec<Cycle>, DomainError> {
    let rows = sqlx::query(
        r#"
        SELECT id, workflow_id, context_id, title, status, is_current, start_date, end_date
        FROM cycles WHERE workflow_id = $1
        ORDER BY position
        "#,
    )
    .bind(id.as_uuid())
    .fetch_all(pool)
    .await
    .map_err(|e| DomainError::database("Failed to fetch cycles", e))?;

    let task_rows = sqlx::query(
        r#"
        SELECT ctgo.id, ctgo.cycle_id, ctgo.task_group_object_id, ctgo.status, ctgo.end_date
        FROM cycle_task_group_objects ctgo
        JOIN cycles c ON c.id = ctgo.cycle_id
        WHERE c.workflow_id = $1
        ORDER BY ctgo.position
        "#,
    )
    .bind(id.as_uuid())
    .fetch_all(pool)
    .await
    .map_err(|e| DomainError::database("Failed to fetch cycle tasks", e))?;

    let tasks: Vec<CycleTaskGroupObject> = task_rows
        .into_iter()
        .map(|row| {
            CycleTaskGroupObject::reconstitute(
                CycleTaskGroupObjectId::from_uuid(row.get("id")),
                CycleId::from_uuid(row.get("cycle_id")),
                TaskGroupObjectId::from_uuid(row.get("task_group_object_id")),
                row.get("status"),
                row.get("end_date"),
            )
        })
        .collect();

    let mut cycles = Vec::with_capacity(rows.len());
    for row in rows {
        let cycle_id = CycleId::from_uuid(row.get("id"));
        let status: String = row.get("status");
        cycles.push(Cycle::reconstitute(
            cycle_id,
            WorkflowId::from_uuid(row.get("workflow_id")),
            ContextId::from_uuid(row.get("context_id")),
            row.get("title"),
            status.parse::<CycleTaskStatus>()?,
            row.get("is_current"),
            row.get("start_date"),
            row.get("end_date"),
            tasks
                .iter()
                .filter(|task| task.cycle_id() == cycle_id)
                .cloned()
                .collect(),
        ));
    }

    Ok(cycles)
}

fn row_to_record(
    row: PgRow,
    workflow_people: Vec<WorkflowPerson>,
    task_groups: Vec<TaskGroup>,
    cycles: Vec<Cycle>,
) -> Result<WorkflowRecord, DomainError> {
    let status: String = row.get("status");
    let frequency: Option<String> = row.get("frequency");
    let folder: Option<String> = row.get("folder");
    let created_at: DateTime<Utc> = row.get("created_at");
    let updated_at: DateTime<Utc> = row.get("updated_at");
    let start_date: Option<NaiveDate> = row.get("start_date");

    Ok(WorkflowRecord {
        id: WorkflowId::from_uuid(row.get("id")),
        context_id: ContextId::from_uuid(row.get("context_id")),
        slug: row.get("slug"),
        title: row.get("title"),
        description: row.get("description"),
        start_date,
        end_date: row.get("end_date"),
        status: status.parse::<WorkflowStatus>()?,
        recurrences: row.get("recurrences"),
        frequency: validate_frequency(frequency.as_deref())?,
        notify_on_change: row.get("notify_on_change"),
        notify_custom_message: row.get("notify_custom_message"),
        object_approval: row.get("object_approval"),
        next_cycle_start_date: row.get("next_cycle_start_date"),
        folder: folder.map(FolderRef::new).transpose()?,
        workflow_people,
        task_groups,
        cycles,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresWorkflowRepository>();
    }

    #[test]
    fn positions_follow_collection_index() {
        assert_eq!(position(0).unwrap(), 0);
        assert_eq!(position(41).unwrap(), 41);

        let err = position(i32::MAX as usize + 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}
