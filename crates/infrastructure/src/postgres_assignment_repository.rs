use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use redress_application::AssignmentRepository;
use redress_core::{AppError, AppResult};
use redress_domain::{Assignment, AssignmentId, GrievanceId, UserId};

/// PostgreSQL-backed append-only assignment history.
#[derive(Clone)]
pub struct PostgresAssignmentRepository {
    pool: PgPool,
}

impl PostgresAssignmentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    id: Uuid,
    grievance_id: Uuid,
    assignee_id: Uuid,
    assigned_by: Uuid,
    note: Option<String>,
    due_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<AssignmentRow> for Assignment {
    fn from(row: AssignmentRow) -> Self {
        Assignment::from_storage(
            AssignmentId::from_uuid(row.id),
            GrievanceId::from_uuid(row.grievance_id),
            UserId::from_uuid(row.assignee_id),
            UserId::from_uuid(row.assigned_by),
            row.note,
            row.due_at,
            row.created_at,
        )
    }
}

#[async_trait]
impl AssignmentRepository for PostgresAssignmentRepository {
    async fn create(&self, assignment: Assignment) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO assignments (
                id, grievance_id, assignee_id, assigned_by, note, due_at,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(assignment.id().as_uuid())
        .bind(assignment.grievance_id().as_uuid())
        .bind(assignment.assignee().as_uuid())
        .bind(assignment.assigned_by().as_uuid())
        .bind(assignment.note())
        .bind(assignment.due_at())
        .bind(assignment.created_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create assignment: {error}")))?;

        Ok(())
    }

    async fn list_for_grievance(&self, grievance_id: GrievanceId) -> AppResult<Vec<Assignment>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT id, grievance_id, assignee_id, assigned_by, note, due_at,
                   created_at
            FROM assignments
            WHERE grievance_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(grievance_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list assignments: {error}")))?;

        Ok(rows.into_iter().map(Assignment::from).collect())
    }
}
