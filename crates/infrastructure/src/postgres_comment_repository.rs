use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use redress_application::CommentRepository;
use redress_core::{AppError, AppResult, NonEmptyString};
use redress_domain::{Comment, CommentId, GrievanceId, UserId};

/// PostgreSQL-backed append-only comment timeline.
#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: Uuid,
    grievance_id: Uuid,
    author_id: Uuid,
    body: String,
    internal: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = AppError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment::from_storage(
            CommentId::from_uuid(row.id),
            GrievanceId::from_uuid(row.grievance_id),
            UserId::from_uuid(row.author_id),
            NonEmptyString::new(row.body)?,
            row.internal,
            row.created_at,
        ))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, comment: Comment) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (
                id, grievance_id, author_id, body, internal, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.id().as_uuid())
        .bind(comment.grievance_id().as_uuid())
        .bind(comment.author().as_uuid())
        .bind(comment.body().as_str())
        .bind(comment.is_internal())
        .bind(comment.created_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create comment: {error}")))?;

        Ok(())
    }

    async fn list_for_grievance(&self, grievance_id: GrievanceId) -> AppResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, grievance_id, author_id, body, internal, created_at
            FROM comments
            WHERE grievance_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(grievance_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list comments: {error}")))?;

        rows.into_iter().map(Comment::try_from).collect()
    }
}
