use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use redress_application::AttachmentRepository;
use redress_core::{AppError, AppResult, NonEmptyString};
use redress_domain::{Attachment, AttachmentId, GrievanceId, UserId};

/// PostgreSQL-backed attachment metadata repository.
#[derive(Clone)]
pub struct PostgresAttachmentRepository {
    pool: PgPool,
}

impl PostgresAttachmentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AttachmentRow {
    id: Uuid,
    grievance_id: Uuid,
    uploader_id: Option<Uuid>,
    file_name: String,
    content_type: String,
    size_bytes: i64,
    storage_path: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AttachmentRow> for Attachment {
    type Error = AppError;

    fn try_from(row: AttachmentRow) -> Result<Self, Self::Error> {
        Ok(Attachment::from_storage(
            AttachmentId::from_uuid(row.id),
            GrievanceId::from_uuid(row.grievance_id),
            row.uploader_id.map(UserId::from_uuid),
            NonEmptyString::new(row.file_name)?,
            NonEmptyString::new(row.content_type)?,
            u64::try_from(row.size_bytes).unwrap_or(0),
            NonEmptyString::new(row.storage_path)?,
            row.created_at,
        ))
    }
}

#[async_trait]
impl AttachmentRepository for PostgresAttachmentRepository {
    async fn create(&self, attachment: Attachment) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO attachments (
                id, grievance_id, uploader_id, file_name, content_type,
                size_bytes, storage_path, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(attachment.id().as_uuid())
        .bind(attachment.grievance_id().as_uuid())
        .bind(attachment.uploader().map(|uploader| uploader.as_uuid()))
        .bind(attachment.file_name().as_str())
        .bind(attachment.content_type().as_str())
        .bind(i64::try_from(attachment.size_bytes()).unwrap_or(i64::MAX))
        .bind(attachment.storage_path().as_str())
        .bind(attachment.created_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create attachment: {error}")))?;

        Ok(())
    }

    async fn list_for_grievance(&self, grievance_id: GrievanceId) -> AppResult<Vec<Attachment>> {
        let rows = sqlx::query_as::<_, AttachmentRow>(
            r#"
            SELECT id, grievance_id, uploader_id, file_name, content_type,
                   size_bytes, storage_path, created_at
            FROM attachments
            WHERE grievance_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(grievance_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list attachments: {error}")))?;

        rows.into_iter().map(Attachment::try_from).collect()
    }
}
