use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use redress_application::NotificationRepository;
use redress_core::{AppError, AppResult, NonEmptyString};
use redress_domain::{GrievanceId, Notification, NotificationId, UserId};

/// PostgreSQL-backed notification repository.
#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRow {
    id: Uuid,
    recipient_id: Uuid,
    grievance_id: Option<Uuid>,
    title: String,
    message: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = AppError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Notification::from_storage(
            NotificationId::from_uuid(row.id),
            UserId::from_uuid(row.recipient_id),
            row.grievance_id.map(GrievanceId::from_uuid),
            NonEmptyString::new(row.title)?,
            NonEmptyString::new(row.message)?,
            row.read,
            row.created_at,
        ))
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn create(&self, notification: Notification) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (
                id, recipient_id, grievance_id, title, message, read,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(notification.id().as_uuid())
        .bind(notification.recipient().as_uuid())
        .bind(notification.grievance_id().map(|id| id.as_uuid()))
        .bind(notification.title().as_str())
        .bind(notification.message().as_str())
        .bind(notification.is_read())
        .bind(notification.created_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create notification: {error}")))?;

        Ok(())
    }

    async fn find(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        let row = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT id, recipient_id, grievance_id, title, message, read,
                   created_at
            FROM notifications
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load notification: {error}")))?;

        row.map(Notification::try_from).transpose()
    }

    async fn list_for_recipient(&self, recipient: UserId) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT id, recipient_id, grievance_id, title, message, read,
                   created_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(recipient.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list notifications: {error}")))?;

        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<()> {
        // The flag is monotonic; re-acknowledging is a no-op, not an error.
        let result = sqlx::query("UPDATE notifications SET read = TRUE WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to mark notification read: {error}"))
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "notification '{id}' does not exist"
            )));
        }

        Ok(())
    }
}
