use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use redress_application::GrievanceRepository;
use redress_core::{AppError, AppResult, NonEmptyString};
use redress_domain::{Category, Grievance, GrievanceId, Priority, Status, TrackingId, UserId};

/// PostgreSQL-backed grievance repository.
#[derive(Clone)]
pub struct PostgresGrievanceRepository {
    pool: PgPool,
}

impl PostgresGrievanceRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GrievanceRow {
    id: Uuid,
    tracking_id: String,
    owner_id: Option<Uuid>,
    anonymous: bool,
    confidential: bool,
    category: String,
    priority: String,
    status: String,
    title: String,
    description: String,
    sla_deadline: Option<DateTime<Utc>>,
    resolved_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<GrievanceRow> for Grievance {
    type Error = AppError;

    fn try_from(row: GrievanceRow) -> Result<Self, Self::Error> {
        Ok(Grievance::from_storage(
            GrievanceId::from_uuid(row.id),
            TrackingId::from_str(row.tracking_id.as_str())?,
            row.owner_id.map(UserId::from_uuid),
            row.anonymous,
            row.confidential,
            Category::from_str(row.category.as_str())?,
            Priority::from_str(row.priority.as_str())?,
            Status::from_str(row.status.as_str())?,
            NonEmptyString::new(row.title)?,
            NonEmptyString::new(row.description)?,
            row.sla_deadline,
            row.resolved_at,
            row.created_at,
            row.updated_at,
        ))
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, tracking_id, owner_id, anonymous, confidential, category,
           priority, status, title, description, sla_deadline, resolved_at,
           created_at, updated_at
    FROM grievances
"#;

#[async_trait]
impl GrievanceRepository for PostgresGrievanceRepository {
    async fn create(&self, grievance: Grievance) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO grievances (
                id, tracking_id, owner_id, anonymous, confidential, category,
                priority, status, title, description, sla_deadline,
                resolved_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(grievance.id().as_uuid())
        .bind(grievance.tracking_id().as_str())
        .bind(grievance.owner().map(|owner| owner.as_uuid()))
        .bind(grievance.is_anonymous())
        .bind(grievance.is_confidential())
        .bind(grievance.category().as_str())
        .bind(grievance.priority().as_str())
        .bind(grievance.status().as_str())
        .bind(grievance.title().as_str())
        .bind(grievance.description().as_str())
        .bind(grievance.sla_deadline())
        .bind(grievance.resolved_at())
        .bind(grievance.created_at())
        .bind(grievance.updated_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23505")
                {
                    return Err(AppError::Conflict(format!(
                        "tracking id '{}' is already taken",
                        grievance.tracking_id()
                    )));
                }

                Err(AppError::Internal(format!(
                    "failed to create grievance: {error}"
                )))
            }
        }
    }

    async fn find(&self, id: GrievanceId) -> AppResult<Option<Grievance>> {
        let row = sqlx::query_as::<_, GrievanceRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to load grievance: {error}")))?;

        row.map(Grievance::try_from).transpose()
    }

    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> AppResult<Option<Grievance>> {
        let row = sqlx::query_as::<_, GrievanceRow>(&format!(
            "{SELECT_COLUMNS} WHERE tracking_id = $1"
        ))
        .bind(tracking_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load grievance by tracking id: {error}"))
        })?;

        row.map(Grievance::try_from).transpose()
    }

    async fn list_all(&self) -> AppResult<Vec<Grievance>> {
        let rows = sqlx::query_as::<_, GrievanceRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list grievances: {error}")))?;

        rows.into_iter().map(Grievance::try_from).collect()
    }

    async fn list_by_owner(&self, owner: UserId) -> AppResult<Vec<Grievance>> {
        let rows = sqlx::query_as::<_, GrievanceRow>(&format!(
            "{SELECT_COLUMNS} WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list grievances by owner: {error}"))
        })?;

        rows.into_iter().map(Grievance::try_from).collect()
    }

    async fn update(
        &self,
        grievance: &Grievance,
        expected_updated_at: DateTime<Utc>,
    ) -> AppResult<()> {
        // One conditional statement per record: the write only lands when
        // the row still carries the update timestamp the caller read.
        let result = sqlx::query(
            r#"
            UPDATE grievances
            SET priority = $3,
                status = $4,
                sla_deadline = $5,
                resolved_at = $6,
                updated_at = $7
            WHERE id = $1 AND updated_at = $2
            "#,
        )
        .bind(grievance.id().as_uuid())
        .bind(expected_updated_at)
        .bind(grievance.priority().as_str())
        .bind(grievance.status().as_str())
        .bind(grievance.sla_deadline())
        .bind(grievance.resolved_at())
        .bind(grievance.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update grievance: {error}")))?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM grievances WHERE id = $1",
            )
            .bind(grievance.id().as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to check grievance existence: {error}"))
            })?;

            if exists == 0 {
                return Err(AppError::NotFound(format!(
                    "grievance '{}' does not exist",
                    grievance.id()
                )));
            }

            return Err(AppError::Conflict(format!(
                "grievance '{}' was modified concurrently",
                grievance.id()
            )));
        }

        Ok(())
    }
}
