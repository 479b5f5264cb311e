use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use redress_application::UserRepository;
use redress_core::{AppError, AppResult};
use redress_domain::{Role, User, UserId};

/// PostgreSQL-backed user repository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    subject: String,
    display_name: String,
    email: String,
    role: String,
    department: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        User::new(
            UserId::from_uuid(row.id),
            row.subject,
            row.display_name,
            row.email,
            Role::from_str(&row.role)?,
            row.department,
            row.created_at,
        )
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, subject, display_name, email, role, department, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.subject().as_str())
        .bind(user.display_name().as_str())
        .bind(user.email().as_str())
        .bind(user.role().as_str())
        .bind(user.department())
        .bind(user.created_at())
        .execute(&self.pool)
        .await
        .map_err(|error| match &error {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                AppError::Conflict(format!(
                    "subject '{}' is already registered",
                    user.subject().as_str()
                ))
            }
            _ => AppError::Internal(format!("failed to create user: {error}")),
        })?;

        Ok(())
    }

    async fn find(&self, id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, subject, display_name, email, role, department,
                   created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load user: {error}")))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_subject(&self, subject: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, subject, display_name, email, role, department,
                   created_at
            FROM users
            WHERE subject = $1
            "#,
        )
        .bind(subject)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load user: {error}")))?;

        row.map(User::try_from).transpose()
    }
}
