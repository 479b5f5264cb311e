use std::sync::Arc;

use chrono::Utc;

use redress_core::{AppError, AppResult};
use redress_domain::{User, UserId};

use crate::grievance_ports::{NewUserInput, UserRepository};

/// Thin directory over user records, backing the identity middleware.
#[derive(Clone)]
pub struct UserDirectoryService {
    repository: Arc<dyn UserRepository>,
}

impl UserDirectoryService {
    /// Creates a service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Registers a user record for an identity-provider subject.
    pub async fn register(&self, input: NewUserInput) -> AppResult<User> {
        if self
            .repository
            .find_by_subject(input.subject.as_str())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "subject '{}' is already registered",
                input.subject
            )));
        }

        let user = User::new(
            UserId::new(),
            input.subject,
            input.display_name,
            input.email,
            input.role,
            input.department,
            Utc::now(),
        )?;
        self.repository.create(user.clone()).await?;

        Ok(user)
    }

    /// Finds a user by identity-provider subject claim.
    pub async fn find_by_subject(&self, subject: &str) -> AppResult<Option<User>> {
        self.repository.find_by_subject(subject).await
    }

    /// Finds a user by internal identifier.
    pub async fn find(&self, id: UserId) -> AppResult<Option<User>> {
        self.repository.find(id).await
    }
}
