use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use redress_application::UserRepository;
use redress_core::{AppError, AppResult};
use redress_domain::{User, UserId};

/// In-memory user repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<()> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|stored| stored.subject() == user.subject())
        {
            return Err(AppError::Conflict(format!(
                "subject '{}' is already registered",
                user.subject().as_str()
            )));
        }

        users.insert(user.id(), user);
        Ok(())
    }

    async fn find(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_subject(&self, subject: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.subject().as_str() == subject)
            .cloned())
    }
}
