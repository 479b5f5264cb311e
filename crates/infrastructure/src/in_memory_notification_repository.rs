use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use redress_application::NotificationRepository;
use redress_core::{AppError, AppResult};
use redress_domain::{Notification, NotificationId, UserId};

/// In-memory notification repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryNotificationRepository {
    notifications: RwLock<HashMap<NotificationId, Notification>>,
}

impl InMemoryNotificationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            notifications: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(&self, notification: Notification) -> AppResult<()> {
        self.notifications
            .write()
            .await
            .insert(notification.id(), notification);
        Ok(())
    }

    async fn find(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(self.notifications.read().await.get(&id).cloned())
    }

    async fn list_for_recipient(&self, recipient: UserId) -> AppResult<Vec<Notification>> {
        let notifications = self.notifications.read().await;

        let mut listed: Vec<Notification> = notifications
            .values()
            .filter(|notification| notification.recipient() == recipient)
            .cloned()
            .collect();
        listed.sort_by(|left, right| right.created_at().cmp(&left.created_at()));

        Ok(listed)
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<()> {
        let mut notifications = self.notifications.write().await;

        let Some(notification) = notifications.get_mut(&id) else {
            return Err(AppError::NotFound(format!(
                "notification '{id}' does not exist"
            )));
        };
        notification.mark_read();

        Ok(())
    }
}
