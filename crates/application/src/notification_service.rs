use std::sync::Arc;

use redress_core::{AppError, AppResult};
use redress_domain::{Actor, Notification, NotificationId};

use crate::grievance_ports::NotificationRepository;

/// Application service for reading and acknowledging notifications.
///
/// Creation happens inside the lifecycle service as a transition side
/// effect; this service only serves the recipient's view.
#[derive(Clone)]
pub struct NotificationService {
    repository: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    /// Creates a service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }

    /// Lists the caller's notifications, newest first.
    pub async fn list_for(&self, actor: &Actor) -> AppResult<Vec<Notification>> {
        self.repository.list_for_recipient(actor.user_id()).await
    }

    /// Counts the caller's unacknowledged notifications.
    pub async fn unread_count(&self, actor: &Actor) -> AppResult<u64> {
        let notifications = self.repository.list_for_recipient(actor.user_id()).await?;
        Ok(notifications
            .iter()
            .filter(|notification| !notification.is_read())
            .count() as u64)
    }

    /// Acknowledges a notification. Only the recipient may acknowledge,
    /// and the read flag never moves back.
    pub async fn mark_read(&self, actor: &Actor, id: NotificationId) -> AppResult<()> {
        let notification = self
            .repository
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("notification '{id}' does not exist")))?;

        if notification.recipient() != actor.user_id() {
            return Err(AppError::Forbidden(
                "only the recipient may acknowledge a notification".to_owned(),
            ));
        }

        self.repository.mark_read(id).await
    }
}
