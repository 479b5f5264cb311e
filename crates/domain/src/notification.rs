use chrono::{DateTime, Utc};
use redress_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::ids::{GrievanceId, NotificationId, UserId};

/// A message addressed to a user, usually caused by a grievance event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    recipient: UserId,
    grievance_id: Option<GrievanceId>,
    title: NonEmptyString,
    message: NonEmptyString,
    read: bool,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unread notification.
    pub fn new(
        recipient: UserId,
        grievance_id: Option<GrievanceId>,
        title: impl Into<String>,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: NotificationId::new(),
            recipient,
            grievance_id,
            title: NonEmptyString::new(title)?,
            message: NonEmptyString::new(message)?,
            read: false,
            created_at,
        })
    }

    /// Rehydrates a notification from persisted fields.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn from_storage(
        id: NotificationId,
        recipient: UserId,
        grievance_id: Option<GrievanceId>,
        title: NonEmptyString,
        message: NonEmptyString,
        read: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            recipient,
            grievance_id,
            title,
            message,
            read,
            created_at,
        }
    }

    /// Marks the notification as acknowledged. The flag only ever moves
    /// from unread to read.
    pub fn mark_read(&mut self) {
        self.read = true;
    }

    /// Returns the notification identifier.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the addressed user.
    #[must_use]
    pub fn recipient(&self) -> UserId {
        self.recipient
    }

    /// Returns the grievance that caused the notification, if any.
    #[must_use]
    pub fn grievance_id(&self) -> Option<GrievanceId> {
        self.grievance_id
    }

    /// Returns the notification title.
    #[must_use]
    pub fn title(&self) -> &NonEmptyString {
        &self.title
    }

    /// Returns the notification message.
    #[must_use]
    pub fn message(&self) -> &NonEmptyString {
        &self.message
    }

    /// Returns whether the notification has been acknowledged.
    #[must_use]
    pub fn is_read(&self) -> bool {
        self.read
    }

    /// Returns when the notification was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
