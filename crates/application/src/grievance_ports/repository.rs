use async_trait::async_trait;
use chrono::{DateTime, Utc};

use redress_core::AppResult;
use redress_domain::{
    Assignment, Attachment, Comment, Grievance, GrievanceId, Notification, NotificationId,
    TrackingId, User, UserId,
};

/// Repository port for grievance persistence.
///
/// The core never deletes grievances; closure is a status, not removal.
#[async_trait]
pub trait GrievanceRepository: Send + Sync {
    /// Persists a freshly submitted grievance.
    ///
    /// Returns `AppError::Conflict` when the tracking id is already taken,
    /// so the caller can regenerate and retry.
    async fn create(&self, grievance: Grievance) -> AppResult<()>;

    /// Finds a grievance by internal identifier.
    async fn find(&self, id: GrievanceId) -> AppResult<Option<Grievance>>;

    /// Finds a grievance by public tracking identifier.
    async fn find_by_tracking_id(&self, tracking_id: &TrackingId)
    -> AppResult<Option<Grievance>>;

    /// Lists every grievance, newest first.
    async fn list_all(&self) -> AppResult<Vec<Grievance>>;

    /// Lists grievances owned by a user, newest first.
    async fn list_by_owner(&self, owner: UserId) -> AppResult<Vec<Grievance>>;

    /// Applies a mutated grievance as a single conditional update.
    ///
    /// `expected_updated_at` is the update timestamp the caller read before
    /// mutating; when the stored row has moved on, the write is rejected
    /// with `AppError::Conflict` instead of silently losing the concurrent
    /// change. Unknown ids yield `AppError::NotFound`.
    async fn update(
        &self,
        grievance: &Grievance,
        expected_updated_at: DateTime<Utc>,
    ) -> AppResult<()>;
}

/// Repository port for the append-only assignment history.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Appends an assignment row.
    async fn create(&self, assignment: Assignment) -> AppResult<()>;

    /// Lists assignments for a grievance, oldest first.
    async fn list_for_grievance(&self, grievance_id: GrievanceId) -> AppResult<Vec<Assignment>>;
}

/// Repository port for the append-only comment timeline.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Appends a comment.
    async fn create(&self, comment: Comment) -> AppResult<()>;

    /// Lists comments for a grievance, oldest first.
    async fn list_for_grievance(&self, grievance_id: GrievanceId) -> AppResult<Vec<Comment>>;
}

/// Repository port for attachment metadata.
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Persists attachment metadata.
    async fn create(&self, attachment: Attachment) -> AppResult<()>;

    /// Lists attachments for a grievance, oldest first.
    async fn list_for_grievance(&self, grievance_id: GrievanceId) -> AppResult<Vec<Attachment>>;
}

/// Repository port for notification persistence.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persists a notification.
    async fn create(&self, notification: Notification) -> AppResult<()>;

    /// Finds a notification by identifier.
    async fn find(&self, id: NotificationId) -> AppResult<Option<Notification>>;

    /// Lists notifications addressed to a user, newest first.
    async fn list_for_recipient(&self, recipient: UserId) -> AppResult<Vec<Notification>>;

    /// Sets the read flag. The flag only ever moves from unread to read.
    async fn mark_read(&self, id: NotificationId) -> AppResult<()>;
}

/// Repository port for user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new user record.
    async fn create(&self, user: User) -> AppResult<()>;

    /// Finds a user by internal identifier.
    async fn find(&self, id: UserId) -> AppResult<Option<User>>;

    /// Finds a user by identity-provider subject claim.
    async fn find_by_subject(&self, subject: &str) -> AppResult<Option<User>>;
}
