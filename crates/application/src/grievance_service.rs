//! Grievance lifecycle manager.
//!
//! Owns every state transition and the notification side effects each one
//! triggers. Entities reach persistence only through this service; the
//! analytics side is read-only and lives in `analytics_service`.

use std::sync::Arc;

use redress_core::{AppError, AppResult};
use redress_domain::{Actor, Capability};

use crate::grievance_ports::{
    AssignmentRepository, AttachmentRepository, CommentRepository, FileStorage,
    GrievanceRepository, NotificationRepository, UserRepository,
};

mod attachments;
mod comments;
mod status;
mod submit;
mod triage;
mod visibility;

/// Application service owning the grievance lifecycle.
#[derive(Clone)]
pub struct GrievanceService {
    grievances: Arc<dyn GrievanceRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    comments: Arc<dyn CommentRepository>,
    attachments: Arc<dyn AttachmentRepository>,
    notifications: Arc<dyn NotificationRepository>,
    users: Arc<dyn UserRepository>,
    storage: Arc<dyn FileStorage>,
}

impl GrievanceService {
    /// Creates the lifecycle service from its ports.
    #[must_use]
    pub fn new(
        grievances: Arc<dyn GrievanceRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        comments: Arc<dyn CommentRepository>,
        attachments: Arc<dyn AttachmentRepository>,
        notifications: Arc<dyn NotificationRepository>,
        users: Arc<dyn UserRepository>,
        storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            grievances,
            assignments,
            comments,
            attachments,
            notifications,
            users,
            storage,
        }
    }
}

/// Checks the capability table for the acting role.
pub(crate) fn require(actor: &Actor, capability: Capability) -> AppResult<()> {
    if actor.role().allows(capability) {
        return Ok(());
    }

    Err(AppError::Forbidden(format!(
        "role '{}' may not perform this action",
        actor.role().as_str()
    )))
}

#[cfg(test)]
mod tests;
