use redress_domain::{Assignment, Attachment, Comment, Grievance, Notification, User};

use super::types::{
    AssignmentResponse, AttachmentResponse, CommentResponse, GrievanceResponse,
    NotificationResponse, TrackResponse, UserResponse,
};

impl From<Grievance> for GrievanceResponse {
    fn from(grievance: Grievance) -> Self {
        Self {
            id: grievance.id().as_uuid(),
            tracking_id: grievance.tracking_id().as_str().to_owned(),
            owner_id: grievance.owner().map(|owner| owner.as_uuid()),
            anonymous: grievance.is_anonymous(),
            confidential: grievance.is_confidential(),
            category: grievance.category().as_str().to_owned(),
            priority: grievance.priority().as_str().to_owned(),
            status: grievance.status().as_str().to_owned(),
            title: grievance.title().as_str().to_owned(),
            description: grievance.description().as_str().to_owned(),
            sla_deadline: grievance.sla_deadline(),
            resolved_at: grievance.resolved_at(),
            created_at: grievance.created_at(),
            updated_at: grievance.updated_at(),
        }
    }
}

impl From<Grievance> for TrackResponse {
    fn from(grievance: Grievance) -> Self {
        Self {
            tracking_id: grievance.tracking_id().as_str().to_owned(),
            category: grievance.category().as_str().to_owned(),
            priority: grievance.priority().as_str().to_owned(),
            status: grievance.status().as_str().to_owned(),
            sla_deadline: grievance.sla_deadline(),
            resolved_at: grievance.resolved_at(),
            created_at: grievance.created_at(),
            updated_at: grievance.updated_at(),
        }
    }
}

impl From<Assignment> for AssignmentResponse {
    fn from(assignment: Assignment) -> Self {
        Self {
            id: assignment.id().as_uuid(),
            grievance_id: assignment.grievance_id().as_uuid(),
            assignee_id: assignment.assignee().as_uuid(),
            assigned_by: assignment.assigned_by().as_uuid(),
            note: assignment.note().map(ToOwned::to_owned),
            due_at: assignment.due_at(),
            created_at: assignment.created_at(),
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id().as_uuid(),
            grievance_id: comment.grievance_id().as_uuid(),
            author_id: comment.author().as_uuid(),
            body: comment.body().as_str().to_owned(),
            internal: comment.is_internal(),
            created_at: comment.created_at(),
        }
    }
}

impl From<Attachment> for AttachmentResponse {
    fn from(attachment: Attachment) -> Self {
        Self {
            id: attachment.id().as_uuid(),
            grievance_id: attachment.grievance_id().as_uuid(),
            uploader_id: attachment.uploader().map(|uploader| uploader.as_uuid()),
            file_name: attachment.file_name().as_str().to_owned(),
            content_type: attachment.content_type().as_str().to_owned(),
            size_bytes: attachment.size_bytes(),
            created_at: attachment.created_at(),
        }
    }
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id().as_uuid(),
            grievance_id: notification.grievance_id().map(|id| id.as_uuid()),
            title: notification.title().as_str().to_owned(),
            message: notification.message().as_str().to_owned(),
            read: notification.is_read(),
            created_at: notification.created_at(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().as_uuid(),
            subject: user.subject().as_str().to_owned(),
            display_name: user.display_name().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
            role: user.role().as_str().to_owned(),
            department: user.department().map(ToOwned::to_owned),
            created_at: user.created_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use redress_domain::{Category, Grievance, TrackingId, UserId};

    use crate::dto::TrackResponse;

    fn owned_grievance() -> Grievance {
        Grievance::submit(
            TrackingId::generate().unwrap_or_else(|_| unreachable!()),
            Some(UserId::new()),
            false,
            false,
            Category::Academic,
            "Exam schedule clash",
            "Two finals are scheduled in the same slot.",
            Utc::now(),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn tracking_view_omits_content_and_submitter_fields() {
        let grievance = owned_grievance();

        let value = serde_json::to_value(TrackResponse::from(grievance))
            .unwrap_or_else(|_| unreachable!());

        assert!(value.get("status").is_some());
        assert!(value.get("title").is_none());
        assert!(value.get("description").is_none());
        assert!(value.get("owner_id").is_none());
    }
}
