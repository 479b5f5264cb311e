use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub postgres: &'static str,
}

/// API representation of a grievance.
#[derive(Debug, Serialize)]
pub struct GrievanceResponse {
    pub id: Uuid,
    pub tracking_id: String,
    pub owner_id: Option<Uuid>,
    pub anonymous: bool,
    pub confidential: bool,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub title: String,
    pub description: String,
    pub sla_deadline: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public tracking view of a grievance. Carries lifecycle fields only;
/// title and description stay behind the authenticated surface.
#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub tracking_id: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub sla_deadline: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// API representation of an assignment record.
#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub grievance_id: Uuid,
    pub assignee_id: Uuid,
    pub assigned_by: Uuid,
    pub note: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// API representation of a comment.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub grievance_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub internal: bool,
    pub created_at: DateTime<Utc>,
}

/// API representation of attachment metadata. The storage path is
/// server-internal and never leaves the API.
#[derive(Debug, Serialize)]
pub struct AttachmentResponse {
    pub id: Uuid,
    pub grievance_id: Uuid,
    pub uploader_id: Option<Uuid>,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

/// API representation of a notification.
#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub grievance_id: Option<Uuid>,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Unread-count payload for the notification badge.
#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub unread: u64,
}

/// API representation of a user record.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub subject: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Grievance submission request.
#[derive(Debug, Deserialize)]
pub struct SubmitGrievanceRequest {
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub anonymous: bool,
    #[serde(default)]
    pub confidential: bool,
}

/// Status transition request.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// Priority override request.
#[derive(Debug, Deserialize)]
pub struct SetPriorityRequest {
    pub priority: String,
}

/// Assignment request.
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub assignee_id: Uuid,
    pub note: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
}

/// Comment request.
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub body: String,
    #[serde(default)]
    pub internal: bool,
}

/// User registration request, administrator-only.
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub subject: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub department: Option<String>,
}
