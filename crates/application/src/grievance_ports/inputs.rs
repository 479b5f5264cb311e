use chrono::{DateTime, Utc};

use redress_domain::{Category, GrievanceId, Role, UserId};

/// Input for submitting a grievance.
#[derive(Debug, Clone)]
pub struct SubmitGrievanceInput {
    /// Classification category; priority and SLA deadline derive from it.
    pub category: Category,
    /// Short summary line.
    pub title: String,
    /// Full description of the grievance.
    pub description: String,
    /// Whether the submitter withholds their identity.
    pub anonymous: bool,
    /// Whether staff visibility is restricted to administrators.
    pub confidential: bool,
}

/// Input for recording an assignment.
#[derive(Debug, Clone)]
pub struct AssignGrievanceInput {
    /// Grievance being assigned.
    pub grievance_id: GrievanceId,
    /// Staff member taking responsibility.
    pub assignee: UserId,
    /// Optional handover note.
    pub note: Option<String>,
    /// Optional working deadline, distinct from the SLA deadline.
    pub due_at: Option<DateTime<Utc>>,
}

/// Input for appending a comment.
#[derive(Debug, Clone)]
pub struct AddCommentInput {
    /// Grievance being commented on.
    pub grievance_id: GrievanceId,
    /// Comment text.
    pub body: String,
    /// Staff-only visibility flag.
    pub internal: bool,
}

/// Input for attaching an uploaded file.
#[derive(Debug, Clone)]
pub struct AttachFileInput {
    /// Grievance the file belongs to.
    pub grievance_id: GrievanceId,
    /// Original file name.
    pub file_name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Raw uploaded bytes, handed to the file-storage collaborator.
    pub bytes: Vec<u8>,
}

/// Input for registering a user record.
#[derive(Debug, Clone)]
pub struct NewUserInput {
    /// Identity-provider subject claim.
    pub subject: String,
    /// Display name.
    pub display_name: String,
    /// Email address.
    pub email: String,
    /// Role determining capabilities.
    pub role: Role,
    /// Optional department.
    pub department: Option<String>,
}
