mod conversions;
mod types;

pub use types::{
    AddCommentRequest, AssignRequest, AssignmentResponse, AttachmentResponse, CommentResponse,
    GrievanceResponse, HealthResponse, NotificationResponse, RegisterUserRequest,
    SetPriorityRequest, SetStatusRequest, SubmitGrievanceRequest, TrackResponse,
    UnreadCountResponse, UserResponse,
};
