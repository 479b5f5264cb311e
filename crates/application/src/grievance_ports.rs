//! Ports consumed by the grievance lifecycle and analytics services.

mod inputs;
mod repository;
mod storage;

pub use inputs::{
    AddCommentInput, AssignGrievanceInput, AttachFileInput, NewUserInput, SubmitGrievanceInput,
};
pub use repository::{
    AssignmentRepository, AttachmentRepository, CommentRepository, GrievanceRepository,
    NotificationRepository, UserRepository,
};
pub use storage::FileStorage;
