//! Application services and ports for grievance tracking.

#![forbid(unsafe_code)]

mod analytics_service;
mod grievance_ports;
mod grievance_service;
mod notification_service;
mod user_directory_service;

pub use analytics_service::{AnalyticsReport, AnalyticsService, DashboardStats, MonthlyTrend};
pub use grievance_ports::{
    AddCommentInput, AssignGrievanceInput, AssignmentRepository, AttachFileInput,
    AttachmentRepository, CommentRepository, FileStorage, GrievanceRepository, NewUserInput,
    NotificationRepository, SubmitGrievanceInput, UserRepository,
};
pub use grievance_service::GrievanceService;
pub use notification_service::NotificationService;
pub use user_directory_service::UserDirectoryService;
