//! Persistence and storage adapters.

#![forbid(unsafe_code)]

mod in_memory_assignment_repository;
mod in_memory_attachment_repository;
mod in_memory_comment_repository;
mod in_memory_grievance_repository;
mod in_memory_notification_repository;
mod in_memory_user_repository;
mod local_file_storage;
mod postgres_assignment_repository;
mod postgres_attachment_repository;
mod postgres_comment_repository;
mod postgres_grievance_repository;
mod postgres_notification_repository;
mod postgres_user_repository;

pub use in_memory_assignment_repository::InMemoryAssignmentRepository;
pub use in_memory_attachment_repository::InMemoryAttachmentRepository;
pub use in_memory_comment_repository::InMemoryCommentRepository;
pub use in_memory_grievance_repository::InMemoryGrievanceRepository;
pub use in_memory_notification_repository::InMemoryNotificationRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use local_file_storage::LocalFileStorage;
pub use postgres_assignment_repository::PostgresAssignmentRepository;
pub use postgres_attachment_repository::PostgresAttachmentRepository;
pub use postgres_comment_repository::PostgresCommentRepository;
pub use postgres_grievance_repository::PostgresGrievanceRepository;
pub use postgres_notification_repository::PostgresNotificationRepository;
pub use postgres_user_repository::PostgresUserRepository;
