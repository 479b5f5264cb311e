pub mod analytics;
pub mod attachments;
pub mod comments;
pub mod grievances;
pub mod health;
pub mod notifications;
pub mod triage;
pub mod users;
