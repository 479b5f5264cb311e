//! Domain entities and invariants for grievance tracking.

#![forbid(unsafe_code)]

mod actor;
mod assignment;
mod attachment;
mod capability;
mod comment;
mod grievance;
mod ids;
mod notification;
pub mod sla;
mod tracking;
mod user;

pub use actor::Actor;
pub use assignment::Assignment;
pub use attachment::Attachment;
pub use capability::Capability;
pub use comment::Comment;
pub use grievance::{Category, Grievance, Priority, Status};
pub use ids::{AssignmentId, AttachmentId, CommentId, GrievanceId, NotificationId, UserId};
pub use notification::Notification;
pub use tracking::TrackingId;
pub use user::{EmailAddress, Role, User};
