use chrono::{DateTime, Utc};
use redress_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::ids::{CommentId, GrievanceId, UserId};

/// An append-only timeline entry on a grievance.
///
/// Comments are a separate stream: appending one does not move the parent
/// grievance's update timestamp. Internal comments are never shown to the
/// submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    grievance_id: GrievanceId,
    author: UserId,
    body: NonEmptyString,
    internal: bool,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment.
    pub fn new(
        grievance_id: GrievanceId,
        author: UserId,
        body: impl Into<String>,
        internal: bool,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: CommentId::new(),
            grievance_id,
            author,
            body: NonEmptyString::new(body)?,
            internal,
            created_at,
        })
    }

    /// Rehydrates a comment from persisted fields.
    #[must_use]
    pub fn from_storage(
        id: CommentId,
        grievance_id: GrievanceId,
        author: UserId,
        body: NonEmptyString,
        internal: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            grievance_id,
            author,
            body,
            internal,
            created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the grievance this comment belongs to.
    #[must_use]
    pub fn grievance_id(&self) -> GrievanceId {
        self.grievance_id
    }

    /// Returns the comment author.
    #[must_use]
    pub fn author(&self) -> UserId {
        self.author
    }

    /// Returns the comment text.
    #[must_use]
    pub fn body(&self) -> &NonEmptyString {
        &self.body
    }

    /// Returns whether the comment is staff-only.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.internal
    }

    /// Returns when the comment was appended.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
