use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::user::Role;

/// The authenticated caller of a lifecycle or analytics operation.
///
/// Built by the API layer from the identity-provider claims and the stored
/// user record; services only see this resolved form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    user_id: UserId,
    subject: String,
    display_name: String,
    role: Role,
    department: Option<String>,
}

impl Actor {
    /// Creates an actor from a resolved user record.
    #[must_use]
    pub fn new(
        user_id: UserId,
        subject: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
        department: Option<String>,
    ) -> Self {
        Self {
            user_id,
            subject: subject.into(),
            display_name: display_name.into(),
            role,
            department,
        }
    }

    /// Returns the internal user identifier.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the identity-provider subject claim.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the caller's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the caller's department, if recorded.
    #[must_use]
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }
}
