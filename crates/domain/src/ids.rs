use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID value.
            #[must_use]
            pub fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            /// Returns the underlying UUID value.
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a grievance record.
    GrievanceId
);
uuid_id!(
    /// Unique identifier for a user record.
    UserId
);
uuid_id!(
    /// Unique identifier for an assignment record.
    AssignmentId
);
uuid_id!(
    /// Unique identifier for a comment record.
    CommentId
);
uuid_id!(
    /// Unique identifier for an attachment record.
    AttachmentId
);
uuid_id!(
    /// Unique identifier for a notification record.
    NotificationId
);

#[cfg(test)]
mod tests {
    use super::GrievanceId;

    #[test]
    fn grievance_id_formats_as_uuid() {
        let id = GrievanceId::new();
        assert_eq!(id.to_string().len(), 36);
    }
}
