//! User identity, roles, and profile fields.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use redress_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Role held by a user. Determines visibility and mutation rights over
/// grievances via the capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Submits and tracks own grievances.
    Student,
    /// Staff-level triage rights.
    Faculty,
    /// Staff-level triage rights.
    Staff,
    /// Full rights, including confidential grievances and priorities.
    Administrator,
}

impl Role {
    /// Returns the stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Staff => "staff",
            Self::Administrator => "administrator",
        }
    }

    /// Returns whether the role carries staff-level triage rights.
    #[must_use]
    pub fn is_staff_level(&self) -> bool {
        matches!(self, Self::Faculty | Self::Staff | Self::Administrator)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "student" => Ok(Self::Student),
            "faculty" => Ok(Self::Faculty),
            "staff" => Ok(Self::Staff),
            "administrator" => Ok(Self::Administrator),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one
    /// `@`, local part and domain are non-empty, domain contains a `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let parts: Vec<&str> = trimmed.splitn(2, '@').collect();
        if parts.len() != 2 {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if parts[0].is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if parts[1].is_empty() || !parts[1].contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// A registered user of the grievance service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    subject: NonEmptyString,
    display_name: NonEmptyString,
    email: EmailAddress,
    role: Role,
    department: Option<String>,
    created_at: DateTime<Utc>,
}

impl User {
    /// Creates a validated user record.
    pub fn new(
        id: UserId,
        subject: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        department: Option<String>,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let department = department.and_then(|value| {
            let trimmed = value.trim().to_owned();
            (!trimmed.is_empty()).then_some(trimmed)
        });

        Ok(Self {
            id,
            subject: NonEmptyString::new(subject)?,
            display_name: NonEmptyString::new(display_name)?,
            email: EmailAddress::new(email)?,
            role,
            department,
            created_at,
        })
    }

    /// Returns the internal user identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the stable subject claim from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &NonEmptyString {
        &self.subject
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &NonEmptyString {
        &self.display_name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the user's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the user's department, if recorded.
    #[must_use]
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// Returns the registration instant.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
