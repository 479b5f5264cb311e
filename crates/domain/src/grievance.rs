//! Grievance entity and its classification enumerations.
//!
//! Status, priority, and the SLA deadline only move through the mutation
//! methods on [`Grievance`]; repositories rehydrate rows through
//! [`Grievance::from_storage`] without re-running submission validation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use redress_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::ids::{GrievanceId, UserId};
use crate::sla;
use crate::tracking::TrackingId;

/// Grievance category chosen by the submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Coursework, grading, and examination matters.
    Academic,
    /// Fees, records, and administrative processes.
    Administrative,
    /// Campus facilities and services.
    Infrastructure,
    /// Safety or time-critical matters.
    Urgent,
}

impl Category {
    /// Returns the stable storage value for this category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Administrative => "administrative",
            Self::Infrastructure => "infrastructure",
            Self::Urgent => "urgent",
        }
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "academic" => Ok(Self::Academic),
            "administrative" => Ok(Self::Administrative),
            "infrastructure" => Ok(Self::Infrastructure),
            "urgent" => Ok(Self::Urgent),
            _ => Err(AppError::Validation(format!(
                "unknown grievance category '{value}'"
            ))),
        }
    }
}

/// Resolution priority, either derived from the category at submission or
/// set explicitly by an administrator afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Longest resolution window.
    Low,
    /// Default resolution window.
    Medium,
    /// Shortened resolution window.
    High,
    /// Shortest resolution window.
    Critical,
}

impl Priority {
    /// Returns the default priority for a grievance category.
    #[must_use]
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Urgent => Self::Critical,
            Category::Academic => Self::High,
            Category::Infrastructure => Self::Medium,
            Category::Administrative => Self::Low,
        }
    }

    /// Returns the stable storage value for this priority.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(AppError::Validation(format!(
                "unknown grievance priority '{value}'"
            ))),
        }
    }
}

/// Lifecycle status of a grievance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Received, not yet triaged.
    Submitted,
    /// Being triaged by staff.
    UnderReview,
    /// Handed to a responsible staff member.
    Assigned,
    /// Actively being worked.
    InProgress,
    /// Resolution recorded.
    Resolved,
    /// Closed, with or without resolution.
    Closed,
}

impl Status {
    /// Returns the stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    /// Returns whether this status ends the active lifecycle.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

impl FromStr for Status {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "submitted" => Ok(Self::Submitted),
            "under_review" => Ok(Self::UnderReview),
            "assigned" => Ok(Self::Assigned),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            _ => Err(AppError::Validation(format!(
                "unknown grievance status '{value}'"
            ))),
        }
    }
}

/// The central grievance entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grievance {
    id: GrievanceId,
    tracking_id: TrackingId,
    owner: Option<UserId>,
    anonymous: bool,
    confidential: bool,
    category: Category,
    priority: Priority,
    status: Status,
    title: NonEmptyString,
    description: NonEmptyString,
    sla_deadline: Option<DateTime<Utc>>,
    resolved_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Grievance {
    /// Creates a freshly submitted grievance.
    ///
    /// Priority is derived from the category and the SLA deadline from that
    /// priority and the submission instant.
    #[allow(clippy::too_many_arguments)]
    pub fn submit(
        tracking_id: TrackingId,
        owner: Option<UserId>,
        anonymous: bool,
        confidential: bool,
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        if anonymous && owner.is_some() {
            return Err(AppError::Validation(
                "anonymous grievances must not carry an owner".to_owned(),
            ));
        }
        if !anonymous && owner.is_none() {
            return Err(AppError::Validation(
                "non-anonymous grievances require a submitting user".to_owned(),
            ));
        }

        let priority = Priority::for_category(category);

        Ok(Self {
            id: GrievanceId::new(),
            tracking_id,
            owner,
            anonymous,
            confidential,
            category,
            priority,
            status: Status::Submitted,
            title: NonEmptyString::new(title)?,
            description: NonEmptyString::new(description)?,
            sla_deadline: Some(sla::deadline(priority, submitted_at)),
            resolved_at: None,
            created_at: submitted_at,
            updated_at: submitted_at,
        })
    }

    /// Rehydrates a grievance from persisted fields.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn from_storage(
        id: GrievanceId,
        tracking_id: TrackingId,
        owner: Option<UserId>,
        anonymous: bool,
        confidential: bool,
        category: Category,
        priority: Priority,
        status: Status,
        title: NonEmptyString,
        description: NonEmptyString,
        sla_deadline: Option<DateTime<Utc>>,
        resolved_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            tracking_id,
            owner,
            anonymous,
            confidential,
            category,
            priority,
            status,
            title,
            description,
            sla_deadline,
            resolved_at,
            created_at,
            updated_at,
        }
    }

    /// Applies a status change at the given instant.
    ///
    /// The resolution timestamp is stamped the first time the grievance
    /// enters a terminal status and never moves afterwards.
    pub fn apply_status(&mut self, new_status: Status, changed_at: DateTime<Utc>) {
        self.status = new_status;
        if new_status.is_terminal() && self.resolved_at.is_none() {
            self.resolved_at = Some(changed_at);
        }
        self.updated_at = changed_at;
    }

    /// Applies a priority change at the given instant.
    ///
    /// The SLA deadline is re-anchored at the change time, not the original
    /// submission time.
    pub fn apply_priority(&mut self, new_priority: Priority, changed_at: DateTime<Utc>) {
        self.priority = new_priority;
        self.sla_deadline = Some(sla::deadline(new_priority, changed_at));
        self.updated_at = changed_at;
    }

    /// Returns the internal identifier.
    #[must_use]
    pub fn id(&self) -> GrievanceId {
        self.id
    }

    /// Returns the public tracking identifier.
    #[must_use]
    pub fn tracking_id(&self) -> &TrackingId {
        &self.tracking_id
    }

    /// Returns the submitting user, absent for anonymous submissions.
    #[must_use]
    pub fn owner(&self) -> Option<UserId> {
        self.owner
    }

    /// Returns whether the grievance was submitted anonymously.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    /// Returns whether staff visibility is restricted to administrators.
    #[must_use]
    pub fn is_confidential(&self) -> bool {
        self.confidential
    }

    /// Returns the classification category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the current priority.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the grievance title.
    #[must_use]
    pub fn title(&self) -> &NonEmptyString {
        &self.title
    }

    /// Returns the grievance description.
    #[must_use]
    pub fn description(&self) -> &NonEmptyString {
        &self.description
    }

    /// Returns the SLA resolution deadline, when one is set.
    #[must_use]
    pub fn sla_deadline(&self) -> Option<DateTime<Utc>> {
        self.sla_deadline
    }

    /// Returns the first instant the grievance entered a terminal status.
    #[must_use]
    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }

    /// Returns the submission instant.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last mutation instant.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the grievance is still awaiting resolution.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Returns whether the grievance is pending past its SLA deadline.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_pending()
            && self
                .sla_deadline
                .is_some_and(|deadline| deadline < now)
    }
}
