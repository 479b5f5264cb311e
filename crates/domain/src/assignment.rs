use chrono::{DateTime, Utc};
use redress_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::ids::{AssignmentId, GrievanceId, UserId};

/// A link from a grievance to a responsible staff member.
///
/// Assignments are cumulative history: reassignment appends a new row and
/// never removes or supersedes earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    id: AssignmentId,
    grievance_id: GrievanceId,
    assignee: UserId,
    assigned_by: UserId,
    note: Option<String>,
    due_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl Assignment {
    /// Creates a new assignment record.
    pub fn new(
        grievance_id: GrievanceId,
        assignee: UserId,
        assigned_by: UserId,
        note: Option<String>,
        due_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let note = note.and_then(|value| {
            let trimmed = value.trim().to_owned();
            (!trimmed.is_empty()).then_some(trimmed)
        });

        Ok(Self {
            id: AssignmentId::new(),
            grievance_id,
            assignee,
            assigned_by,
            note,
            due_at,
            created_at,
        })
    }

    /// Rehydrates an assignment from persisted fields.
    #[must_use]
    pub fn from_storage(
        id: AssignmentId,
        grievance_id: GrievanceId,
        assignee: UserId,
        assigned_by: UserId,
        note: Option<String>,
        due_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            grievance_id,
            assignee,
            assigned_by,
            note,
            due_at,
            created_at,
        }
    }

    /// Returns the assignment identifier.
    #[must_use]
    pub fn id(&self) -> AssignmentId {
        self.id
    }

    /// Returns the grievance this assignment belongs to.
    #[must_use]
    pub fn grievance_id(&self) -> GrievanceId {
        self.grievance_id
    }

    /// Returns the staff member responsible.
    #[must_use]
    pub fn assignee(&self) -> UserId {
        self.assignee
    }

    /// Returns who recorded the assignment.
    #[must_use]
    pub fn assigned_by(&self) -> UserId {
        self.assigned_by
    }

    /// Returns the optional handover note.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the working deadline, distinct from the SLA deadline.
    #[must_use]
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns when the assignment was recorded.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
