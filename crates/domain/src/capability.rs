//! The single role-to-capability table.
//!
//! Every lifecycle operation checks roles through [`Role::allows`] instead
//! of re-deriving role membership at each call site.

use serde::{Deserialize, Serialize};

use crate::user::Role;

/// Actions gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Move a grievance through its lifecycle statuses.
    UpdateStatus,
    /// Override the derived priority (and with it the SLA deadline).
    SetPriority,
    /// Record an assignment to a responsible staff member.
    Assign,
    /// Append a comment to a grievance timeline.
    AddComment,
    /// Read comments marked internal.
    ViewInternalComments,
    /// Read grievances beyond one's own submissions.
    ViewAllGrievances,
    /// Read grievances flagged confidential.
    ViewConfidential,
    /// Read the cross-grievance analytics report.
    ViewAnalytics,
}

impl Role {
    /// Returns whether this role may perform the given action.
    #[must_use]
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::AddComment => true,
            Capability::UpdateStatus
            | Capability::Assign
            | Capability::ViewInternalComments
            | Capability::ViewAllGrievances => self.is_staff_level(),
            Capability::SetPriority
            | Capability::ViewConfidential
            | Capability::ViewAnalytics => matches!(self, Self::Administrator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Capability;
    use crate::user::Role;

    #[test]
    fn students_cannot_triage() {
        assert!(!Role::Student.allows(Capability::UpdateStatus));
        assert!(!Role::Student.allows(Capability::Assign));
        assert!(Role::Student.allows(Capability::AddComment));
    }

    #[test]
    fn priority_and_confidentiality_are_administrator_only() {
        for role in [Role::Student, Role::Faculty, Role::Staff] {
            assert!(!role.allows(Capability::SetPriority));
            assert!(!role.allows(Capability::ViewConfidential));
        }
        assert!(Role::Administrator.allows(Capability::SetPriority));
        assert!(Role::Administrator.allows(Capability::ViewConfidential));
    }

    #[test]
    fn staff_level_roles_share_triage_rights() {
        for role in [Role::Faculty, Role::Staff, Role::Administrator] {
            assert!(role.allows(Capability::UpdateStatus));
            assert!(role.allows(Capability::ViewAllGrievances));
            assert!(role.allows(Capability::ViewInternalComments));
        }
    }
}
