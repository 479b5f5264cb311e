use chrono::Utc;

use redress_core::{AppError, AppResult};
use redress_domain::{Actor, Assignment, Capability, GrievanceId, Notification};

use crate::grievance_ports::AssignGrievanceInput;

use super::{GrievanceService, require};

impl GrievanceService {
    /// Records an assignment of a grievance to a staff member.
    ///
    /// Staff-level capability. Assignment history is cumulative: earlier
    /// rows are never removed or superseded. The assignee is notified about
    /// the new work.
    pub async fn assign(
        &self,
        actor: &Actor,
        input: AssignGrievanceInput,
    ) -> AppResult<Assignment> {
        require(actor, Capability::Assign)?;

        let grievance = self.find_required(input.grievance_id).await?;
        let assignee = self
            .users
            .find(input.assignee)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{}' does not exist", input.assignee)))?;
        if !assignee.role().is_staff_level() {
            return Err(AppError::Validation(
                "assignee must hold a staff-level role".to_owned(),
            ));
        }

        let now = Utc::now();
        let assignment = Assignment::new(
            grievance.id(),
            assignee.id(),
            actor.user_id(),
            input.note,
            input.due_at,
            now,
        )?;
        self.assignments.create(assignment.clone()).await?;

        let notification = Notification::new(
            assignee.id(),
            Some(grievance.id()),
            "Grievance assigned to you",
            format!(
                "Grievance {} has been assigned to you by {}.",
                grievance.tracking_id(),
                actor.display_name()
            ),
            now,
        )?;
        self.notifications.create(notification).await?;

        Ok(assignment)
    }

    /// Lists the assignment history of a grievance, oldest first.
    pub async fn list_assignments(
        &self,
        actor: &Actor,
        id: GrievanceId,
    ) -> AppResult<Vec<Assignment>> {
        let _ = self.get(actor, id).await?;
        self.assignments.list_for_grievance(id).await
    }
}
