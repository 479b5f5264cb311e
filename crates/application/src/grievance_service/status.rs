use chrono::Utc;

use redress_core::{AppError, AppResult};
use redress_domain::{Actor, Capability, Grievance, GrievanceId, Notification, Priority, Status};

use super::{GrievanceService, require};

impl GrievanceService {
    /// Moves a grievance to a new lifecycle status.
    ///
    /// Staff-level capability. The resolution timestamp is stamped the
    /// first time the grievance enters a terminal status and never moves
    /// on re-resolution. The owner is notified unless the submission was
    /// anonymous.
    pub async fn set_status(
        &self,
        actor: &Actor,
        id: GrievanceId,
        new_status: Status,
    ) -> AppResult<Grievance> {
        require(actor, Capability::UpdateStatus)?;

        let mut grievance = self.find_required(id).await?;
        let expected_updated_at = grievance.updated_at();
        grievance.apply_status(new_status, Utc::now());
        self.grievances
            .update(&grievance, expected_updated_at)
            .await?;

        if let Some(owner) = grievance.owner() {
            let notification = Notification::new(
                owner,
                Some(grievance.id()),
                "Grievance status updated",
                format!(
                    "Your grievance {} is now {}.",
                    grievance.tracking_id(),
                    new_status.as_str()
                ),
                grievance.updated_at(),
            )?;
            self.notifications.create(notification).await?;
        }

        Ok(grievance)
    }

    /// Overrides the priority of a grievance.
    ///
    /// Administrator capability. The SLA deadline is recomputed from the
    /// new priority and the change instant, superseding the deadline
    /// derived at submission.
    pub async fn set_priority(
        &self,
        actor: &Actor,
        id: GrievanceId,
        new_priority: Priority,
    ) -> AppResult<Grievance> {
        require(actor, Capability::SetPriority)?;

        let mut grievance = self.find_required(id).await?;
        let expected_updated_at = grievance.updated_at();
        grievance.apply_priority(new_priority, Utc::now());
        self.grievances
            .update(&grievance, expected_updated_at)
            .await?;

        if let Some(owner) = grievance.owner() {
            let notification = Notification::new(
                owner,
                Some(grievance.id()),
                "Grievance priority updated",
                format!(
                    "Your grievance {} has been reprioritized to {}.",
                    grievance.tracking_id(),
                    new_priority.as_str()
                ),
                grievance.updated_at(),
            )?;
            self.notifications.create(notification).await?;
        }

        Ok(grievance)
    }

    pub(super) async fn find_required(&self, id: GrievanceId) -> AppResult<Grievance> {
        self.grievances
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("grievance '{id}' does not exist")))
    }
}
