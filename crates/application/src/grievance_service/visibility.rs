use redress_core::{AppError, AppResult};
use redress_domain::{Actor, Capability, Grievance, GrievanceId, TrackingId};

use super::GrievanceService;

/// The visibility rule, enforced at read time rather than stored as state:
/// a grievance is visible to its owner, to staff-level users when not
/// confidential, and to administrators unconditionally.
fn can_view(actor: &Actor, grievance: &Grievance) -> bool {
    if grievance.owner() == Some(actor.user_id()) {
        return true;
    }

    if grievance.is_confidential() {
        return actor.role().allows(Capability::ViewConfidential);
    }

    actor.role().allows(Capability::ViewAllGrievances)
}

impl GrievanceService {
    /// Returns a grievance by internal identifier.
    ///
    /// A visibility violation yields `Forbidden` rather than `NotFound`,
    /// so "forbidden" and "does not exist" stay distinguishable.
    pub async fn get(&self, actor: &Actor, id: GrievanceId) -> AppResult<Grievance> {
        let grievance = self.find_required(id).await?;
        if !can_view(actor, &grievance) {
            return Err(AppError::Forbidden(
                "not permitted to view this grievance".to_owned(),
            ));
        }

        Ok(grievance)
    }

    /// Anonymous lookup by public tracking identifier. No authentication;
    /// the caller is expected to expose only a redacted view.
    pub async fn track(&self, tracking_id: &TrackingId) -> AppResult<Grievance> {
        self.grievances
            .find_by_tracking_id(tracking_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("no grievance with tracking id '{tracking_id}'"))
            })
    }

    /// Lists the grievances visible to the caller, newest first.
    ///
    /// Students see their own submissions; staff-level roles see everything
    /// the visibility rule grants them.
    pub async fn list_for(&self, actor: &Actor) -> AppResult<Vec<Grievance>> {
        if !actor.role().allows(Capability::ViewAllGrievances) {
            return self.grievances.list_by_owner(actor.user_id()).await;
        }

        let grievances = self.grievances.list_all().await?;
        Ok(grievances
            .into_iter()
            .filter(|grievance| can_view(actor, grievance))
            .collect())
    }
}
