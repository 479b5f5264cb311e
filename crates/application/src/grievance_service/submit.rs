use chrono::Utc;

use redress_core::{AppError, AppResult};
use redress_domain::{Grievance, Notification, TrackingId};

use crate::grievance_ports::SubmitGrievanceInput;

use super::GrievanceService;

/// Tracking-id regeneration bound. At 40 bits of entropy a collision is
/// effectively unreachable; exhaustion surfaces as a conflict.
const MAX_TRACKING_ID_ATTEMPTS: usize = 5;

impl GrievanceService {
    /// Submits a new grievance.
    ///
    /// Priority is resolved from the category, the SLA deadline from that
    /// priority and the submission instant, and a fresh tracking id is
    /// generated (regenerating on the rare collision). Owned submissions
    /// notify the owner; anonymous ones carry no owner to notify.
    pub async fn submit(
        &self,
        actor: Option<&redress_domain::Actor>,
        input: SubmitGrievanceInput,
    ) -> AppResult<Grievance> {
        let now = Utc::now();
        let owner = if input.anonymous {
            None
        } else {
            let actor = actor.ok_or_else(|| {
                AppError::Unauthorized(
                    "non-anonymous submissions require an authenticated user".to_owned(),
                )
            })?;
            Some(actor.user_id())
        };

        let mut last_conflict = None;
        for _ in 0..MAX_TRACKING_ID_ATTEMPTS {
            let grievance = Grievance::submit(
                TrackingId::generate()?,
                owner,
                input.anonymous,
                input.confidential,
                input.category,
                input.title.clone(),
                input.description.clone(),
                now,
            )?;

            match self.grievances.create(grievance.clone()).await {
                Ok(()) => {
                    if let Some(owner) = grievance.owner() {
                        let notification = Notification::new(
                            owner,
                            Some(grievance.id()),
                            "Grievance submitted",
                            format!(
                                "Your grievance {} has been received and is awaiting review.",
                                grievance.tracking_id()
                            ),
                            now,
                        )?;
                        self.notifications.create(notification).await?;
                    }

                    return Ok(grievance);
                }
                Err(AppError::Conflict(message)) => {
                    last_conflict = Some(message);
                }
                Err(error) => return Err(error),
            }
        }

        Err(AppError::Conflict(last_conflict.unwrap_or_else(|| {
            "tracking id generation exhausted retries".to_owned()
        })))
    }
}
