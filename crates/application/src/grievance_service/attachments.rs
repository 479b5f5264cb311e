use chrono::Utc;

use redress_core::{AppError, AppResult};
use redress_domain::{Actor, Attachment, GrievanceId};

use crate::grievance_ports::AttachFileInput;

use super::GrievanceService;

impl GrievanceService {
    /// Stores an uploaded file and records its metadata.
    ///
    /// The bytes go to the file-storage collaborator; only the issued
    /// storage path is persisted. The uploader is absent on the anonymous
    /// submission path, and that path only serves anonymous grievances:
    /// owned ones go through the visibility check.
    pub async fn attach_file(
        &self,
        actor: Option<&Actor>,
        input: AttachFileInput,
    ) -> AppResult<Attachment> {
        let grievance = match actor {
            Some(actor) => self.get(actor, input.grievance_id).await?,
            None => {
                let grievance = self.find_required(input.grievance_id).await?;
                if !grievance.is_anonymous() {
                    return Err(AppError::Unauthorized(
                        "authentication required to attach to this grievance".to_owned(),
                    ));
                }
                grievance
            }
        };

        let storage_path = self
            .storage
            .store(input.file_name.as_str(), input.bytes.as_slice())
            .await?;

        let attachment = Attachment::new(
            grievance.id(),
            actor.map(Actor::user_id),
            input.file_name,
            input.content_type,
            input.bytes.len() as u64,
            storage_path,
            Utc::now(),
        )?;
        self.attachments.create(attachment.clone()).await?;

        Ok(attachment)
    }

    /// Lists attachment metadata for a grievance, oldest first.
    pub async fn list_attachments(
        &self,
        actor: &Actor,
        id: GrievanceId,
    ) -> AppResult<Vec<Attachment>> {
        let _ = self.get(actor, id).await?;
        self.attachments.list_for_grievance(id).await
    }
}
