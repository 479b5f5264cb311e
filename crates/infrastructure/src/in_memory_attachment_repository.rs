use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use redress_application::AttachmentRepository;
use redress_core::AppResult;
use redress_domain::{Attachment, AttachmentId, GrievanceId};

/// In-memory attachment metadata repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryAttachmentRepository {
    attachments: RwLock<HashMap<AttachmentId, Attachment>>,
}

impl InMemoryAttachmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attachments: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AttachmentRepository for InMemoryAttachmentRepository {
    async fn create(&self, attachment: Attachment) -> AppResult<()> {
        self.attachments
            .write()
            .await
            .insert(attachment.id(), attachment);
        Ok(())
    }

    async fn list_for_grievance(&self, grievance_id: GrievanceId) -> AppResult<Vec<Attachment>> {
        let attachments = self.attachments.read().await;

        let mut listed: Vec<Attachment> = attachments
            .values()
            .filter(|attachment| attachment.grievance_id() == grievance_id)
            .cloned()
            .collect();
        listed.sort_by(|left, right| left.created_at().cmp(&right.created_at()));

        Ok(listed)
    }
}
