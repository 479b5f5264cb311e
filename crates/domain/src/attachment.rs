use chrono::{DateTime, Utc};
use redress_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::ids::{AttachmentId, GrievanceId, UserId};

/// Metadata for a file uploaded against a grievance.
///
/// The raw bytes live with the file-storage collaborator; only the returned
/// storage path is persisted here. The uploader is absent for anonymous
/// submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    id: AttachmentId,
    grievance_id: GrievanceId,
    uploader: Option<UserId>,
    file_name: NonEmptyString,
    content_type: NonEmptyString,
    size_bytes: u64,
    storage_path: NonEmptyString,
    created_at: DateTime<Utc>,
}

impl Attachment {
    /// Creates a new attachment metadata record.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        grievance_id: GrievanceId,
        uploader: Option<UserId>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        size_bytes: u64,
        storage_path: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        if size_bytes == 0 {
            return Err(AppError::Validation(
                "attachment must not be empty".to_owned(),
            ));
        }

        Ok(Self {
            id: AttachmentId::new(),
            grievance_id,
            uploader,
            file_name: NonEmptyString::new(file_name)?,
            content_type: NonEmptyString::new(content_type)?,
            size_bytes,
            storage_path: NonEmptyString::new(storage_path)?,
            created_at,
        })
    }

    /// Rehydrates an attachment from persisted fields.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn from_storage(
        id: AttachmentId,
        grievance_id: GrievanceId,
        uploader: Option<UserId>,
        file_name: NonEmptyString,
        content_type: NonEmptyString,
        size_bytes: u64,
        storage_path: NonEmptyString,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            grievance_id,
            uploader,
            file_name,
            content_type,
            size_bytes,
            storage_path,
            created_at,
        }
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the grievance this attachment belongs to.
    #[must_use]
    pub fn grievance_id(&self) -> GrievanceId {
        self.grievance_id
    }

    /// Returns the uploader, absent for anonymous submissions.
    #[must_use]
    pub fn uploader(&self) -> Option<UserId> {
        self.uploader
    }

    /// Returns the original file name.
    #[must_use]
    pub fn file_name(&self) -> &NonEmptyString {
        &self.file_name
    }

    /// Returns the declared MIME type.
    #[must_use]
    pub fn content_type(&self) -> &NonEmptyString {
        &self.content_type
    }

    /// Returns the upload size in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Returns the path issued by the file-storage collaborator.
    #[must_use]
    pub fn storage_path(&self) -> &NonEmptyString {
        &self.storage_path
    }

    /// Returns when the attachment was recorded.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
