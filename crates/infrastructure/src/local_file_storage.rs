use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use redress_application::FileStorage;
use redress_core::{AppError, AppResult};

/// Stores uploaded files on the local filesystem under a configured
/// directory. Each file is written under a fresh UUID prefix so upload
/// names cannot collide or escape the directory.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    upload_dir: PathBuf,
}

impl LocalFileStorage {
    /// Creates a storage adapter rooted at the given upload directory.
    #[must_use]
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    fn sanitized(file_name: &str) -> String {
        let base = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(file_name)
            .trim();

        if base.is_empty() || base == "." || base == ".." {
            "upload".to_owned()
        } else {
            base.to_owned()
        }
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> AppResult<String> {
        fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to create upload directory: {error}"))
            })?;

        let stored_name = format!("{}-{}", Uuid::new_v4(), Self::sanitized(file_name));
        let path = self.upload_dir.join(&stored_name);

        fs::write(&path, bytes)
            .await
            .map_err(|error| AppError::Internal(format!("failed to store upload: {error}")))?;

        let path = path.to_string_lossy().into_owned();
        tracing::debug!(%path, size_bytes = bytes.len(), "stored upload");

        Ok(path)
    }
}
