use async_trait::async_trait;

use redress_core::AppResult;

/// Port for the file-storage collaborator.
///
/// Accepts raw upload bytes and returns the storage path the core persists
/// alongside the attachment metadata.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores the bytes and returns the issued storage path.
    async fn store(&self, file_name: &str, bytes: &[u8]) -> AppResult<String>;
}
