use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use redress_application::CommentRepository;
use redress_core::AppResult;
use redress_domain::{Comment, CommentId, GrievanceId};

/// In-memory comment repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    comments: RwLock<HashMap<CommentId, Comment>>,
}

impl InMemoryCommentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            comments: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: Comment) -> AppResult<()> {
        self.comments.write().await.insert(comment.id(), comment);
        Ok(())
    }

    async fn list_for_grievance(&self, grievance_id: GrievanceId) -> AppResult<Vec<Comment>> {
        let comments = self.comments.read().await;

        let mut listed: Vec<Comment> = comments
            .values()
            .filter(|comment| comment.grievance_id() == grievance_id)
            .cloned()
            .collect();
        listed.sort_by(|left, right| left.created_at().cmp(&right.created_at()));

        Ok(listed)
    }
}
