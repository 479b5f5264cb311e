use chrono::Utc;

use redress_core::AppResult;
use redress_domain::{Actor, Capability, Comment, GrievanceId};

use crate::grievance_ports::AddCommentInput;

use super::{GrievanceService, require};

impl GrievanceService {
    /// Appends a comment to a grievance timeline.
    ///
    /// Comments are a separate append-only stream: the grievance's update
    /// timestamp is untouched. Marking a comment internal requires
    /// staff-level rights.
    pub async fn add_comment(&self, actor: &Actor, input: AddCommentInput) -> AppResult<Comment> {
        require(actor, Capability::AddComment)?;
        if input.internal {
            require(actor, Capability::ViewInternalComments)?;
        }

        let grievance = self.get(actor, input.grievance_id).await?;

        let comment = Comment::new(
            grievance.id(),
            actor.user_id(),
            input.body,
            input.internal,
            Utc::now(),
        )?;
        self.comments.create(comment.clone()).await?;

        Ok(comment)
    }

    /// Lists the comment timeline of a grievance, oldest first.
    ///
    /// Internal comments are filtered out for callers without staff-level
    /// rights, so the submitter never sees them.
    pub async fn list_comments(&self, actor: &Actor, id: GrievanceId) -> AppResult<Vec<Comment>> {
        let _ = self.get(actor, id).await?;

        let comments = self.comments.list_for_grievance(id).await?;
        if actor.role().allows(Capability::ViewInternalComments) {
            return Ok(comments);
        }

        Ok(comments
            .into_iter()
            .filter(|comment| !comment.is_internal())
            .collect())
    }
}
