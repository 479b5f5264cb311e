use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use redress_application::AssignmentRepository;
use redress_core::AppResult;
use redress_domain::{Assignment, AssignmentId, GrievanceId};

/// In-memory assignment repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryAssignmentRepository {
    assignments: RwLock<HashMap<AssignmentId, Assignment>>,
}

impl InMemoryAssignmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            assignments: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn create(&self, assignment: Assignment) -> AppResult<()> {
        self.assignments
            .write()
            .await
            .insert(assignment.id(), assignment);
        Ok(())
    }

    async fn list_for_grievance(&self, grievance_id: GrievanceId) -> AppResult<Vec<Assignment>> {
        let assignments = self.assignments.read().await;

        let mut listed: Vec<Assignment> = assignments
            .values()
            .filter(|assignment| assignment.grievance_id() == grievance_id)
            .cloned()
            .collect();
        listed.sort_by(|left, right| left.created_at().cmp(&right.created_at()));

        Ok(listed)
    }
}
