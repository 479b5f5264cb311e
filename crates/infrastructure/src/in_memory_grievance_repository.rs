use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use redress_application::GrievanceRepository;
use redress_core::{AppError, AppResult};
use redress_domain::{Grievance, GrievanceId, TrackingId, UserId};

/// In-memory grievance repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryGrievanceRepository {
    grievances: RwLock<HashMap<GrievanceId, Grievance>>,
}

impl InMemoryGrievanceRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grievances: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl GrievanceRepository for InMemoryGrievanceRepository {
    async fn create(&self, grievance: Grievance) -> AppResult<()> {
        let mut grievances = self.grievances.write().await;

        if grievances
            .values()
            .any(|stored| stored.tracking_id() == grievance.tracking_id())
        {
            return Err(AppError::Conflict(format!(
                "tracking id '{}' is already taken",
                grievance.tracking_id()
            )));
        }

        grievances.insert(grievance.id(), grievance);
        Ok(())
    }

    async fn find(&self, id: GrievanceId) -> AppResult<Option<Grievance>> {
        Ok(self.grievances.read().await.get(&id).cloned())
    }

    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> AppResult<Option<Grievance>> {
        Ok(self
            .grievances
            .read()
            .await
            .values()
            .find(|grievance| grievance.tracking_id() == tracking_id)
            .cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Grievance>> {
        let grievances = self.grievances.read().await;

        let mut listed: Vec<Grievance> = grievances.values().cloned().collect();
        listed.sort_by(|left, right| right.created_at().cmp(&left.created_at()));

        Ok(listed)
    }

    async fn list_by_owner(&self, owner: UserId) -> AppResult<Vec<Grievance>> {
        let grievances = self.grievances.read().await;

        let mut listed: Vec<Grievance> = grievances
            .values()
            .filter(|grievance| grievance.owner() == Some(owner))
            .cloned()
            .collect();
        listed.sort_by(|left, right| right.created_at().cmp(&left.created_at()));

        Ok(listed)
    }

    async fn update(
        &self,
        grievance: &Grievance,
        expected_updated_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut grievances = self.grievances.write().await;

        let Some(stored) = grievances.get_mut(&grievance.id()) else {
            return Err(AppError::NotFound(format!(
                "grievance '{}' does not exist",
                grievance.id()
            )));
        };

        if stored.updated_at() != expected_updated_at {
            return Err(AppError::Conflict(format!(
                "grievance '{}' was modified concurrently",
                grievance.id()
            )));
        }

        *stored = grievance.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use redress_application::GrievanceRepository;
    use redress_core::AppError;
    use redress_domain::{Category, Grievance, TrackingId, UserId};

    use super::InMemoryGrievanceRepository;

    fn sample_grievance() -> Grievance {
        Grievance::submit(
            TrackingId::generate().unwrap_or_else(|_| unreachable!()),
            Some(UserId::new()),
            false,
            false,
            Category::Academic,
            "Grade not published",
            "Final grade for the semester is still missing.",
            Utc::now(),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn duplicate_tracking_id_is_a_conflict() {
        let repository = InMemoryGrievanceRepository::new();
        let first = sample_grievance();
        let second = Grievance::submit(
            first.tracking_id().clone(),
            None,
            true,
            false,
            Category::Infrastructure,
            "Broken bench",
            "Bench outside the library is broken.",
            Utc::now(),
        )
        .unwrap_or_else(|_| unreachable!());

        repository
            .create(first)
            .await
            .unwrap_or_else(|_| unreachable!());
        let result = repository.create(second).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn stale_update_is_rejected() {
        let repository = InMemoryGrievanceRepository::new();
        let grievance = sample_grievance();
        let stale_timestamp = grievance.updated_at() - Duration::seconds(30);

        repository
            .create(grievance.clone())
            .await
            .unwrap_or_else(|_| unreachable!());
        let result = repository.update(&grievance, stale_timestamp).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
