use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::placement::{NewPlacementRequest, Placement},
    errors::AppError,
    placement_stats::PlacementStats,
    repositories::placement::PlacementRepository,
};

#[derive(Clone)]
pub struct PlacementHandler {
    pub placement_repo: Arc<dyn PlacementRepository>,
}

impl PlacementHandler {
    pub fn new(placement_repo: Arc<dyn PlacementRepository>) -> Self {
        PlacementHandler { placement_repo }
    }

    pub async fn list_placements(&self) -> Result<Vec<Placement>, AppError> {
        self.placement_repo.list_placements().await
    }

    pub async fn record_placement(&self, request: NewPlacementRequest, created_by: &Uuid) -> Result<Placement, AppError> {
        request.validate()?;
        self.placement_repo.create_placement(&request.prepare_for_insert(*created_by)).await
    }

    /// Charts are folded in record order (oldest first) so company and
    /// branch rows appear in the order they were first recorded.
    pub async fn stats(&self) -> Result<PlacementStats, AppError> {
        let mut placements = self.placement_repo.list_placements().await?;
        placements.reverse();
        Ok(PlacementStats::from_records(&placements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::placement::MockPlacementRepository;
    use chrono::{Duration, Utc};

    #[actix_rt::test]
    async fn stats_follow_recording_order() {
        let now = Utc::now();
        let record = |company: &str, count: i32, age_minutes: i64| Placement {
            id: Uuid::new_v4(),
            company_name: company.into(),
            students_placed: count,
            year: 2024,
            branch: "CSE".into(),
            created_by: Uuid::new_v4(),
            created_at: now - Duration::minutes(age_minutes),
        };
        // Newest first, as the repository lists them
        let listed = vec![record("Infosys", 10, 1), record("Google", 5, 2)];

        let mut repo = MockPlacementRepository::new();
        repo.expect_list_placements().returning(move || Ok(listed.clone()));

        let stats = PlacementHandler::new(Arc::new(repo)).stats().await.unwrap();
        assert_eq!(stats.company_wise[0].company_name, "Google");
        assert_eq!(stats.total_students, 15);
    }
}
