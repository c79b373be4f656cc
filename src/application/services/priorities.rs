//! Priority lookups for the task form.

use crate::domain::{Priority, TodoError};
use crate::infrastructure::repositories::PriorityRepository;

#[derive(Clone)]
pub struct PriorityService {
    priorities: PriorityRepository,
}

impl PriorityService {
    #[must_use]
    pub const fn new(priorities: PriorityRepository) -> Self {
        Self { priorities }
    }

    /// All priorities ordered by position, most urgent first.
    pub async fn find_all(&self) -> Vec<Priority> {
        self.priorities.find_all().await
    }

    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] when no priority has the given name.
    pub async fn find_by_name(&self, name: &str) -> Result<Priority, TodoError> {
        self.priorities
            .find_by_name(name)
            .await
            .ok_or_else(|| TodoError::not_found("priority", name))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database;
    use rstest::rstest;

    async fn create_test_service() -> PriorityService {
        let pool = database::connect("sqlite::memory:").await.unwrap();
        database::initialize_schema(&pool).await.unwrap();
        database::seed_reference_data(&pool).await.unwrap();
        PriorityService::new(PriorityRepository::new(pool))
    }

    #[rstest]
    #[tokio::test]
    async fn find_all_is_ordered_by_position() {
        let service = create_test_service().await;

        let names: Vec<String> = service
            .find_all()
            .await
            .into_iter()
            .map(|priority| priority.name)
            .collect();

        assert_eq!(names, vec!["urgently", "normal", "low"]);
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_name_returns_seeded_priority() {
        let service = create_test_service().await;

        let normal = service.find_by_name("normal").await.unwrap();

        assert_eq!(normal.position, 2);
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_name_unknown_is_not_found() {
        let service = create_test_service().await;

        assert!(service.find_by_name("whenever").await.unwrap_err().is_not_found());
    }
}
