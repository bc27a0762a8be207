//! Savings goal service
//!
//! Provides business logic for goal management and contributions.

use chrono::{NaiveDate, Utc};

use crate::error::{OutlayError, OutlayResult};
use crate::models::{GoalId, Money, SavingsGoal};
use crate::storage::Storage;

/// Service for savings goal management
pub struct GoalService<'a> {
    storage: &'a Storage,
}

impl<'a> GoalService<'a> {
    /// Create a new goal service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new savings goal
    pub fn create(
        &self,
        title: &str,
        target: Money,
        deadline: Option<NaiveDate>,
        color: Option<&str>,
    ) -> OutlayResult<SavingsGoal> {
        let mut goal = SavingsGoal::new(title.trim(), target);
        goal.deadline = deadline;

        if let Some(color) = color {
            goal.color = color.to_string();
        }

        goal.validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        Ok(goal)
    }

    /// Get a goal by ID
    pub fn get(&self, id: GoalId) -> OutlayResult<Option<SavingsGoal>> {
        self.storage.goals.get(id)
    }

    /// Find a goal by title, full ID, or shortened ID as printed
    pub fn find(&self, identifier: &str) -> OutlayResult<Option<SavingsGoal>> {
        if let Some(goal) = self.storage.goals.get_by_title(identifier)? {
            return Ok(Some(goal));
        }

        if let Ok(id) = identifier.parse::<GoalId>() {
            if let Some(goal) = self.storage.goals.get(id)? {
                return Ok(Some(goal));
            }
        }

        let goals = self.storage.goals.get_all()?;
        Ok(goals.into_iter().find(|g| g.id.to_string() == identifier))
    }

    /// List all goals in creation order
    pub fn list(&self) -> OutlayResult<Vec<SavingsGoal>> {
        self.storage.goals.get_all()
    }

    /// Add a contribution to a goal
    ///
    /// Contributions past the target are allowed; progress just reads
    /// over 100%.
    pub fn contribute(&self, id: GoalId, amount: Money) -> OutlayResult<SavingsGoal> {
        if amount.cents() <= 0 {
            return Err(OutlayError::Validation(
                "Contribution amount must be positive".into(),
            ));
        }

        let mut goal = self
            .storage
            .goals
            .get(id)?
            .ok_or_else(|| OutlayError::goal_not_found(id.to_string()))?;

        goal.contribute(amount);

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        Ok(goal)
    }

    /// Update a goal
    pub fn update(
        &self,
        id: GoalId,
        title: Option<String>,
        target: Option<Money>,
        deadline: Option<Option<NaiveDate>>,
        color: Option<String>,
    ) -> OutlayResult<SavingsGoal> {
        let mut goal = self
            .storage
            .goals
            .get(id)?
            .ok_or_else(|| OutlayError::goal_not_found(id.to_string()))?;

        if let Some(new_title) = title {
            goal.title = new_title.trim().to_string();
        }

        if let Some(new_target) = target {
            goal.target_amount = new_target;
        }

        if let Some(new_deadline) = deadline {
            goal.deadline = new_deadline;
        }

        if let Some(new_color) = color {
            goal.color = new_color;
        }

        goal.updated_at = Utc::now();

        goal.validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        Ok(goal)
    }

    /// Delete a goal
    pub fn delete(&self, id: GoalId) -> OutlayResult<SavingsGoal> {
        let goal = self
            .storage
            .goals
            .get(id)?
            .ok_or_else(|| OutlayError::goal_not_found(id.to_string()))?;

        self.storage.goals.delete(id)?;
        self.storage.goals.save()?;

        Ok(goal)
    }

    /// Count goals
    pub fn count(&self) -> OutlayResult<usize> {
        self.storage.goals.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::OutlayPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = OutlayPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_goal() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);

        let goal = service
            .create("Vacation", Money::from_cents(100000), None, None)
            .unwrap();

        assert_eq!(goal.target_amount.cents(), 100000);
        assert_eq!(goal.current_amount.cents(), 0);
    }

    #[test]
    fn test_create_rejects_zero_target() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);

        let result = service.create("Vacation", Money::from_cents(0), None, None);
        assert!(matches!(result, Err(OutlayError::Validation(_))));
    }

    #[test]
    fn test_contribute_past_target() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);

        let goal = service
            .create("Vacation", Money::from_cents(10000), None, None)
            .unwrap();

        let updated = service
            .contribute(goal.id, Money::from_cents(15000))
            .unwrap();

        assert_eq!(updated.current_amount.cents(), 15000);
        assert!(updated.is_reached());
        assert!((updated.progress_percent() - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_contribute_rejects_non_positive() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);

        let goal = service
            .create("Vacation", Money::from_cents(10000), None, None)
            .unwrap();

        let result = service.contribute(goal.id, Money::from_cents(0));
        assert!(matches!(result, Err(OutlayError::Validation(_))));
    }

    #[test]
    fn test_delete_goal() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);

        let goal = service
            .create("Vacation", Money::from_cents(10000), None, None)
            .unwrap();
        assert_eq!(service.count().unwrap(), 1);

        service.delete(goal.id).unwrap();
        assert_eq!(service.count().unwrap(), 0);
    }
}
