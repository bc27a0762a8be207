//! Savings goal repository for JSON storage
//!
//! Manages loading and saving goals to goals.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::OutlayError;
use crate::models::{GoalId, SavingsGoal};

use super::file_io::{read_json, write_json_atomic};

/// Serializable goal data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GoalData {
    goals: Vec<SavingsGoal>,
}

/// Repository for savings goal persistence
pub struct GoalRepository {
    path: PathBuf,
    data: RwLock<HashMap<GoalId, SavingsGoal>>,
}

impl GoalRepository {
    /// Create a new goal repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load goals from disk
    pub fn load(&self) -> Result<(), OutlayError> {
        let file_data: GoalData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for goal in file_data.goals {
            data.insert(goal.id, goal);
        }

        Ok(())
    }

    /// Save goals to disk
    pub fn save(&self) -> Result<(), OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut goals: Vec<_> = data.values().cloned().collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let file_data = GoalData { goals };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a goal by ID
    pub fn get(&self, id: GoalId) -> Result<Option<SavingsGoal>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all goals in creation order (the dashboard shows the first few)
    pub fn get_all(&self) -> Result<Vec<SavingsGoal>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut goals: Vec<_> = data.values().cloned().collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(goals)
    }

    /// Get a goal by title (case-insensitive)
    pub fn get_by_title(&self, title: &str) -> Result<Option<SavingsGoal>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|g| g.title.eq_ignore_ascii_case(title))
            .cloned())
    }

    /// Insert or update a goal
    pub fn upsert(&self, goal: SavingsGoal) -> Result<(), OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(goal.id, goal);
        Ok(())
    }

    /// Delete a goal
    pub fn delete(&self, id: GoalId) -> Result<bool, OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count goals
    pub fn count(&self) -> Result<usize, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, GoalRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("goals.json");
        let repo = GoalRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_get_all_in_creation_order() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(SavingsGoal::new("First", Money::from_cents(10000)))
            .unwrap();
        repo.upsert(SavingsGoal::new("Second", Money::from_cents(20000)))
            .unwrap();
        repo.upsert(SavingsGoal::new("Third", Money::from_cents(30000)))
            .unwrap();

        let all = repo.get_all().unwrap();
        let titles: Vec<_> = all.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_get_by_title() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(SavingsGoal::new("Vacation", Money::from_cents(100000)))
            .unwrap();

        assert!(repo.get_by_title("vacation").unwrap().is_some());
        assert!(repo.get_by_title("Boat").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload_preserves_progress() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let mut goal = SavingsGoal::new("Laptop", Money::from_cents(150000));
        goal.contribute(Money::from_cents(50000));
        let id = goal.id;
        repo.upsert(goal).unwrap();
        repo.save().unwrap();

        let repo2 = GoalRepository::new(temp_dir.path().join("goals.json"));
        repo2.load().unwrap();
        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded.current_amount.cents(), 50000);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let goal = SavingsGoal::new("Bike", Money::from_cents(40000));
        let id = goal.id;
        repo.upsert(goal).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
    }
}
