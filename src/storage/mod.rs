//! Storage layer for Outlay
//!
//! Provides JSON file storage with atomic writes and automatic
//! directory creation.

pub mod bills;
pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod goals;
pub mod init;
pub mod recurring;

pub use bills::BillRepository;
pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use goals::GoalRepository;
pub use init::{initialize_storage, needs_initialization};
pub use recurring::RecurringRepository;

use crate::config::paths::OutlayPaths;
use crate::error::OutlayError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: OutlayPaths,
    pub expenses: ExpenseRepository,
    pub categories: CategoryRepository,
    pub bills: BillRepository,
    pub goals: GoalRepository,
    pub recurring: RecurringRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: OutlayPaths) -> Result<Self, OutlayError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            bills: BillRepository::new(paths.bills_file()),
            goals: GoalRepository::new(paths.goals_file()),
            recurring: RecurringRepository::new(paths.recurring_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &OutlayPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), OutlayError> {
        self.expenses.load()?;
        self.categories.load()?;
        self.bills.load()?;
        self.goals.load()?;
        self.recurring.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), OutlayError> {
        self.expenses.save()?;
        self.categories.save()?;
        self.bills.save()?;
        self.goals.save()?;
        self.recurring.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OutlayPaths::with_base_dir(temp_dir.path().to_path_buf());
        let _storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
    }
}
