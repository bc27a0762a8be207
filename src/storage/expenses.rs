//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::OutlayError;
use crate::models::{CategoryId, Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence with indexing
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: category_id -> expense_ids
    by_category: RwLock<HashMap<CategoryId, Vec<ExpenseId>>>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and build the category index
    pub fn load(&self) -> Result<(), OutlayError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_category.clear();

        for expense in file_data.expenses {
            let id = expense.id;

            if let Some(cat_id) = expense.category_id {
                by_category.entry(cat_id).or_default().push(id);
            }

            data.insert(id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        let file_data = ExpenseData { expenses };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all expenses, newest date first (ties broken by creation time)
    pub fn get_all(&self) -> Result<Vec<Expense>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(expenses)
    }

    /// Get expenses for a category
    pub fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Expense>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_category = self
            .by_category
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_category
            .get(&category_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut expenses: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(expenses)
    }

    /// Get expenses in a date range (both endpoints inclusive)
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, OutlayError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|e| e.date >= start && e.date <= end)
            .collect())
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        // Remove from the old index entry if updating
        if let Some(old) = data.get(&expense.id) {
            if let Some(cat_id) = old.category_id {
                if let Some(ids) = by_category.get_mut(&cat_id) {
                    ids.retain(|&id| id != expense.id);
                }
            }
        }

        if let Some(cat_id) = expense.category_id {
            by_category.entry(cat_id).or_default().push(expense.id);
        }

        data.insert(expense.id, expense);
        Ok(())
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> Result<bool, OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(expense) = data.remove(&id) {
            if let Some(cat_id) = expense.category_id {
                if let Some(ids) = by_category.get_mut(&cat_id) {
                    ids.retain(|&eid| eid != id);
                }
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Count expenses
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

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = ExpenseRepository::new(path);
        (temp_dir, repo)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let expense = Expense::new("Coffee", Money::from_cents(450), date(2025, 1, 15));
        let id = expense.id;

        repo.upsert(expense).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 450);
        assert_eq!(retrieved.title, "Coffee");
    }

    #[test]
    fn test_get_all_sorted_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(Expense::new("Old", Money::from_cents(100), date(2025, 1, 1)))
            .unwrap();
        repo.upsert(Expense::new("New", Money::from_cents(200), date(2025, 1, 20)))
            .unwrap();
        repo.upsert(Expense::new("Mid", Money::from_cents(300), date(2025, 1, 10)))
            .unwrap();

        let all = repo.get_all().unwrap();
        let titles: Vec<_> = all.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn test_get_by_category() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let groceries = CategoryId::new();
        let transport = CategoryId::new();

        let mut a = Expense::new("Shop", Money::from_cents(100), date(2025, 1, 15));
        a.category_id = Some(groceries);
        let mut b = Expense::new("Shop again", Money::from_cents(200), date(2025, 1, 16));
        b.category_id = Some(groceries);
        let mut c = Expense::new("Bus", Money::from_cents(300), date(2025, 1, 15));
        c.category_id = Some(transport);

        repo.upsert(a).unwrap();
        repo.upsert(b).unwrap();
        repo.upsert(c).unwrap();

        assert_eq!(repo.get_by_category(groceries).unwrap().len(), 2);
        assert_eq!(repo.get_by_category(transport).unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_reindexes_category_change() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let groceries = CategoryId::new();
        let dining = CategoryId::new();

        let mut expense = Expense::new("Lunch", Money::from_cents(1200), date(2025, 1, 15));
        expense.category_id = Some(groceries);
        let id = expense.id;
        repo.upsert(expense.clone()).unwrap();

        expense.category_id = Some(dining);
        repo.upsert(expense).unwrap();

        assert!(repo.get_by_category(groceries).unwrap().is_empty());
        let dining_expenses = repo.get_by_category(dining).unwrap();
        assert_eq!(dining_expenses.len(), 1);
        assert_eq!(dining_expenses[0].id, id);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let expense = Expense::new("Coffee", Money::from_cents(450), date(2025, 1, 15));
        let id = expense.id;

        repo.upsert(expense).unwrap();
        repo.save().unwrap();

        // Create new repo and load
        let path = temp_dir.path().join("expenses.json");
        let repo2 = ExpenseRepository::new(path);
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        let retrieved = repo2.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 450);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let groceries = CategoryId::new();
        let mut expense = Expense::new("Shop", Money::from_cents(100), date(2025, 1, 15));
        expense.category_id = Some(groceries);
        let id = expense.id;

        repo.upsert(expense).unwrap();
        assert_eq!(repo.count().unwrap(), 1);

        assert!(repo.delete(id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.get_by_category(groceries).unwrap().is_empty());
        assert!(!repo.delete(id).unwrap());
    }

    #[test]
    fn test_date_range_query() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(Expense::new("A", Money::from_cents(100), date(2025, 1, 10)))
            .unwrap();
        repo.upsert(Expense::new("B", Money::from_cents(200), date(2025, 1, 15)))
            .unwrap();
        repo.upsert(Expense::new("C", Money::from_cents(300), date(2025, 1, 20)))
            .unwrap();

        let range = repo
            .get_by_date_range(date(2025, 1, 12), date(2025, 1, 18))
            .unwrap();

        assert_eq!(range.len(), 1);
        assert_eq!(range[0].title, "B");
    }
}
