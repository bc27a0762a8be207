//! Category service
//!
//! Provides business logic for category management including CRUD
//! operations and palette color assignment.

use crate::error::{OutlayError, OutlayResult};
use crate::models::{Category, CategoryId, CATEGORY_PALETTE};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    ///
    /// When no color is given, one is picked by cycling through the
    /// chart palette.
    pub fn create(&self, name: &str, color: Option<&str>) -> OutlayResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(OutlayError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        // Check for duplicate name
        if self.storage.categories.get_by_name(name)?.is_some() {
            return Err(OutlayError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let color = match color {
            Some(c) => c.to_string(),
            None => {
                let count = self.storage.categories.count()?;
                CATEGORY_PALETTE[count % CATEGORY_PALETTE.len()].to_string()
            }
        };

        let category = Category::new(name, &color);

        category
            .validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        Ok(category)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> OutlayResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name, full ID, or shortened ID as printed
    pub fn find(&self, identifier: &str) -> OutlayResult<Option<Category>> {
        // Try by name first
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        // Try parsing as ID
        if let Ok(id) = identifier.parse::<CategoryId>() {
            if let Some(category) = self.storage.categories.get(id)? {
                return Ok(Some(category));
            }
        }

        let categories = self.storage.categories.get_all()?;
        Ok(categories
            .into_iter()
            .find(|c| c.id.to_string() == identifier))
    }

    /// List all categories
    pub fn list(&self) -> OutlayResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Update a category's name and/or color
    pub fn update(
        &self,
        id: CategoryId,
        name: Option<&str>,
        color: Option<&str>,
    ) -> OutlayResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| OutlayError::category_not_found(id.to_string()))?;

        if let Some(new_name) = name {
            let new_name = new_name.trim();
            if new_name.is_empty() {
                return Err(OutlayError::Validation(
                    "Category name cannot be empty".into(),
                ));
            }

            // Check for duplicate
            if let Some(existing) = self.storage.categories.get_by_name(new_name)? {
                if existing.id != id {
                    return Err(OutlayError::Duplicate {
                        entity_type: "Category",
                        identifier: new_name.to_string(),
                    });
                }
            }

            category.rename(new_name);
        }

        if let Some(new_color) = color {
            category.set_color(new_color);
        }

        category
            .validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        Ok(category)
    }

    /// Delete a category
    ///
    /// Expenses keep their category reference; reports show them under
    /// "Unknown" from then on. Returns the deleted category and the
    /// number of expenses that still point at it.
    pub fn delete(&self, id: CategoryId) -> OutlayResult<(Category, usize)> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| OutlayError::category_not_found(id.to_string()))?;

        let orphaned = self.storage.expenses.get_by_category(id)?.len();

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        Ok((category, orphaned))
    }

    /// Count categories
    pub fn count(&self) -> OutlayResult<usize> {
        self.storage.categories.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::OutlayPaths;
    use crate::models::{Expense, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = OutlayPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_category_with_palette_color() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let first = service.create("Groceries", None).unwrap();
        let second = service.create("Transport", None).unwrap();

        assert_eq!(first.color, CATEGORY_PALETTE[0]);
        assert_eq!(second.color, CATEGORY_PALETTE[1]);
    }

    #[test]
    fn test_create_duplicate_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.create("Groceries", None).unwrap();
        let result = service.create("groceries", None);

        assert!(matches!(result, Err(OutlayError::Duplicate { .. })));
    }

    #[test]
    fn test_create_rejects_bad_color() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let result = service.create("Groceries", Some("blue"));
        assert!(matches!(result, Err(OutlayError::Validation(_))));
    }

    #[test]
    fn test_find_by_name_or_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let category = service.create("Groceries", None).unwrap();

        assert!(service.find("groceries").unwrap().is_some());
        assert!(service.find(&category.id.to_string()).unwrap().is_some());
        assert!(service.find("Utilities").unwrap().is_none());
    }

    #[test]
    fn test_update_rename_checks_duplicates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.create("Groceries", None).unwrap();
        let other = service.create("Transport", None).unwrap();

        let result = service.update(other.id, Some("Groceries"), None);
        assert!(matches!(result, Err(OutlayError::Duplicate { .. })));

        // Renaming to itself (case change) is fine
        let renamed = service.update(other.id, Some("transport"), None).unwrap();
        assert_eq!(renamed.name, "transport");
    }

    #[test]
    fn test_delete_reports_orphaned_expenses() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let category = service.create("Groceries", None).unwrap();

        let mut expense = Expense::new(
            "Weekly shop",
            Money::from_cents(5000),
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        );
        expense.category_id = Some(category.id);
        storage.expenses.upsert(expense).unwrap();

        let (deleted, orphaned) = service.delete(category.id).unwrap();
        assert_eq!(deleted.name, "Groceries");
        assert_eq!(orphaned, 1);
        assert_eq!(service.count().unwrap(), 0);
    }
}
