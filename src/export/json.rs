//! JSON Export functionality
//!
//! Exports the complete database to JSON format with schema versioning.

use crate::error::OutlayResult;
use crate::models::{Bill, Category, Expense, RecurringExpense, SavingsGoal};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All categories
    pub categories: Vec<Category>,

    /// All expenses
    pub expenses: Vec<Expense>,

    /// All bills
    pub bills: Vec<Bill>,

    /// All savings goals
    pub goals: Vec<SavingsGoal>,

    /// All recurring expense definitions
    pub recurring: Vec<RecurringExpense>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Total number of expenses
    pub expense_count: usize,

    /// Total number of categories
    pub category_count: usize,

    /// Total number of bills
    pub bill_count: usize,

    /// Total number of goals
    pub goal_count: usize,

    /// Total number of recurring definitions
    pub recurring_count: usize,

    /// Date range of expenses (earliest)
    pub earliest_expense: Option<String>,

    /// Date range of expenses (latest)
    pub latest_expense: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> OutlayResult<Self> {
        let categories = storage.categories.get_all()?;
        let expenses = storage.expenses.get_all()?;
        let bills = storage.bills.get_all()?;
        let goals = storage.goals.get_all()?;
        let recurring = storage.recurring.get_all()?;

        // Calculate metadata
        let earliest_expense = expenses
            .iter()
            .map(|e| e.date)
            .min()
            .map(|d| d.to_string());

        let latest_expense = expenses
            .iter()
            .map(|e| e.date)
            .max()
            .map(|d| d.to_string());

        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            category_count: categories.len(),
            bill_count: bills.len(),
            goal_count: goals.len(),
            recurring_count: recurring.len(),
            earliest_expense,
            latest_expense,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories,
            expenses,
            bills,
            goals,
            recurring,
            metadata,
        })
    }

    /// Validate the export structure
    ///
    /// Category references are not checked: expenses may legitimately
    /// point at deleted categories and render under "Unknown".
    pub fn validate(&self) -> Result<(), String> {
        // Check schema version
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        for category in &self.categories {
            category
                .validate()
                .map_err(|e| format!("Category {}: {}", category.id, e))?;
        }

        for expense in &self.expenses {
            expense
                .validate()
                .map_err(|e| format!("Expense {}: {}", expense.id, e))?;
        }

        for bill in &self.bills {
            bill.validate()
                .map_err(|e| format!("Bill {}: {}", bill.id, e))?;
        }

        for goal in &self.goals {
            goal.validate()
                .map_err(|e| format!("Goal {}: {}", goal.id, e))?;
        }

        for def in &self.recurring {
            def.validate()
                .map_err(|e| format!("Recurring expense {}: {}", def.id, e))?;
        }

        Ok(())
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> OutlayResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a JSON export (for verification/restore)
pub fn import_from_json(json_str: &str) -> OutlayResult<FullExport> {
    let export: FullExport = serde_json::from_str(json_str)
        .map_err(|e| crate::error::OutlayError::Import(e.to_string()))?;

    // Validate the import
    export
        .validate()
        .map_err(crate::error::OutlayError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::OutlayPaths;
    use crate::models::Money;
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
    fn test_full_export() {
        let (_temp_dir, storage) = create_test_storage();

        // Create test data
        let category = Category::new("Groceries", "#0088FE");
        storage.categories.upsert(category.clone()).unwrap();
        storage.categories.save().unwrap();

        let mut expense = Expense::new(
            "Weekly shop",
            Money::from_cents(5000),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        );
        expense.category_id = Some(category.id);
        storage.expenses.upsert(expense).unwrap();

        let bill = Bill::new(
            "Rent",
            Money::from_cents(120000),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        );
        storage.bills.upsert(bill).unwrap();

        // Export
        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.categories.len(), 1);
        assert_eq!(export.expenses.len(), 1);
        assert_eq!(export.bills.len(), 1);
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();

        // Create test data
        let category = Category::new("Groceries", "#0088FE");
        storage.categories.upsert(category).unwrap();
        storage.categories.save().unwrap();

        let expense = Expense::new(
            "Coffee",
            Money::from_cents(450),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        );
        storage.expenses.upsert(expense).unwrap();

        // Export to JSON
        let mut json_output = Vec::new();
        export_full_json(&storage, &mut json_output, true).unwrap();

        let json_string = String::from_utf8(json_output).unwrap();

        // Import back
        let imported = import_from_json(&json_string).unwrap();

        assert_eq!(imported.expenses.len(), 1);
        assert_eq!(imported.expenses[0].title, "Coffee");
    }

    #[test]
    fn test_export_with_dangling_category_still_validates() {
        let (_temp_dir, storage) = create_test_storage();

        let mut expense = Expense::new(
            "Orphaned",
            Money::from_cents(1000),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        );
        expense.category_id = Some(crate::models::CategoryId::new());
        storage.expenses.upsert(expense).unwrap();

        let export = FullExport::from_storage(&storage).unwrap();
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_metadata() {
        let (_temp_dir, storage) = create_test_storage();

        // Create expenses across a date range
        for day in 1..=3 {
            let expense = Expense::new(
                format!("Expense {}", day),
                Money::from_cents(1000),
                NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            );
            storage.expenses.upsert(expense).unwrap();
        }

        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.metadata.expense_count, 3);
        assert_eq!(export.metadata.bill_count, 0);
        assert_eq!(
            export.metadata.earliest_expense.as_deref(),
            Some("2025-01-01")
        );
        assert_eq!(
            export.metadata.latest_expense.as_deref(),
            Some("2025-01-03")
        );
    }
}
