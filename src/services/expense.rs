//! Expense service
//!
//! Provides business logic for expense management including CRUD operations,
//! filtering, and sorting.

use chrono::{NaiveDate, Utc};

use crate::error::{OutlayError, OutlayResult};
use crate::models::{CategoryId, Expense, ExpenseId, Money};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Field to sort expense listings by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    Amount,
}

/// Direction to sort expense listings in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Case-insensitive match against title and notes
    pub search: Option<String>,
    /// Filter by category
    pub category_id: Option<CategoryId>,
    /// Filter by date range start
    pub start_date: Option<NaiveDate>,
    /// Filter by date range end
    pub end_date: Option<NaiveDate>,
    /// Field to sort by
    pub sort: SortField,
    /// Sort direction
    pub direction: SortDirection,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by search text
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Filter by category
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Filter by date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Sort by a field
    pub fn sort_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort = field;
        self.direction = direction;
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub title: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub category_id: Option<CategoryId>,
    pub currency: Option<String>,
    pub notes: Option<String>,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new expense
    pub fn create(&self, input: CreateExpenseInput) -> OutlayResult<Expense> {
        // Verify category exists if provided
        if let Some(cat_id) = input.category_id {
            self.storage
                .categories
                .get(cat_id)?
                .ok_or_else(|| OutlayError::category_not_found(cat_id.to_string()))?;
        }

        let mut expense = Expense::new(input.title.trim(), input.amount, input.date);
        expense.category_id = input.category_id;

        if let Some(currency) = input.currency {
            expense.currency = currency.trim().to_uppercase();
        }

        if let Some(notes) = input.notes {
            expense.notes = notes;
        }

        // Validate
        expense
            .validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;

        // Save
        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> OutlayResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by title, full ID, or shortened ID as printed
    ///
    /// Titles are not unique; when several match, the most recent one
    /// is returned.
    pub fn find(&self, identifier: &str) -> OutlayResult<Option<Expense>> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            if let Some(expense) = self.storage.expenses.get(id)? {
                return Ok(Some(expense));
            }
        }

        let mut matches: Vec<Expense> = self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .filter(|e| {
                e.id.to_string() == identifier || e.title.eq_ignore_ascii_case(identifier)
            })
            .collect();

        matches.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(matches.into_iter().next())
    }

    /// List expenses with optional filtering
    pub fn list(&self, filter: ExpenseFilter) -> OutlayResult<Vec<Expense>> {
        let mut expenses = if let Some(category_id) = filter.category_id {
            self.storage.expenses.get_by_category(category_id)?
        } else if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            self.storage.expenses.get_by_date_range(start, end)?
        } else {
            self.storage.expenses.get_all()?
        };

        // Apply additional filters
        if let Some(start) = filter.start_date {
            expenses.retain(|e| e.date >= start);
        }
        if let Some(end) = filter.end_date {
            expenses.retain(|e| e.date <= end);
        }
        if let Some(query) = &filter.search {
            let query = query.to_lowercase();
            expenses.retain(|e| {
                e.title.to_lowercase().contains(&query) || e.notes.to_lowercase().contains(&query)
            });
        }

        // Sort
        match filter.sort {
            SortField::Date => {
                expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)))
            }
            SortField::Amount => expenses.sort_by(|a, b| a.amount.cents().cmp(&b.amount.cents())),
        }
        if filter.direction == SortDirection::Desc {
            expenses.reverse();
        }

        // Apply limit
        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }

        Ok(expenses)
    }

    /// Update an expense
    pub fn update(
        &self,
        id: ExpenseId,
        title: Option<String>,
        amount: Option<Money>,
        date: Option<NaiveDate>,
        category_id: Option<Option<CategoryId>>,
        notes: Option<String>,
    ) -> OutlayResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| OutlayError::expense_not_found(id.to_string()))?;

        // Apply updates
        if let Some(new_title) = title {
            expense.title = new_title.trim().to_string();
        }

        if let Some(new_amount) = amount {
            expense.amount = new_amount;
        }

        if let Some(new_date) = date {
            expense.date = new_date;
        }

        // category_id: Option<Option<CategoryId>>
        // - None: no change
        // - Some(None): clear category
        // - Some(Some(id)): set category
        if let Some(new_cat_id) = category_id {
            if let Some(cat_id) = new_cat_id {
                // Verify category exists
                self.storage
                    .categories
                    .get(cat_id)?
                    .ok_or_else(|| OutlayError::category_not_found(cat_id.to_string()))?;
            }
            expense.category_id = new_cat_id;
        }

        if let Some(new_notes) = notes {
            expense.notes = new_notes;
        }

        expense.updated_at = Utc::now();

        // Validate
        expense
            .validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;

        // Save
        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        Ok(expense)
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> OutlayResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| OutlayError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        Ok(expense)
    }

    /// Count expenses
    pub fn count(&self) -> OutlayResult<usize> {
        self.storage.expenses.count()
    }
}
