//! Recurring expense service
//!
//! Applies recurring definitions on demand. Application is best-effort:
//! each run creates at most one expense per due definition, dated to the
//! run's reference date. Runs that never happen are simply skipped, there
//! is no catch-up for missed intervals.

use chrono::NaiveDate;

use crate::error::{OutlayError, OutlayResult};
use crate::models::{CategoryId, Expense, Frequency, Money, RecurringExpense, RecurringId};
use crate::storage::Storage;

/// Service for recurring expense definitions
pub struct RecurringService<'a> {
    storage: &'a Storage,
}

impl<'a> RecurringService<'a> {
    /// Create a new recurring service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new recurring definition
    pub fn create(
        &self,
        title: &str,
        amount: Money,
        frequency: Frequency,
        category_id: Option<CategoryId>,
    ) -> OutlayResult<RecurringExpense> {
        // Verify category exists if provided
        if let Some(cat_id) = category_id {
            self.storage
                .categories
                .get(cat_id)?
                .ok_or_else(|| OutlayError::category_not_found(cat_id.to_string()))?;
        }

        let mut def = RecurringExpense::new(title.trim(), amount, frequency);
        def.category_id = category_id;

        def.validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;

        self.storage.recurring.upsert(def.clone())?;
        self.storage.recurring.save()?;

        Ok(def)
    }

    /// Find a definition by title, full ID, or shortened ID as printed
    pub fn find(&self, identifier: &str) -> OutlayResult<Option<RecurringExpense>> {
        if let Some(def) = self.storage.recurring.get_by_title(identifier)? {
            return Ok(Some(def));
        }

        if let Ok(id) = identifier.parse::<RecurringId>() {
            if let Some(def) = self.storage.recurring.get(id)? {
                return Ok(Some(def));
            }
        }

        let defs = self.storage.recurring.get_all()?;
        Ok(defs.into_iter().find(|r| r.id.to_string() == identifier))
    }

    /// List all definitions in creation order
    pub fn list(&self) -> OutlayResult<Vec<RecurringExpense>> {
        self.storage.recurring.get_all()
    }

    /// Delete a definition
    ///
    /// Expenses already created from it are left untouched.
    pub fn delete(&self, id: RecurringId) -> OutlayResult<RecurringExpense> {
        let def = self
            .storage
            .recurring
            .get(id)?
            .ok_or_else(|| OutlayError::recurring_not_found(id.to_string()))?;

        self.storage.recurring.delete(id)?;
        self.storage.recurring.save()?;

        Ok(def)
    }

    /// Apply all definitions that are due as of `now`
    ///
    /// Each due definition produces one expense dated `now` and gets its
    /// last-applied date stamped to `now`. Definitions pointing at a
    /// deleted category still apply; the dashboard shows those expenses
    /// under "Unknown". Returns the expenses that were created.
    pub fn apply_due(&self, now: NaiveDate) -> OutlayResult<Vec<Expense>> {
        let mut applied = Vec::new();

        for mut def in self.storage.recurring.get_all()? {
            if !def.is_due(now) {
                continue;
            }

            let mut expense = Expense::new(&def.title, def.amount, now);
            expense.category_id = def.category_id;
            expense.currency = def.currency.clone();

            self.storage.expenses.upsert(expense.clone())?;
            applied.push(expense);

            def.mark_applied(now);
            self.storage.recurring.upsert(def)?;
        }

        if !applied.is_empty() {
            self.storage.expenses.save()?;
            self.storage.recurring.save()?;
        }

        Ok(applied)
    }

    /// Count definitions
    pub fn count(&self) -> OutlayResult<usize> {
        self.storage.recurring.count()
    }
}
