//! Bill service
//!
//! Provides business logic for upcoming bill management.

use chrono::{NaiveDate, Utc};

use crate::error::{OutlayError, OutlayResult};
use crate::models::{Bill, BillId, CategoryId, Money};
use crate::storage::Storage;

/// Service for bill management
pub struct BillService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new bill
#[derive(Debug, Clone)]
pub struct CreateBillInput {
    pub title: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub category_id: Option<CategoryId>,
    pub auto_paid: bool,
}

impl<'a> BillService<'a> {
    /// Create a new bill service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new bill
    pub fn create(&self, input: CreateBillInput) -> OutlayResult<Bill> {
        // Verify category exists if provided
        if let Some(cat_id) = input.category_id {
            self.storage
                .categories
                .get(cat_id)?
                .ok_or_else(|| OutlayError::category_not_found(cat_id.to_string()))?;
        }

        let mut bill = Bill::new(input.title.trim(), input.amount, input.due_date);
        bill.category_id = input.category_id;
        bill.auto_paid = input.auto_paid;

        bill.validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;

        self.storage.bills.upsert(bill.clone())?;
        self.storage.bills.save()?;

        Ok(bill)
    }

    /// Get a bill by ID
    pub fn get(&self, id: BillId) -> OutlayResult<Option<Bill>> {
        self.storage.bills.get(id)
    }

    /// Find a bill by title, full ID, or shortened ID as printed
    pub fn find(&self, identifier: &str) -> OutlayResult<Option<Bill>> {
        if let Some(bill) = self.storage.bills.get_by_title(identifier)? {
            return Ok(Some(bill));
        }

        if let Ok(id) = identifier.parse::<BillId>() {
            if let Some(bill) = self.storage.bills.get(id)? {
                return Ok(Some(bill));
            }
        }

        let bills = self.storage.bills.get_all()?;
        Ok(bills.into_iter().find(|b| b.id.to_string() == identifier))
    }

    /// List all bills ordered by due date
    pub fn list(&self) -> OutlayResult<Vec<Bill>> {
        self.storage.bills.get_all()
    }

    /// List bills due within the given number of days from `now`
    ///
    /// Past-due bills are excluded. The result stays ordered by due date.
    pub fn upcoming(&self, now: NaiveDate, within_days: i64) -> OutlayResult<Vec<Bill>> {
        let bills = self.storage.bills.get_all()?;
        Ok(bills
            .into_iter()
            .filter(|b| b.is_due_within(now, within_days))
            .collect())
    }

    /// Update a bill
    pub fn update(
        &self,
        id: BillId,
        title: Option<String>,
        amount: Option<Money>,
        due_date: Option<NaiveDate>,
        auto_paid: Option<bool>,
        category_id: Option<Option<CategoryId>>,
    ) -> OutlayResult<Bill> {
        let mut bill = self
            .storage
            .bills
            .get(id)?
            .ok_or_else(|| OutlayError::bill_not_found(id.to_string()))?;

        if let Some(new_title) = title {
            bill.title = new_title.trim().to_string();
        }

        if let Some(new_amount) = amount {
            bill.amount = new_amount;
        }

        if let Some(new_due) = due_date {
            bill.due_date = new_due;
        }

        if let Some(new_auto) = auto_paid {
            bill.auto_paid = new_auto;
        }

        if let Some(new_cat_id) = category_id {
            if let Some(cat_id) = new_cat_id {
                self.storage
                    .categories
                    .get(cat_id)?
                    .ok_or_else(|| OutlayError::category_not_found(cat_id.to_string()))?;
            }
            bill.category_id = new_cat_id;
        }

        bill.updated_at = Utc::now();

        bill.validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;

        self.storage.bills.upsert(bill.clone())?;
        self.storage.bills.save()?;

        Ok(bill)
    }

    /// Delete a bill
    pub fn delete(&self, id: BillId) -> OutlayResult<Bill> {
        let bill = self
            .storage
            .bills
            .get(id)?
            .ok_or_else(|| OutlayError::bill_not_found(id.to_string()))?;

        self.storage.bills.delete(id)?;
        self.storage.bills.save()?;

        Ok(bill)
    }

    /// Count bills
    pub fn count(&self) -> OutlayResult<usize> {
        self.storage.bills.count()
    }
}
