//! Expense model
//!
//! The core record: a single spend with a title, amount, date, and an
//! optional category. Amounts are never negative; refunds are handled by
//! deleting or editing the expense rather than entering negative records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;

fn default_currency() -> String {
    "USD".to_string()
}

/// A single expense record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Short description ("Weekly groceries")
    pub title: String,

    /// Amount spent (non-negative)
    pub amount: Money,

    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Category this expense belongs to, if any. The id may point at a
    /// category that has since been deleted; reports degrade such ids to a
    /// placeholder rather than failing.
    pub category_id: Option<CategoryId>,

    /// Date the expense occurred
    pub date: NaiveDate,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense with defaults for the optional fields
    pub fn new(title: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            title: title.into(),
            amount,
            currency: default_currency(),
            category_id: None,
            date,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new expense with all fields specified
    pub fn with_details(
        title: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category_id: Option<CategoryId>,
        currency: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        let mut expense = Self::new(title, amount, date);
        expense.category_id = category_id;
        expense.currency = currency.into();
        expense.notes = notes.into();
        expense
    }

    /// Refresh the modification timestamp after an edit
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.title.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyTitle);
        }

        if self.title.len() > 100 {
            return Err(ExpenseValidationError::TitleTooLong(self.title.len()));
        }

        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount);
        }

        if !is_currency_code(&self.currency) {
            return Err(ExpenseValidationError::InvalidCurrency(
                self.currency.clone(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.amount, self.title)
    }
}

/// Check for a three-letter uppercase currency code
pub fn is_currency_code(s: &str) -> bool {
    s.len() == 3 && s.chars().all(|c| c.is_ascii_uppercase())
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyTitle,
    TitleTooLong(usize),
    NegativeAmount,
    InvalidCurrency(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Expense title cannot be empty"),
            Self::TitleTooLong(len) => {
                write!(f, "Expense title too long ({} chars, max 100)", len)
            }
            Self::NegativeAmount => write!(f, "Expense amount cannot be negative"),
            Self::InvalidCurrency(code) => {
                write!(f, "Invalid currency code '{}': expected e.g. USD", code)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_expense() {
        let expense = Expense::new("Coffee", Money::from_cents(450), date(2025, 6, 18));
        assert_eq!(expense.title, "Coffee");
        assert_eq!(expense.amount.cents(), 450);
        assert_eq!(expense.currency, "USD");
        assert!(expense.category_id.is_none());
        assert!(expense.notes.is_empty());
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_with_details() {
        let category_id = CategoryId::new();
        let expense = Expense::with_details(
            "Groceries",
            Money::from_cents(5230),
            date(2025, 6, 15),
            Some(category_id),
            "EUR",
            "weekly shop",
        );
        assert_eq!(expense.category_id, Some(category_id));
        assert_eq!(expense.currency, "EUR");
        assert_eq!(expense.notes, "weekly shop");
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut expense = Expense::new("Valid", Money::from_cents(100), date(2025, 1, 1));
        assert!(expense.validate().is_ok());

        expense.title = "  ".to_string();
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyTitle));

        expense.title = "x".repeat(101);
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::TitleTooLong(_))
        ));

        expense.title = "Valid".to_string();
        expense.amount = Money::from_cents(-1);
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::NegativeAmount)
        );

        expense.amount = Money::from_cents(1);
        expense.currency = "usd".to_string();
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::InvalidCurrency(_))
        ));
    }

    #[test]
    fn test_zero_amount_is_valid() {
        let expense = Expense::new("Free sample", Money::zero(), date(2025, 1, 1));
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_serialization_defaults() {
        // Records written before the currency field existed deserialize
        // with the default code
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "title": "Lunch",
            "amount": 1250,
            "category_id": null,
            "date": "2025-06-01",
            "created_at": "2025-06-01T12:00:00Z",
            "updated_at": "2025-06-01T12:00:00Z"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.currency, "USD");
        assert!(expense.notes.is_empty());
    }

    #[test]
    fn test_display() {
        let expense = Expense::new("Coffee", Money::from_cents(450), date(2025, 6, 18));
        assert_eq!(expense.to_string(), "2025-06-18 $4.50 Coffee");
    }
}
