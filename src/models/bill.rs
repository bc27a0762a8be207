//! Bill model
//!
//! Bills are expected payments with a due date. The dashboard surfaces the
//! ones due within the next 30 days.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BillId, CategoryId};
use super::money::Money;

fn default_currency() -> String {
    "USD".to_string()
}

/// An upcoming or repeating payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    /// Unique identifier
    pub id: BillId,

    /// What the payment is for ("Rent", "Electric")
    pub title: String,

    /// Amount due
    pub amount: Money,

    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Category this bill posts under, if any
    pub category_id: Option<CategoryId>,

    /// Date the payment is due
    pub due_date: NaiveDate,

    /// Whether the payment happens automatically
    #[serde(default)]
    pub auto_paid: bool,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    /// Create a new bill
    pub fn new(title: impl Into<String>, amount: Money, due_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: BillId::new(),
            title: title.into(),
            amount,
            currency: default_currency(),
            category_id: None,
            due_date,
            auto_paid: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whole days from the reference date to the due date (negative when
    /// already past)
    pub fn days_until(&self, now: NaiveDate) -> i64 {
        (self.due_date - now).num_days()
    }

    /// Whether the bill falls due within the next `days` days, counting a
    /// bill due today
    pub fn is_due_within(&self, now: NaiveDate, days: i64) -> bool {
        let until = self.days_until(now);
        (0..=days).contains(&until)
    }

    /// Refresh the modification timestamp after an edit
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the bill
    pub fn validate(&self) -> Result<(), BillValidationError> {
        if self.title.trim().is_empty() {
            return Err(BillValidationError::EmptyTitle);
        }

        if self.title.len() > 100 {
            return Err(BillValidationError::TitleTooLong(self.title.len()));
        }

        if self.amount.is_negative() {
            return Err(BillValidationError::NegativeAmount);
        }

        if !super::expense::is_currency_code(&self.currency) {
            return Err(BillValidationError::InvalidCurrency(self.currency.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} due {} ({})", self.title, self.due_date, self.amount)
    }
}

/// Validation errors for bills
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillValidationError {
    EmptyTitle,
    TitleTooLong(usize),
    NegativeAmount,
    InvalidCurrency(String),
}

impl fmt::Display for BillValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Bill title cannot be empty"),
            Self::TitleTooLong(len) => {
                write!(f, "Bill title too long ({} chars, max 100)", len)
            }
            Self::NegativeAmount => write!(f, "Bill amount cannot be negative"),
            Self::InvalidCurrency(code) => {
                write!(f, "Invalid currency code '{}': expected e.g. USD", code)
            }
        }
    }
}

impl std::error::Error for BillValidationError {}
