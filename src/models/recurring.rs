//! Recurring expense definitions
//!
//! A recurring definition stamps out ordinary expenses on a fixed cadence.
//! Scheduling is best-effort and non-durable: `apply` materializes at most
//! one instance per definition per run, and intervals missed between runs
//! are not back-filled.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, RecurringId};
use super::money::Money;

fn default_currency() -> String {
    "USD".to_string()
}

/// How often a recurring expense fires
///
/// Monthly uses a fixed 30-day interval rather than calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Fixed interval between instances, in days
    pub fn interval_days(&self) -> i64 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
            Self::Monthly => 30,
        }
    }

    /// Parse from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Some(Self::Daily),
            "weekly" | "week" => Some(Self::Weekly),
            "monthly" | "month" => Some(Self::Monthly),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        };
        write!(f, "{}", s)
    }
}

/// A template that materializes expenses on a cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringExpense {
    /// Unique identifier
    pub id: RecurringId,

    /// Title given to materialized expenses
    pub title: String,

    /// Amount of each instance
    pub amount: Money,

    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Category for materialized expenses, if any
    pub category_id: Option<CategoryId>,

    /// Cadence between instances
    pub frequency: Frequency,

    /// Date an instance was last materialized. Advisory only; losing it
    /// just means the next apply fires immediately.
    pub last_applied: Option<NaiveDate>,

    /// When the definition was created
    pub created_at: DateTime<Utc>,

    /// When the definition was last modified
    pub updated_at: DateTime<Utc>,
}

impl RecurringExpense {
    /// Create a new recurring definition
    pub fn new(title: impl Into<String>, amount: Money, frequency: Frequency) -> Self {
        let now = Utc::now();
        Self {
            id: RecurringId::new(),
            title: title.into(),
            amount,
            currency: default_currency(),
            category_id: None,
            frequency,
            last_applied: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the definition should fire on the given date. A definition
    /// that has never fired is always due.
    pub fn is_due(&self, now: NaiveDate) -> bool {
        match self.last_applied {
            None => true,
            Some(last) => (now - last).num_days() >= self.frequency.interval_days(),
        }
    }

    /// Record that an instance was materialized on the given date
    pub fn mark_applied(&mut self, date: NaiveDate) {
        self.last_applied = Some(date);
        self.updated_at = Utc::now();
    }

    /// Validate the definition
    pub fn validate(&self) -> Result<(), RecurringValidationError> {
        if self.title.trim().is_empty() {
            return Err(RecurringValidationError::EmptyTitle);
        }

        if self.title.len() > 100 {
            return Err(RecurringValidationError::TitleTooLong(self.title.len()));
        }

        if self.amount.is_negative() {
            return Err(RecurringValidationError::NegativeAmount);
        }

        if !super::expense::is_currency_code(&self.currency) {
            return Err(RecurringValidationError::InvalidCurrency(
                self.currency.clone(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for RecurringExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.title, self.amount, self.frequency)
    }
}

/// Validation errors for recurring definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurringValidationError {
    EmptyTitle,
    TitleTooLong(usize),
    NegativeAmount,
    InvalidCurrency(String),
}

impl fmt::Display for RecurringValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Recurring expense title cannot be empty"),
            Self::TitleTooLong(len) => {
                write!(f, "Recurring expense title too long ({} chars, max 100)", len)
            }
            Self::NegativeAmount => write!(f, "Recurring expense amount cannot be negative"),
            Self::InvalidCurrency(code) => {
                write!(f, "Invalid currency code '{}': expected e.g. USD", code)
            }
        }
    }
}

impl std::error::Error for RecurringValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_frequency_intervals() {
        assert_eq!(Frequency::Daily.interval_days(), 1);
        assert_eq!(Frequency::Weekly.interval_days(), 7);
        assert_eq!(Frequency::Monthly.interval_days(), 30);
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!(Frequency::parse("monthly"), Some(Frequency::Monthly));
        assert_eq!(Frequency::parse("Week"), Some(Frequency::Weekly));
        assert_eq!(Frequency::parse("fortnightly"), None);
    }

    #[test]
    fn test_never_applied_is_due() {
        let def = RecurringExpense::new("Gym", Money::from_cents(4500), Frequency::Monthly);
        assert!(def.is_due(date(2025, 6, 18)));
    }

    #[test]
    fn test_due_after_interval_elapses() {
        let mut def = RecurringExpense::new("Gym", Money::from_cents(4500), Frequency::Monthly);
        def.mark_applied(date(2025, 6, 1));

        assert!(!def.is_due(date(2025, 6, 18)));
        assert!(!def.is_due(date(2025, 6, 30)));
        assert!(def.is_due(date(2025, 7, 1)));
    }

    #[test]
    fn test_missed_intervals_do_not_accumulate() {
        let mut def = RecurringExpense::new("Gym", Money::from_cents(4500), Frequency::Weekly);
        def.mark_applied(date(2025, 1, 1));

        // Three weeks later it is due exactly once; applying resets the clock
        let now = date(2025, 1, 22);
        assert!(def.is_due(now));
        def.mark_applied(now);
        assert!(!def.is_due(now));
        assert!(!def.is_due(date(2025, 1, 28)));
        assert!(def.is_due(date(2025, 1, 29)));
    }

    #[test]
    fn test_validation() {
        let mut def = RecurringExpense::new("Rent", Money::from_cents(120000), Frequency::Monthly);
        assert!(def.validate().is_ok());

        def.title = String::new();
        assert_eq!(def.validate(), Err(RecurringValidationError::EmptyTitle));
    }

    #[test]
    fn test_serialization() {
        let def = RecurringExpense::new("Streaming", Money::from_cents(1599), Frequency::Monthly);
        let json = serde_json::to_string(&def).unwrap();
        assert!(json.contains("\"monthly\""));
        let deserialized: RecurringExpense = serde_json::from_str(&json).unwrap();
        assert_eq!(def.id, deserialized.id);
        assert!(deserialized.last_applied.is_none());
    }
}
