//! Savings goal model
//!
//! Goals track progress toward a target amount. Progress can exceed 100%;
//! only the rendered bar is capped, the printed percentage is not.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

fn default_currency() -> String {
    "USD".to_string()
}

fn default_goal_color() -> String {
    "#00C49F".to_string()
}

/// A savings target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    /// Unique identifier
    pub id: GoalId,

    /// Goal name ("Emergency fund")
    pub title: String,

    /// Amount to reach
    pub target_amount: Money,

    /// Amount saved so far
    #[serde(default)]
    pub current_amount: Money,

    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Display color for the progress bar
    #[serde(default = "default_goal_color")]
    pub color: String,

    /// Optional target date
    pub deadline: Option<NaiveDate>,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl SavingsGoal {
    /// Create a new goal with nothing saved yet
    pub fn new(title: impl Into<String>, target_amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: GoalId::new(),
            title: title.into(),
            target_amount,
            current_amount: Money::zero(),
            currency: default_currency(),
            color: default_goal_color(),
            deadline: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add to the saved amount
    pub fn contribute(&mut self, amount: Money) {
        self.current_amount += amount;
        self.updated_at = Utc::now();
    }

    /// Progress toward the target as a percentage, unclamped. Returns a
    /// non-finite value when the target is zero; rendering is responsible
    /// for guarding that.
    pub fn progress_percent(&self) -> f64 {
        self.current_amount.cents() as f64 / self.target_amount.cents() as f64 * 100.0
    }

    /// Whether the saved amount has reached the target
    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Validate the goal
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.title.trim().is_empty() {
            return Err(GoalValidationError::EmptyTitle);
        }

        if self.title.len() > 100 {
            return Err(GoalValidationError::TitleTooLong(self.title.len()));
        }

        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }

        if self.current_amount.is_negative() {
            return Err(GoalValidationError::NegativeCurrent);
        }

        if !super::category::is_hex_color(&self.color) {
            return Err(GoalValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for SavingsGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {}",
            self.title, self.current_amount, self.target_amount
        )
    }
}

/// Validation errors for savings goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyTitle,
    TitleTooLong(usize),
    NonPositiveTarget,
    NegativeCurrent,
    InvalidColor(String),
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Goal title cannot be empty"),
            Self::TitleTooLong(len) => {
                write!(f, "Goal title too long ({} chars, max 100)", len)
            }
            Self::NonPositiveTarget => write!(f, "Goal target must be greater than zero"),
            Self::NegativeCurrent => write!(f, "Saved amount cannot be negative"),
            Self::InvalidColor(color) => {
                write!(f, "Invalid color '{}': expected #RRGGBB", color)
            }
        }
    }
}

impl std::error::Error for GoalValidationError {}
