//! Core data models for Outlay
//!
//! This module contains all the data structures that represent the expense
//! tracking domain: expenses, categories, bills, savings goals, recurring
//! definitions, and the reporting period arithmetic.

pub mod bill;
pub mod category;
pub mod expense;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod recurring;

pub use bill::Bill;
pub use category::{
    default_categories, Category, CATEGORY_PALETTE, UNKNOWN_CATEGORY_COLOR, UNKNOWN_CATEGORY_NAME,
};
pub use expense::Expense;
pub use goal::SavingsGoal;
pub use ids::{BillId, CategoryId, ExpenseId, GoalId, RecurringId};
pub use money::Money;
pub use period::{PeriodWindow, ReportingPeriod};
pub use recurring::{Frequency, RecurringExpense};
