//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables, progress bars, and due-date hints.

pub mod bill;
pub mod category;
pub mod expense;
pub mod goal;
pub mod report;

pub use bill::{format_bill_details, format_bill_list};
pub use category::{format_category_details, format_category_list};
pub use expense::{format_expense_details, format_expense_list};
pub use goal::{format_goal_details, format_goal_list};
