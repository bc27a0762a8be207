//! Service layer for Outlay
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, computed fields, and cross-entity operations.

pub mod bill;
pub mod category;
pub mod expense;
pub mod goal;
pub mod import;
pub mod recurring;

pub use bill::{BillService, CreateBillInput};
pub use category::CategoryService;
pub use expense::{CreateExpenseInput, ExpenseFilter, ExpenseService, SortDirection, SortField};
pub use goal::GoalService;
pub use import::{ColumnMapping, ImportResult, ImportService};
pub use recurring::RecurringService;
