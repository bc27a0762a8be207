//! Export module for Outlay
//!
//! Provides complete data export functionality in multiple formats:
//! - CSV: For expense, bill, and goal data (spreadsheet-compatible)
//! - JSON: For machine-readable full database export
//! - YAML: For human-readable full database export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_bills_csv, export_expenses_csv, export_goals_csv};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
