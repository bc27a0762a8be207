//! CSV Export functionality
//!
//! Exports expenses, bills, and goals to CSV format.

use crate::error::OutlayResult;
use crate::models::UNKNOWN_CATEGORY_NAME;
use crate::services::CategoryService;
use crate::storage::Storage;
use std::io::Write;

/// Export all expenses to CSV
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: &mut W) -> OutlayResult<()> {
    let category_service = CategoryService::new(storage);

    // Build lookup
    let categories = category_service.list()?;
    let category_names: std::collections::HashMap<_, _> = categories
        .iter()
        .map(|c| (c.id, c.name.clone()))
        .collect();

    // Write header
    writeln!(writer, "ID,Date,Title,Category,Amount,Currency,Notes")
        .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;

    // Get all expenses
    let expenses = storage.expenses.get_all()?;

    for expense in expenses {
        let category_name = if let Some(cat_id) = expense.category_id {
            category_names
                .get(&cat_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_CATEGORY_NAME.to_string())
        } else {
            "".to_string()
        };

        writeln!(
            writer,
            "{},{},{},{},{:.2},{},{}",
            expense.id,
            expense.date,
            escape_csv(&expense.title),
            escape_csv(&category_name),
            expense.amount.cents() as f64 / 100.0,
            expense.currency,
            escape_csv(&expense.notes)
        )
        .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Export bills to CSV
pub fn export_bills_csv<W: Write>(storage: &Storage, writer: &mut W) -> OutlayResult<()> {
    let category_service = CategoryService::new(storage);

    let categories = category_service.list()?;
    let category_names: std::collections::HashMap<_, _> = categories
        .iter()
        .map(|c| (c.id, c.name.clone()))
        .collect();

    // Write header
    writeln!(writer, "ID,Title,Category,Amount,Due Date,Auto Paid")
        .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;

    for bill in storage.bills.get_all()? {
        let category_name = if let Some(cat_id) = bill.category_id {
            category_names
                .get(&cat_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_CATEGORY_NAME.to_string())
        } else {
            "".to_string()
        };

        writeln!(
            writer,
            "{},{},{},{:.2},{},{}",
            bill.id,
            escape_csv(&bill.title),
            escape_csv(&category_name),
            bill.amount.cents() as f64 / 100.0,
            bill.due_date,
            bill.auto_paid
        )
        .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Export savings goals to CSV
pub fn export_goals_csv<W: Write>(storage: &Storage, writer: &mut W) -> OutlayResult<()> {
    // Write header
    writeln!(writer, "ID,Title,Target,Saved,Percent,Deadline")
        .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;

    for goal in storage.goals.get_all()? {
        let percent = goal.progress_percent();
        let percent_text = if percent.is_finite() {
            format!("{:.2}", percent)
        } else {
            String::new()
        };

        writeln!(
            writer,
            "{},{},{:.2},{:.2},{},{}",
            goal.id,
            escape_csv(&goal.title),
            goal.target_amount.cents() as f64 / 100.0,
            goal.current_amount.cents() as f64 / 100.0,
            percent_text,
            goal.deadline.map(|d| d.to_string()).unwrap_or_default()
        )
        .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Escape a string for CSV format
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
