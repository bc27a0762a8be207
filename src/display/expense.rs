//! Expense display formatting
//!
//! Provides utilities for formatting expenses for terminal display,
//! including list views and detail views.

use std::collections::HashMap;

use crate::models::{Category, CategoryId, Expense, UNKNOWN_CATEGORY_NAME};

/// Format a single expense for display (list row)
pub fn format_expense_row(expense: &Expense, category_name: &str) -> String {
    format!(
        "{} {:25} {:15} {:>12}",
        expense.date.format("%Y-%m-%d"),
        truncate(&expense.title, 25),
        truncate(category_name, 15),
        expense.amount.to_string()
    )
}

/// Format a list of expenses as a table
pub fn format_expense_list(expenses: &[Expense], categories: &[Category]) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:25} {:15} {:>12}\n",
        "Date", "Title", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(66));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, &resolve_name(expense, &names)));
        output.push('\n');
    }

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, category_name: Option<&str>) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.id));
    output.push_str(&format!("  Title:    {}\n", expense.title));
    output.push_str(&format!("  Amount:   {}\n", expense.amount));
    output.push_str(&format!(
        "  Date:     {}\n",
        expense.date.format("%Y-%m-%d")
    ));

    match (category_name, expense.category_id) {
        (Some(name), _) => output.push_str(&format!("  Category: {}\n", name)),
        (None, Some(_)) => output.push_str(&format!("  Category: {}\n", UNKNOWN_CATEGORY_NAME)),
        (None, None) => output.push_str("  Category: (uncategorized)\n"),
    }

    if expense.currency != "USD" {
        output.push_str(&format!("  Currency: {}\n", expense.currency));
    }

    if !expense.notes.is_empty() {
        output.push_str(&format!("  Notes:    {}\n", expense.notes));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        expense.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

fn resolve_name(expense: &Expense, names: &HashMap<CategoryId, &str>) -> String {
    match expense.category_id {
        Some(id) => names
            .get(&id)
            .map(|name| name.to_string())
            .unwrap_or_else(|| UNKNOWN_CATEGORY_NAME.to_string()),
        None => "-".to_string(),
    }
}

/// Truncate a string to a maximum length
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
