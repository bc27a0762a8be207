//! Bill display formatting
//!
//! Formats bills for terminal output with due-date context.

use chrono::NaiveDate;

use crate::models::{Bill, Money};

/// Describe how far away a due date is
pub fn format_due_status(bill: &Bill, now: NaiveDate) -> String {
    match bill.days_until(now) {
        d if d < 0 => format!("overdue by {} days", -d),
        0 => "due today".to_string(),
        1 => "due tomorrow".to_string(),
        d => format!("due in {} days", d),
    }
}

/// Format a list of bills with due dates as a table
pub fn format_bill_list(bills: &[Bill], now: NaiveDate) -> String {
    if bills.is_empty() {
        return "No bills found.".to_string();
    }

    let title_width = bills
        .iter()
        .map(|b| b.title.len())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:10}  {:>12}  {:4}  {}\n",
        "Bill",
        "Due",
        "Amount",
        "Auto",
        "Status",
        width = title_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:-<10}  {:->12}  {:-<4}  {:-<18}\n",
        "",
        "",
        "",
        "",
        "",
        width = title_width
    ));

    for bill in bills {
        output.push_str(&format!(
            "{:<width$}  {}  {:>12}  {:4}  {}\n",
            bill.title,
            bill.due_date.format("%Y-%m-%d"),
            bill.amount.to_string(),
            if bill.auto_paid { "yes" } else { "" },
            format_due_status(bill, now),
            width = title_width
        ));
    }

    let total: Money = bills.iter().map(|b| b.amount).sum();
    output.push_str(&format!(
        "{:-<width$}  {:-<10}  {:->12}\n",
        "",
        "",
        "",
        width = title_width
    ));
    output.push_str(&format!(
        "{:<width$}  {:10}  {:>12}\n",
        "TOTAL",
        "",
        total.to_string(),
        width = title_width
    ));

    output
}

/// Format a single bill's details
pub fn format_bill_details(bill: &Bill, category_name: Option<&str>, now: NaiveDate) -> String {
    let mut output = String::new();

    output.push_str(&format!("Bill: {}\n", bill.title));
    output.push_str(&format!("  ID:        {}\n", bill.id));
    output.push_str(&format!("  Amount:    {}\n", bill.amount));
    output.push_str(&format!(
        "  Due:       {} ({})\n",
        bill.due_date.format("%Y-%m-%d"),
        format_due_status(bill, now)
    ));
    output.push_str(&format!(
        "  Auto-paid: {}\n",
        if bill.auto_paid { "Yes" } else { "No" }
    ));

    if let Some(name) = category_name {
        output.push_str(&format!("  Category:  {}\n", name));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        bill.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        bill.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
