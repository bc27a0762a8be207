//! Category display formatting
//!
//! Formats categories for terminal output in table and detail views.

use crate::models::{Category, Money};

/// Format a simple list of categories
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nDefault categories are created the first time outlay runs."
            .to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:7}  {}\n",
        "Category",
        "Color",
        "ID",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:-<7}  {:-<12}\n",
        "",
        "",
        "",
        width = name_width
    ));

    for category in categories {
        output.push_str(&format!(
            "{:<width$}  {:7}  {}\n",
            category.name,
            category.color,
            category.id,
            width = name_width
        ));
    }

    output
}

/// Format category details
pub fn format_category_details(
    category: &Category,
    expense_count: usize,
    total_spent: Money,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:       {}\n", category.id));
    output.push_str(&format!("  Color:    {}\n", category.color));
    output.push_str(&format!("  Expenses: {}\n", expense_count));
    output.push_str(&format!("  Spent:    {}\n", total_spent));

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        category.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        category.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_empty_list() {
        let output = format_category_list(&[]);
        assert!(output.contains("No categories found"));
    }

    #[test]
    fn test_format_category_list() {
        let categories = vec![
            Category::new("Groceries", "#0088FE"),
            Category::new("Transport", "#00C49F"),
        ];

        let output = format_category_list(&categories);
        assert!(output.contains("Groceries"));
        assert!(output.contains("Transport"));
        assert!(output.contains("#0088FE"));
    }

    #[test]
    fn test_format_category_details() {
        let category = Category::new("Groceries", "#0088FE");
        let output = format_category_details(&category, 12, Money::from_cents(45000));

        assert!(output.contains("Groceries"));
        assert!(output.contains("12"));
        assert!(output.contains("$450.00"));
    }
}
