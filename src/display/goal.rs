//! Savings goal display formatting
//!
//! Renders goals with progress bars. The bar fill caps at 100% while
//! the printed percentage stays unclamped, so over-funded goals show
//! a full bar with a figure past 100.

use crate::models::SavingsGoal;

use super::report::{format_bar, format_percentage};

const BAR_WIDTH: usize = 20;

/// Format one goal as a progress line
pub fn format_goal_row(goal: &SavingsGoal, title_width: usize) -> String {
    let percent = goal.progress_percent();
    let bar = format_bar(percent.min(100.0), 100.0, BAR_WIDTH);

    format!(
        "{:<width$}  {} {:>7}  {} of {}",
        goal.title,
        bar,
        format_percentage(percent),
        goal.current_amount,
        goal.target_amount,
        width = title_width
    )
}

/// Format a list of goals with progress bars
pub fn format_goal_list(goals: &[SavingsGoal]) -> String {
    if goals.is_empty() {
        return "No savings goals found.".to_string();
    }

    let title_width = goals
        .iter()
        .map(|g| g.title.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    for goal in goals {
        output.push_str(&format_goal_row(goal, title_width));
        output.push('\n');
    }

    output
}

/// Format a single goal's details
pub fn format_goal_details(goal: &SavingsGoal) -> String {
    let percent = goal.progress_percent();

    let mut output = String::new();
    output.push_str(&format!("Goal: {}\n", goal.title));
    output.push_str(&format!("  ID:       {}\n", goal.id));
    output.push_str(&format!("  Target:   {}\n", goal.target_amount));
    output.push_str(&format!("  Saved:    {}\n", goal.current_amount));
    output.push_str(&format!(
        "  Progress: {} {}\n",
        format_bar(percent.min(100.0), 100.0, BAR_WIDTH),
        format_percentage(percent)
    ));

    if goal.is_reached() {
        output.push_str("  Reached:  Yes\n");
    }

    if let Some(deadline) = goal.deadline {
        output.push_str(&format!(
            "  Deadline: {}\n",
            deadline.format("%Y-%m-%d")
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        goal.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        goal.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn goal_at(title: &str, current: i64, target: i64) -> SavingsGoal {
        let mut goal = SavingsGoal::new(title, Money::from_cents(target));
        goal.current_amount = Money::from_cents(current);
        goal
    }

    #[test]
    fn test_format_goal_row_shows_amounts() {
        let row = format_goal_row(&goal_at("Vacation", 25000, 100000), 8);
        assert!(row.contains("Vacation"));
        assert!(row.contains("25%"));
        assert!(row.contains("$250.00 of $1000.00"));
    }

    #[test]
    fn test_overfunded_goal_caps_bar_not_text() {
        let row = format_goal_row(&goal_at("Laptop", 75000, 50000), 6);
        // Full bar, no empty segments
        assert!(row.contains(&"█".repeat(BAR_WIDTH)));
        assert!(!row.contains('░'));
        // Percentage text stays unclamped
        assert!(row.contains("150%"));
    }

    #[test]
    fn test_format_empty_list() {
        let output = format_goal_list(&[]);
        assert!(output.contains("No savings goals found"));
    }

    #[test]
    fn test_details_mention_deadline() {
        let mut goal = goal_at("Vacation", 0, 100000);
        goal.deadline = chrono::NaiveDate::from_ymd_opt(2025, 12, 1);

        let output = format_goal_details(&goal);
        assert!(output.contains("2025-12-01"));
    }
}
