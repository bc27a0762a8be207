//! Monthly budget report
//!
//! Measures the current calendar month's spending against the budget
//! configured in settings.

use std::io::Write;

use chrono::{Datelike, NaiveDate};

use crate::error::{OutlayError, OutlayResult};
use crate::models::{Expense, Money, PeriodWindow};
use crate::storage::Storage;

/// Monthly budget report
#[derive(Debug, Clone)]
pub struct BudgetReport {
    /// The calendar month measured
    pub window: PeriodWindow,
    /// Configured monthly budget
    pub budget: Money,
    /// Spent so far this month
    pub spent: Money,
    /// Budget minus spending; negative when over budget
    pub remaining: Money,
    /// Spending as a percentage of the budget, not clamped at 100
    ///
    /// Non-finite when the budget is zero; rendering guards it.
    pub used_percent: f64,
    /// Days left in the month, counting the reference date
    pub days_remaining: i64,
    /// Even split of the remaining budget over the remaining days
    ///
    /// None once the budget is spent.
    pub daily_allowance: Option<Money>,
}

impl BudgetReport {
    /// Build the budget report from in-memory expenses
    pub fn compute(expenses: &[Expense], budget: Money, now: NaiveDate) -> Self {
        let window = PeriodWindow::calendar_month(now.year(), now.month());

        let spent: Money = expenses
            .iter()
            .filter(|e| window.contains(e.date))
            .map(|e| e.amount)
            .sum();

        let remaining = budget - spent;
        let used_percent = spent.cents() as f64 / budget.cents() as f64 * 100.0;
        let days_remaining = (window.end - now).num_days() + 1;

        let daily_allowance = if remaining.is_positive() && days_remaining > 0 {
            Some(Money::from_cents(remaining.cents() / days_remaining))
        } else {
            None
        };

        Self {
            window,
            budget,
            spent,
            remaining,
            used_percent,
            days_remaining,
            daily_allowance,
        }
    }

    /// Generate the budget report from storage
    pub fn generate(storage: &Storage, budget: Money, now: NaiveDate) -> OutlayResult<Self> {
        let expenses = storage.expenses.get_all()?;
        Ok(Self::compute(&expenses, budget, now))
    }

    /// Whether spending has passed the budget
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        const BAR_WIDTH: usize = 30;

        let mut output = String::new();

        output.push_str(&format!("Monthly Budget ({})\n", self.window));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output.push_str(&format!("Budget:    {:>12}\n", self.budget.to_string()));
        output.push_str(&format!("Spent:     {:>12}\n", self.spent.to_string()));
        output.push_str(&format!("Remaining: {:>12}\n", self.remaining.to_string()));

        // Bar fill is capped at full; the percentage text is not
        let fill = if self.used_percent.is_finite() {
            (self.used_percent.clamp(0.0, 100.0) / 100.0 * BAR_WIDTH as f64).round() as usize
        } else {
            BAR_WIDTH
        };
        let bar: String = "█".repeat(fill) + &"░".repeat(BAR_WIDTH - fill);
        let percent_text = if self.used_percent.is_finite() {
            format!("{:.1}%", self.used_percent)
        } else {
            "--".to_string()
        };
        output.push_str(&format!("{} {} used\n", bar, percent_text));

        if self.is_over_budget() {
            output.push_str("Over budget!\n");
        } else if let Some(allowance) = self.daily_allowance {
            output.push_str(&format!(
                "{} left per day for the next {} days\n",
                allowance, self.days_remaining
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> OutlayResult<()> {
        writeln!(
            writer,
            "Start Date,End Date,Budget,Spent,Remaining,Used Percent,Days Remaining"
        )
        .map_err(|e| OutlayError::Export(e.to_string()))?;

        let used = if self.used_percent.is_finite() {
            format!("{:.2}", self.used_percent)
        } else {
            String::new()
        };

        writeln!(
            writer,
            "{},{},{:.2},{:.2},{:.2},{},{}",
            self.window.start,
            self.window.end,
            self.budget.cents() as f64 / 100.0,
            self.spent.cents() as f64 / 100.0,
            self.remaining.cents() as f64 / 100.0,
            used,
            self.days_remaining
        )
        .map_err(|e| OutlayError::Export(e.to_string()))?;

        Ok(())
    }
}
