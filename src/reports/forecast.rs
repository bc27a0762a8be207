//! Spending forecast report
//!
//! Projects next month's spending as the mean of recent full months.
//! The current month is left out of the sample since it is usually
//! still in progress.

use std::io::Write;

use chrono::{Datelike, NaiveDate};

use crate::error::{OutlayError, OutlayResult};
use crate::models::{Expense, Money, PeriodWindow};
use crate::storage::Storage;

use super::trends::{months_before, MonthlyTotal};

/// Spending forecast report
#[derive(Debug, Clone)]
pub struct ForecastReport {
    /// The full months sampled, oldest first
    pub sampled: Vec<MonthlyTotal>,
    /// Projected spending for a typical month
    pub projected: Money,
}

impl ForecastReport {
    /// Build the forecast from in-memory expenses
    ///
    /// Samples `sample_months` calendar months ending with the month
    /// before the one containing `now`.
    pub fn compute(expenses: &[Expense], sample_months: usize, now: NaiveDate) -> Self {
        let sample_months = sample_months.max(1);
        let mut sampled = Vec::with_capacity(sample_months);

        for steps in (1..=sample_months).rev() {
            let (year, month) = months_before(now.year(), now.month(), steps);
            let window = PeriodWindow::calendar_month(year, month);

            let mut total = Money::zero();
            let mut count = 0;
            for expense in expenses {
                if window.contains(expense.date) {
                    total += expense.amount;
                    count += 1;
                }
            }

            sampled.push(MonthlyTotal {
                year,
                month,
                label: window.start.format("%b").to_string(),
                total,
                count,
            });
        }

        let sum: i64 = sampled.iter().map(|m| m.total.cents()).sum();
        let projected = Money::from_cents(sum / sampled.len() as i64);

        Self { sampled, projected }
    }

    /// Generate the forecast from storage
    pub fn generate(
        storage: &Storage,
        sample_months: usize,
        now: NaiveDate,
    ) -> OutlayResult<Self> {
        let expenses = storage.expenses.get_all()?;
        Ok(Self::compute(&expenses, sample_months, now))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Spending Forecast\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        for month in &self.sampled {
            output.push_str(&format!(
                "{} {}: {} ({} expenses)\n",
                month.label, month.year, month.total, month.count
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!("Projected next month: {}\n", self.projected));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> OutlayResult<()> {
        writeln!(writer, "Year,Month,Label,Amount,Expense Count")
            .map_err(|e| OutlayError::Export(e.to_string()))?;

        for month in &self.sampled {
            writeln!(
                writer,
                "{},{},{},{:.2},{}",
                month.year,
                month.month,
                month.label,
                month.total.cents() as f64 / 100.0,
                month.count
            )
            .map_err(|e| OutlayError::Export(e.to_string()))?;
        }

        writeln!(
            writer,
            ",,Projected,{:.2},",
            self.projected.cents() as f64 / 100.0
        )
        .map_err(|e| OutlayError::Export(e.to_string()))?;

        Ok(())
    }
}
