//! Spending trends report
//!
//! Monthly spending totals over a trailing run of calendar months.

use std::io::Write;

use chrono::{Datelike, NaiveDate};

use crate::error::{OutlayError, OutlayResult};
use crate::models::{Expense, Money, PeriodWindow};
use crate::storage::Storage;

/// Spending total for one calendar month
#[derive(Debug, Clone)]
pub struct MonthlyTotal {
    /// Calendar year
    pub year: i32,
    /// Calendar month (1-12)
    pub month: u32,
    /// Three-letter month label ("Jan")
    pub label: String,
    /// Total spent in the month
    pub total: Money,
    /// Number of expenses in the month
    pub count: usize,
}

/// Spending trends report
#[derive(Debug, Clone)]
pub struct TrendsReport {
    /// Monthly totals, oldest first, ending with the reference month
    pub months: Vec<MonthlyTotal>,
    /// Mean of the monthly totals
    pub average: Money,
    /// Highest monthly total (used to scale the chart)
    pub peak: Money,
}

impl TrendsReport {
    /// Build the trends report from in-memory expenses
    ///
    /// Covers `months_back` calendar months ending with the month that
    /// contains `now`.
    pub fn compute(expenses: &[Expense], months_back: usize, now: NaiveDate) -> Self {
        let months_back = months_back.max(1);
        let mut months = Vec::with_capacity(months_back);

        for steps in (0..months_back).rev() {
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

            let label = window.start.format("%b").to_string();
            months.push(MonthlyTotal {
                year,
                month,
                label,
                total,
                count,
            });
        }

        let sum: i64 = months.iter().map(|m| m.total.cents()).sum();
        let average = Money::from_cents(sum / months.len() as i64);
        let peak = months
            .iter()
            .map(|m| m.total)
            .max()
            .unwrap_or_else(Money::zero);

        Self {
            months,
            average,
            peak,
        }
    }

    /// Generate the trends report from storage
    pub fn generate(storage: &Storage, months_back: usize, now: NaiveDate) -> OutlayResult<Self> {
        let expenses = storage.expenses.get_all()?;
        Ok(Self::compute(&expenses, months_back, now))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        const CHART_WIDTH: usize = 30;

        let mut output = String::new();

        output.push_str(&format!(
            "Spending Trends (last {} months)\n",
            self.months.len()
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        for month in &self.months {
            let filled = if self.peak.is_zero() {
                0
            } else {
                (month.total.cents() as f64 / self.peak.cents() as f64 * CHART_WIDTH as f64)
                    .round() as usize
            };
            let bar: String = "█".repeat(filled) + &"░".repeat(CHART_WIDTH - filled);

            output.push_str(&format!(
                "{} {} {} {:>10}\n",
                month.label,
                month.year,
                bar,
                month.total.to_string()
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!("Monthly average: {}\n", self.average));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> OutlayResult<()> {
        writeln!(writer, "Year,Month,Label,Amount,Expense Count")
            .map_err(|e| OutlayError::Export(e.to_string()))?;

        for month in &self.months {
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

        Ok(())
    }
}

/// Step back `steps` months from the given year/month
pub(crate) fn months_before(year: i32, month: u32, steps: usize) -> (i32, u32) {
    let absolute = year * 12 + month as i32 - 1 - steps as i32;
    (absolute.div_euclid(12), (absolute.rem_euclid(12) + 1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(cents: i64, on: NaiveDate) -> Expense {
        Expense::new("Test", Money::from_cents(cents), on)
    }

    #[test]
    fn test_months_before() {
        assert_eq!(months_before(2025, 6, 0), (2025, 6));
        assert_eq!(months_before(2025, 6, 5), (2025, 1));
        assert_eq!(months_before(2025, 6, 6), (2024, 12));
        assert_eq!(months_before(2025, 1, 13), (2023, 12));
    }

    #[test]
    fn test_trailing_months_oldest_first() {
        let expenses = vec![
            expense(1000, date(2025, 4, 10)),
            expense(2000, date(2025, 5, 10)),
            expense(3000, date(2025, 6, 10)),
        ];

        let report = TrendsReport::compute(&expenses, 3, date(2025, 6, 15));

        assert_eq!(report.months.len(), 3);
        assert_eq!(report.months[0].label, "Apr");
        assert_eq!(report.months[0].total.cents(), 1000);
        assert_eq!(report.months[2].label, "Jun");
        assert_eq!(report.months[2].total.cents(), 3000);
        assert_eq!(report.average.cents(), 2000);
        assert_eq!(report.peak.cents(), 3000);
    }

    #[test]
    fn test_year_boundary_walks_into_previous_year() {
        let expenses = vec![
            expense(1000, date(2024, 12, 20)),
            expense(2000, date(2025, 1, 5)),
        ];

        let report = TrendsReport::compute(&expenses, 2, date(2025, 1, 15));

        assert_eq!(report.months[0].year, 2024);
        assert_eq!(report.months[0].month, 12);
        assert_eq!(report.months[0].total.cents(), 1000);
        assert_eq!(report.months[1].year, 2025);
        assert_eq!(report.months[1].total.cents(), 2000);
    }

    #[test]
    fn test_empty_months_render_zero_bars() {
        let report = TrendsReport::compute(&[], 12, date(2025, 6, 15));

        assert_eq!(report.months.len(), 12);
        assert!(report.peak.is_zero());

        // No division by zero when the chart scales
        let text = report.format_terminal();
        assert!(text.contains("Monthly average: $0.00"));
    }

    #[test]
    fn test_export_csv() {
        let expenses = vec![expense(1500, date(2025, 6, 10))];
        let report = TrendsReport::compute(&expenses, 2, date(2025, 6, 15));

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        assert!(csv.starts_with("Year,Month,Label,Amount,Expense Count"));
        assert!(csv.contains("2025,6,Jun,15.00,1"));
    }
}
