//! Dashboard report
//!
//! Summarizes spending for the selected period against the one before it,
//! with top categories, recent activity, upcoming bills, and goal progress.

use std::collections::HashMap;
use std::io::Write;

use chrono::NaiveDate;

use crate::error::{OutlayError, OutlayResult};
use crate::models::{
    Bill, Category, CategoryId, Expense, Money, PeriodWindow, ReportingPeriod, SavingsGoal,
    UNKNOWN_CATEGORY_COLOR, UNKNOWN_CATEGORY_NAME,
};
use crate::storage::Storage;

/// Number of top categories shown
const TOP_CATEGORY_COUNT: usize = 3;
/// Number of recent expenses shown
const RECENT_EXPENSE_COUNT: usize = 5;
/// Number of upcoming bills shown
const UPCOMING_BILL_COUNT: usize = 3;
/// Number of goals shown
const GOAL_COUNT: usize = 3;
/// How far ahead to look for due bills, in days
const BILL_LOOKAHEAD_DAYS: i64 = 30;

/// Spending attributed to one category within the current window
///
/// Expenses pointing at a deleted category keep their own bucket; it
/// renders under the "Unknown" name with the neutral color, as does the
/// bucket for uncategorized expenses.
#[derive(Debug, Clone)]
pub struct CategorySpend {
    /// Category reference as recorded on the expenses, if any
    pub category_id: Option<CategoryId>,
    /// Resolved category name, or "Unknown"
    pub name: String,
    /// Resolved category color, or the neutral fallback
    pub color: String,
    /// Total spent in the current window
    pub total: Money,
    /// Share of the current window's total, in percent
    ///
    /// Not a number when the window total is zero; rendering guards it.
    pub share: f64,
}

/// A recent expense with its category resolved for display
#[derive(Debug, Clone)]
pub struct RecentExpense {
    /// The expense itself
    pub expense: Expense,
    /// Resolved category name, or "Unknown"
    pub category_name: String,
}

/// A bill due within the lookahead window
#[derive(Debug, Clone)]
pub struct UpcomingBill {
    /// The bill itself
    pub bill: Bill,
    /// Whole days from the reference date to the due date
    pub days_until_due: i64,
}

/// Progress toward one savings goal
#[derive(Debug, Clone)]
pub struct GoalProgress {
    /// The goal itself
    pub goal: SavingsGoal,
    /// Saved amount as a percentage of the target, not clamped at 100
    pub percent: f64,
}

/// Dashboard report
#[derive(Debug, Clone)]
pub struct DashboardReport {
    /// Reporting period the dashboard covers
    pub period: ReportingPeriod,
    /// Current window for the period
    pub window: PeriodWindow,
    /// The window immediately before it
    pub previous_window: PeriodWindow,
    /// Total spent in the current window
    pub current_total: Money,
    /// Total spent in the previous window
    pub previous_total: Money,
    /// Change from the previous window, in percent
    ///
    /// Pinned at 100 when the previous window had no spending, so a
    /// first period of activity always reads as a full increase.
    pub percentage_change: f64,
    /// Number of expenses in the current window
    pub current_count: usize,
    /// Highest-spend categories in the current window
    pub top_categories: Vec<CategorySpend>,
    /// Most recent expenses across the whole collection, newest first
    pub recent_expenses: Vec<RecentExpense>,
    /// Bills due within the next thirty days, soonest first
    pub upcoming_bills: Vec<UpcomingBill>,
    /// Progress for the first few goals
    pub goal_progress: Vec<GoalProgress>,
}

impl DashboardReport {
    /// Build the dashboard from in-memory data
    ///
    /// The result depends only on the arguments; `now` picks the
    /// reporting windows. Recent expenses are drawn from the whole
    /// collection, not just the current window.
    pub fn compute(
        expenses: &[Expense],
        categories: &[Category],
        bills: &[Bill],
        goals: &[SavingsGoal],
        period: ReportingPeriod,
        now: NaiveDate,
    ) -> Self {
        let window = period.current_window(now);
        let previous_window = period.previous_window(now);

        // Aggregate both windows in one pass; they never overlap
        let mut current_total = Money::zero();
        let mut previous_total = Money::zero();
        let mut current_count = 0;
        let mut by_category: HashMap<Option<CategoryId>, Money> = HashMap::new();

        for expense in expenses {
            if window.contains(expense.date) {
                current_total += expense.amount;
                current_count += 1;
                *by_category
                    .entry(expense.category_id)
                    .or_insert_with(Money::zero) += expense.amount;
            } else if previous_window.contains(expense.date) {
                previous_total += expense.amount;
            }
        }

        let percentage_change = if previous_total.is_zero() {
            100.0
        } else {
            (current_total.cents() - previous_total.cents()) as f64
                / previous_total.cents() as f64
                * 100.0
        };

        let category_map: HashMap<CategoryId, &Category> =
            categories.iter().map(|c| (c.id, c)).collect();

        let mut top_categories: Vec<CategorySpend> = by_category
            .into_iter()
            .map(|(category_id, total)| {
                let (name, color) = match category_id.and_then(|id| category_map.get(&id)) {
                    Some(category) => (category.name.clone(), category.color.clone()),
                    None => (
                        UNKNOWN_CATEGORY_NAME.to_string(),
                        UNKNOWN_CATEGORY_COLOR.to_string(),
                    ),
                };
                let share = total.cents() as f64 / current_total.cents() as f64 * 100.0;

                CategorySpend {
                    category_id,
                    name,
                    color,
                    total,
                    share,
                }
            })
            .collect();
        top_categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
        top_categories.truncate(TOP_CATEGORY_COUNT);

        let mut recent: Vec<&Expense> = expenses.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        let recent_expenses: Vec<RecentExpense> = recent
            .into_iter()
            .take(RECENT_EXPENSE_COUNT)
            .map(|expense| RecentExpense {
                category_name: expense
                    .category_id
                    .and_then(|id| category_map.get(&id))
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| UNKNOWN_CATEGORY_NAME.to_string()),
                expense: expense.clone(),
            })
            .collect();

        let mut upcoming_bills: Vec<UpcomingBill> = bills
            .iter()
            .filter(|b| b.is_due_within(now, BILL_LOOKAHEAD_DAYS))
            .map(|b| UpcomingBill {
                days_until_due: b.days_until(now),
                bill: b.clone(),
            })
            .collect();
        upcoming_bills.sort_by(|a, b| a.bill.due_date.cmp(&b.bill.due_date));
        upcoming_bills.truncate(UPCOMING_BILL_COUNT);

        let goal_progress: Vec<GoalProgress> = goals
            .iter()
            .take(GOAL_COUNT)
            .map(|g| GoalProgress {
                percent: g.progress_percent(),
                goal: g.clone(),
            })
            .collect();

        Self {
            period,
            window,
            previous_window,
            current_total,
            previous_total,
            percentage_change,
            current_count,
            top_categories,
            recent_expenses,
            upcoming_bills,
            goal_progress,
        }
    }

    /// Generate the dashboard from storage
    pub fn generate(
        storage: &Storage,
        period: ReportingPeriod,
        now: NaiveDate,
    ) -> OutlayResult<Self> {
        let expenses = storage.expenses.get_all()?;
        let categories = storage.categories.get_all()?;
        let bills = storage.bills.get_all()?;
        let goals = storage.goals.get_all()?;

        Ok(Self::compute(
            &expenses,
            &categories,
            &bills,
            &goals,
            period,
            now,
        ))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&format!(
            "Dashboard: {} to {}\n",
            self.window.start, self.window.end
        ));
        output.push_str(&"=".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "Spent this {}: {} ({} expenses)\n",
            self.period.noun(),
            self.current_total,
            self.current_count
        ));
        output.push_str(&format!(
            "Spent {}: {}\n",
            self.period.previous_label(),
            self.previous_total
        ));
        output.push_str(&format!(
            "Change: {}{:.1}%\n",
            if self.percentage_change > 0.0 { "+" } else { "" },
            self.percentage_change
        ));

        // Top categories
        output.push_str("\nTOP CATEGORIES\n");
        output.push_str(&"-".repeat(70));
        output.push('\n');
        if self.top_categories.is_empty() {
            output.push_str(&format!("  No spending this {}.\n", self.period.noun()));
        } else {
            for spend in &self.top_categories {
                let share = if spend.share.is_finite() {
                    format!("{:>6.1}%", spend.share)
                } else {
                    format!("{:>7}", "--")
                };
                output.push_str(&format!(
                    "  {:<20} {} {:>12} {}\n",
                    spend.name,
                    progress_bar(spend.share),
                    spend.total.to_string(),
                    share
                ));
            }
        }

        // Recent expenses
        output.push_str("\nRECENT EXPENSES\n");
        output.push_str(&"-".repeat(70));
        output.push('\n');
        if self.recent_expenses.is_empty() {
            output.push_str("  No expenses recorded yet.\n");
        } else {
            for recent in &self.recent_expenses {
                output.push_str(&format!(
                    "  {}  {:<25} {:<15} {:>12}\n",
                    recent.expense.date,
                    recent.expense.title,
                    recent.category_name,
                    recent.expense.amount.to_string()
                ));
            }
        }

        // Upcoming bills
        output.push_str("\nUPCOMING BILLS\n");
        output.push_str(&"-".repeat(70));
        output.push('\n');
        if self.upcoming_bills.is_empty() {
            output.push_str("  No bills coming up.\n");
        } else {
            for upcoming in &self.upcoming_bills {
                let due = match upcoming.days_until_due {
                    0 => "due today".to_string(),
                    1 => "due in 1 day".to_string(),
                    d => format!("due in {} days", d),
                };
                let auto = if upcoming.bill.auto_paid { " (auto)" } else { "" };
                output.push_str(&format!(
                    "  {}  {:<25} {:>12}  {}{}\n",
                    upcoming.bill.due_date,
                    upcoming.bill.title,
                    upcoming.bill.amount.to_string(),
                    due,
                    auto
                ));
            }
        }

        // Goals
        output.push_str("\nSAVINGS GOALS\n");
        output.push_str(&"-".repeat(70));
        output.push('\n');
        if self.goal_progress.is_empty() {
            output.push_str("  No goals yet.\n");
        } else {
            for progress in &self.goal_progress {
                output.push_str(&format!(
                    "  {:<20} {} {:>7}  {} of {}\n",
                    progress.goal.title,
                    progress_bar(progress.percent),
                    if progress.percent.is_finite() {
                        format!("{:.0}%", progress.percent)
                    } else {
                        "--".to_string()
                    },
                    progress.goal.current_amount,
                    progress.goal.target_amount
                ));
            }
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> OutlayResult<()> {
        writeln!(writer, "Section,Name,Date,Amount,Percent")
            .map_err(|e| OutlayError::Export(e.to_string()))?;

        writeln!(
            writer,
            "summary,Current Total,,{:.2},",
            self.current_total.cents() as f64 / 100.0
        )
        .map_err(|e| OutlayError::Export(e.to_string()))?;
        writeln!(
            writer,
            "summary,Previous Total,,{:.2},",
            self.previous_total.cents() as f64 / 100.0
        )
        .map_err(|e| OutlayError::Export(e.to_string()))?;
        writeln!(writer, "summary,Change,,,{:.2}", self.percentage_change)
            .map_err(|e| OutlayError::Export(e.to_string()))?;

        for spend in &self.top_categories {
            writeln!(
                writer,
                "top_category,{},,{:.2},{}",
                spend.name,
                spend.total.cents() as f64 / 100.0,
                format_csv_percent(spend.share)
            )
            .map_err(|e| OutlayError::Export(e.to_string()))?;
        }

        for recent in &self.recent_expenses {
            writeln!(
                writer,
                "recent_expense,{},{},{:.2},",
                recent.expense.title,
                recent.expense.date,
                recent.expense.amount.cents() as f64 / 100.0
            )
            .map_err(|e| OutlayError::Export(e.to_string()))?;
        }

        for upcoming in &self.upcoming_bills {
            writeln!(
                writer,
                "upcoming_bill,{},{},{:.2},",
                upcoming.bill.title,
                upcoming.bill.due_date,
                upcoming.bill.amount.cents() as f64 / 100.0
            )
            .map_err(|e| OutlayError::Export(e.to_string()))?;
        }

        for progress in &self.goal_progress {
            writeln!(
                writer,
                "goal,{},,{:.2},{}",
                progress.goal.title,
                progress.goal.current_amount.cents() as f64 / 100.0,
                format_csv_percent(progress.percent)
            )
            .map_err(|e| OutlayError::Export(e.to_string()))?;
        }

        Ok(())
    }
}

/// Render a fixed-width progress bar, capped at full
fn progress_bar(percent: f64) -> String {
    const WIDTH: usize = 20;
    let ratio = if percent.is_finite() {
        (percent / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(WIDTH - filled))
}

fn format_csv_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::OutlayPaths;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(title: &str, cents: i64, on: NaiveDate) -> Expense {
        Expense::new(title, Money::from_cents(cents), on)
    }

    fn compute(
        expenses: &[Expense],
        period: ReportingPeriod,
        now: NaiveDate,
    ) -> DashboardReport {
        DashboardReport::compute(expenses, &[], &[], &[], period, now)
    }

    #[test]
    fn test_month_boundary_splits_windows() {
        let expenses = vec![
            expense("May dinner", 1000, date(2025, 5, 31)),
            expense("June dinner", 2000, date(2025, 6, 1)),
        ];

        let report = compute(&expenses, ReportingPeriod::Month, date(2025, 6, 15));

        assert_eq!(report.current_total.cents(), 2000);
        assert_eq!(report.previous_total.cents(), 1000);
        assert_eq!(report.current_count, 1);
        assert!((report.percentage_change - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_future_dates_in_current_month_count() {
        let expenses = vec![expense("Prepaid trip", 5000, date(2025, 6, 25))];

        let report = compute(&expenses, ReportingPeriod::Month, date(2025, 6, 15));

        assert_eq!(report.current_total.cents(), 5000);
    }

    #[test]
    fn test_empty_previous_window_pins_change_at_100() {
        let expenses = vec![expense("Coffee", 450, date(2025, 6, 10))];

        let report = compute(&expenses, ReportingPeriod::Month, date(2025, 6, 15));
        assert!((report.percentage_change - 100.0).abs() < f64::EPSILON);

        // Even with nothing in either window the change stays at 100
        let report = compute(&[], ReportingPeriod::Month, date(2025, 6, 15));
        assert!((report.percentage_change - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_change_negative_when_spending_drops() {
        let expenses = vec![
            expense("Last month", 10000, date(2025, 5, 10)),
            expense("This month", 5000, date(2025, 6, 10)),
        ];

        let report = compute(&expenses, ReportingPeriod::Month, date(2025, 6, 15));

        assert!((report.percentage_change - (-50.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_week_period_anchors_on_sunday() {
        // 2025-06-18 is a Wednesday; the week starts Sunday 2025-06-15
        let expenses = vec![
            expense("In week", 1000, date(2025, 6, 16)),
            expense("Saturday before", 2000, date(2025, 6, 14)),
        ];

        let report = compute(&expenses, ReportingPeriod::Week, date(2025, 6, 18));

        assert_eq!(report.current_total.cents(), 1000);
        assert_eq!(report.previous_total.cents(), 2000);
    }

    #[test]
    fn test_top_categories_limited_to_three_ordered_desc() {
        let categories: Vec<Category> = ["Groceries", "Transport", "Dining Out", "Utilities"]
            .iter()
            .map(|name| Category::new(*name, "#0088FE"))
            .collect();

        let now = date(2025, 6, 15);
        let mut expenses = Vec::new();
        for (i, category) in categories.iter().enumerate() {
            let mut e = expense(&category.name, (i as i64 + 1) * 1000, now);
            e.category_id = Some(category.id);
            expenses.push(e);
        }

        let report = DashboardReport::compute(
            &expenses,
            &categories,
            &[],
            &[],
            ReportingPeriod::Month,
            now,
        );

        assert_eq!(report.top_categories.len(), 3);
        assert_eq!(report.top_categories[0].name, "Utilities");
        assert_eq!(report.top_categories[0].total.cents(), 4000);
        assert_eq!(report.top_categories[1].name, "Dining Out");
        assert_eq!(report.top_categories[2].name, "Transport");
        assert!((report.top_categories[0].share - 40.0).abs() < 1e-9);
        assert!((report.top_categories[1].share - 30.0).abs() < 1e-9);
        assert!((report.top_categories[2].share - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_categories_render_as_unknown() {
        let known = Category::new("Groceries", "#0088FE");
        let now = date(2025, 6, 15);

        let mut shop = expense("Weekly shop", 2000, now);
        shop.category_id = Some(known.id);
        let mut dangling = expense("Old subscription", 1000, now);
        dangling.category_id = Some(CategoryId::new());
        let untagged = expense("Cash spend", 500, now);

        let report = DashboardReport::compute(
            &[shop, dangling, untagged],
            std::slice::from_ref(&known),
            &[],
            &[],
            ReportingPeriod::Month,
            now,
        );

        assert_eq!(report.top_categories.len(), 3);
        assert_eq!(report.top_categories[0].name, "Groceries");
        assert_eq!(report.top_categories[1].name, UNKNOWN_CATEGORY_NAME);
        assert_eq!(report.top_categories[1].color, UNKNOWN_CATEGORY_COLOR);
        assert_eq!(report.top_categories[2].name, UNKNOWN_CATEGORY_NAME);
        assert_eq!(report.top_categories[2].total.cents(), 500);
    }

    #[test]
    fn test_share_is_nan_when_window_total_is_zero() {
        let expenses = vec![expense("Comped lunch", 0, date(2025, 6, 10))];

        let report = compute(&expenses, ReportingPeriod::Month, date(2025, 6, 15));

        assert!(report.current_total.is_zero());
        assert_eq!(report.top_categories.len(), 1);
        assert!(report.top_categories[0].share.is_nan());
    }

    #[test]
    fn test_recent_expenses_span_the_whole_collection() {
        let mut expenses = Vec::new();
        for month in 1..=6 {
            expenses.push(expense(
                &format!("Month {}", month),
                1000,
                date(2025, month, 10),
            ));
        }

        // Week window only covers mid-June, recent still reaches back
        let report = compute(&expenses, ReportingPeriod::Week, date(2025, 6, 18));

        assert_eq!(report.recent_expenses.len(), 5);
        assert_eq!(report.recent_expenses[0].expense.title, "Month 6");
        assert_eq!(report.recent_expenses[4].expense.title, "Month 2");
        // Nothing resolves these, so they all read as unknown
        assert_eq!(report.recent_expenses[0].category_name, UNKNOWN_CATEGORY_NAME);
    }

    #[test]
    fn test_upcoming_bills_window_and_order() {
        let now = date(2025, 6, 15);
        let bills = vec![
            Bill::new("Edge", Money::from_cents(3000), now + chrono::Duration::days(30)),
            Bill::new("Today", Money::from_cents(2000), now),
            Bill::new("Beyond", Money::from_cents(4000), now + chrono::Duration::days(31)),
            Bill::new("Overdue", Money::from_cents(1000), now - chrono::Duration::days(1)),
        ];

        let report =
            DashboardReport::compute(&[], &[], &bills, &[], ReportingPeriod::Month, now);

        assert_eq!(report.upcoming_bills.len(), 2);
        assert_eq!(report.upcoming_bills[0].bill.title, "Today");
        assert_eq!(report.upcoming_bills[0].days_until_due, 0);
        assert_eq!(report.upcoming_bills[1].bill.title, "Edge");
        assert_eq!(report.upcoming_bills[1].days_until_due, 30);
    }

    #[test]
    fn test_upcoming_bills_truncated_to_three() {
        let now = date(2025, 6, 15);
        let bills: Vec<Bill> = (1..=5)
            .map(|d| {
                Bill::new(
                    format!("Bill {}", d),
                    Money::from_cents(1000),
                    now + chrono::Duration::days(d),
                )
            })
            .collect();

        let report =
            DashboardReport::compute(&[], &[], &bills, &[], ReportingPeriod::Month, now);

        assert_eq!(report.upcoming_bills.len(), 3);
        assert_eq!(report.upcoming_bills[0].bill.title, "Bill 1");
        assert_eq!(report.upcoming_bills[2].bill.title, "Bill 3");
    }

    #[test]
    fn test_goal_progress_first_three_unclamped() {
        let mut over = SavingsGoal::new("Emergency fund", Money::from_cents(10000));
        over.current_amount = Money::from_cents(15000);
        let goals = vec![
            over,
            SavingsGoal::new("Vacation", Money::from_cents(50000)),
            SavingsGoal::new("Laptop", Money::from_cents(20000)),
            SavingsGoal::new("Fourth", Money::from_cents(1000)),
        ];

        let report = DashboardReport::compute(
            &[],
            &[],
            &[],
            &goals,
            ReportingPeriod::Month,
            date(2025, 6, 15),
        );

        assert_eq!(report.goal_progress.len(), 3);
        assert_eq!(report.goal_progress[0].goal.title, "Emergency fund");
        assert!((report.goal_progress[0].percent - 150.0).abs() < f64::EPSILON);
        assert_eq!(report.goal_progress[2].goal.title, "Laptop");
    }

    #[test]
    fn test_recent_expenses_resolve_category_names() {
        let known = Category::new("Groceries", "#0088FE");
        let mut tagged = expense("Weekly shop", 2000, date(2025, 6, 10));
        tagged.category_id = Some(known.id);

        let report = DashboardReport::compute(
            &[tagged],
            std::slice::from_ref(&known),
            &[],
            &[],
            ReportingPeriod::Month,
            date(2025, 6, 15),
        );

        assert_eq!(report.recent_expenses[0].category_name, "Groceries");
    }

    #[test]
    fn test_format_terminal_lists_sections() {
        let category = Category::new("Groceries", "#0088FE");
        let mut shop = expense("Weekly shop", 2000, date(2025, 6, 10));
        shop.category_id = Some(category.id);

        let bills = vec![Bill::new(
            "Rent",
            Money::from_cents(120000),
            date(2025, 6, 28),
        )];
        let goals = vec![SavingsGoal::new("Vacation", Money::from_cents(50000))];

        let report = DashboardReport::compute(
            &[shop],
            std::slice::from_ref(&category),
            &bills,
            &goals,
            ReportingPeriod::Month,
            date(2025, 6, 15),
        );
        let formatted = report.format_terminal();

        assert!(formatted.contains("TOP CATEGORIES"));
        assert!(formatted.contains("RECENT EXPENSES"));
        assert!(formatted.contains("UPCOMING BILLS"));
        assert!(formatted.contains("SAVINGS GOALS"));
        assert!(formatted.contains("Groceries"));
        assert!(formatted.contains("Rent"));
        assert!(formatted.contains("due in 13 days"));
        assert!(formatted.contains("Vacation"));
        assert!(formatted.contains("$20.00"));
        // The only category holds the full share, so its bar is solid
        assert!(formatted.contains(&"█".repeat(20)));
    }

    #[test]
    fn test_export_csv() {
        let expenses = vec![expense("Coffee", 450, date(2025, 6, 10))];
        let report = compute(&expenses, ReportingPeriod::Month, date(2025, 6, 15));

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        assert!(csv.starts_with("Section,Name,Date,Amount,Percent"));
        assert!(csv.contains("summary,Current Total,,4.50,"));
        assert!(csv.contains("recent_expense,Coffee,2025-06-10,4.50,"));
    }

    #[test]
    fn test_generate_reads_storage() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = OutlayPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        storage
            .expenses
            .upsert(expense("Coffee", 450, date(2025, 6, 10)))
            .unwrap();

        let report =
            DashboardReport::generate(&storage, ReportingPeriod::Month, date(2025, 6, 15))
                .unwrap();

        assert_eq!(report.current_total.cents(), 450);
        assert_eq!(report.recent_expenses.len(), 1);
    }
}
