//! Spending insights report
//!
//! Turns the period comparison into short human-readable observations:
//! how spending moved, where it concentrated, and when it happened.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{OutlayError, OutlayResult};
use crate::models::{
    Category, CategoryId, Expense, Money, ReportingPeriod, UNKNOWN_CATEGORY_NAME,
};
use crate::storage::Storage;

/// Share of total spending above which a category draws a suggestion
const CONCENTRATION_SHARE: f64 = 40.0;

/// What an insight is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    /// Current window compared with the previous one
    Comparison,
    /// Where spending concentrated
    Category,
    /// When spending happened
    Time,
    /// Something worth acting on
    Suggestion,
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Comparison => "comparison",
            Self::Category => "category",
            Self::Time => "time",
            Self::Suggestion => "suggestion",
        };
        write!(f, "{}", label)
    }
}

/// One observation about spending behavior
#[derive(Debug, Clone)]
pub struct Insight {
    /// What the insight is about
    pub kind: InsightKind,
    /// Short headline
    pub title: String,
    /// Full sentence with the numbers
    pub description: String,
    /// The percentage behind the observation, when there is one
    pub percentage: Option<f64>,
    /// Whether this reads as good news
    pub positive: bool,
}

/// Spending insights report
#[derive(Debug, Clone)]
pub struct InsightsReport {
    /// Period the insights cover
    pub period: ReportingPeriod,
    /// The observations, comparison first
    pub insights: Vec<Insight>,
}

impl InsightsReport {
    /// Build the insights from in-memory data
    pub fn compute(
        expenses: &[Expense],
        categories: &[Category],
        period: ReportingPeriod,
        now: NaiveDate,
    ) -> Self {
        let window = period.current_window(now);
        let previous_window = period.previous_window(now);
        let noun = period.noun();

        let mut current_total = Money::zero();
        let mut previous_total = Money::zero();
        let mut by_category: HashMap<Option<CategoryId>, Money> = HashMap::new();
        let mut by_weekday: HashMap<Weekday, Money> = HashMap::new();

        for expense in expenses {
            if window.contains(expense.date) {
                current_total += expense.amount;
                *by_category
                    .entry(expense.category_id)
                    .or_insert_with(Money::zero) += expense.amount;
                *by_weekday
                    .entry(expense.date.weekday())
                    .or_insert_with(Money::zero) += expense.amount;
            } else if previous_window.contains(expense.date) {
                previous_total += expense.amount;
            }
        }

        let mut insights = Vec::new();

        // How spending moved against the previous window
        if previous_total.is_positive() {
            let change = (current_total.cents() - previous_total.cents()) as f64
                / previous_total.cents() as f64
                * 100.0;
            let fell = change <= 0.0;
            let direction = if fell { "down" } else { "up" };

            insights.push(Insight {
                kind: InsightKind::Comparison,
                title: format!("Spending is {} {:.0}%", direction, change.abs()),
                description: format!(
                    "You spent {:.1}% {} this {} than {}.",
                    change.abs(),
                    if fell { "less" } else { "more" },
                    noun,
                    period.previous_label()
                ),
                percentage: Some(change),
                positive: fell,
            });
        }

        // Where spending concentrated
        if current_total.is_positive() {
            let category_map: HashMap<CategoryId, &Category> =
                categories.iter().map(|c| (c.id, c)).collect();

            let top = by_category.iter().max_by(|a, b| {
                a.1.cmp(b.1).then_with(|| {
                    // Deterministic winner on equal totals
                    resolve_name(*b.0, &category_map).cmp(&resolve_name(*a.0, &category_map))
                })
            });

            if let Some((&category_id, &total)) = top {
                let name = resolve_name(category_id, &category_map);
                let share = total.cents() as f64 / current_total.cents() as f64 * 100.0;

                insights.push(Insight {
                    kind: InsightKind::Category,
                    title: format!("Biggest category: {}", name),
                    description: format!(
                        "{} accounts for {:.1}% of this {}'s spending.",
                        name, share, noun
                    ),
                    percentage: Some(share),
                    positive: share < 50.0,
                });

                if share >= CONCENTRATION_SHARE {
                    insights.push(Insight {
                        kind: InsightKind::Suggestion,
                        title: format!("Keep an eye on {}", name),
                        description: format!(
                            "{} takes up {:.0}% of your spending this {}. \
                             A budget for it could help.",
                            name, share, noun
                        ),
                        percentage: Some(share),
                        positive: false,
                    });
                }
            }
        }

        // When spending happened
        if !by_weekday.is_empty() {
            let mut heaviest: Option<(Weekday, Money)> = None;
            for weekday in [
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ] {
                if let Some(&total) = by_weekday.get(&weekday) {
                    if heaviest.map_or(true, |(_, best)| total > best) {
                        heaviest = Some((weekday, total));
                    }
                }
            }

            if let Some((weekday, total)) = heaviest {
                let name = weekday_name(weekday);
                insights.push(Insight {
                    kind: InsightKind::Time,
                    title: format!("Busiest day: {}", name),
                    description: format!(
                        "Most of this {}'s spending ({}) landed on {}s.",
                        noun, total, name
                    ),
                    percentage: None,
                    positive: true,
                });
            }
        }

        // Suggestions read better at the end
        insights.sort_by_key(|i| matches!(i.kind, InsightKind::Suggestion));

        Self { period, insights }
    }

    /// Generate the insights from storage
    pub fn generate(
        storage: &Storage,
        period: ReportingPeriod,
        now: NaiveDate,
    ) -> OutlayResult<Self> {
        let expenses = storage.expenses.get_all()?;
        let categories = storage.categories.get_all()?;
        Ok(Self::compute(&expenses, &categories, period, now))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Spending Insights ({})\n", self.period));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.insights.is_empty() {
            output.push_str("Not enough activity yet to say anything useful.\n");
            return output;
        }

        for insight in &self.insights {
            let marker = if insight.positive { "+" } else { "!" };
            output.push_str(&format!(" {} {}\n", marker, insight.title));
            output.push_str(&format!("   {}\n", insight.description));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> OutlayResult<()> {
        writeln!(writer, "Kind,Title,Percent,Positive")
            .map_err(|e| OutlayError::Export(e.to_string()))?;

        for insight in &self.insights {
            let percent = insight
                .percentage
                .map(|p| format!("{:.2}", p))
                .unwrap_or_default();
            writeln!(
                writer,
                "{},{},{},{}",
                insight.kind, insight.title, percent, insight.positive
            )
            .map_err(|e| OutlayError::Export(e.to_string()))?;
        }

        Ok(())
    }
}

fn resolve_name(
    category_id: Option<CategoryId>,
    category_map: &HashMap<CategoryId, &Category>,
) -> String {
    category_id
        .and_then(|id| category_map.get(&id))
        .map(|c| c.name.clone())
        .unwrap_or_else(|| UNKNOWN_CATEGORY_NAME.to_string())
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
