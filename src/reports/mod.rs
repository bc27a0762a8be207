//! Reports module for Outlay
//!
//! Provides the spending reports: the dashboard summary, monthly
//! trends, next-month forecast, budget tracking, and insights.

pub mod budget;
pub mod dashboard;
pub mod forecast;
pub mod insights;
pub mod trends;

pub use budget::BudgetReport;
pub use dashboard::{CategorySpend, DashboardReport, GoalProgress, RecentExpense, UpcomingBill};
pub use forecast::ForecastReport;
pub use insights::{Insight, InsightKind, InsightsReport};
pub use trends::{MonthlyTotal, TrendsReport};
