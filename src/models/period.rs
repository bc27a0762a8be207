//! Reporting periods and window arithmetic
//!
//! A reporting period selects the date window the dashboard aggregates over,
//! plus the window immediately before it for comparison. Weeks are anchored
//! on Sunday and truncated at the reference date; months and years cover the
//! whole calendar unit.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects which window the dashboard reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportingPeriod {
    /// Sunday-anchored week up to the reference date
    Week,
    /// Calendar month of the reference date
    #[default]
    Month,
    /// Calendar year of the reference date
    Year,
}

/// An inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    /// First date in the window
    pub start: NaiveDate,
    /// Last date in the window
    pub end: NaiveDate,
}

impl PeriodWindow {
    /// Create a window from two dates (both inclusive)
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Check whether a date falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, counting both endpoints
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The window covering one whole calendar month
    pub fn calendar_month(year: i32, month: u32) -> Self {
        let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        Self::new(start, next_month.unwrap() - Duration::days(1))
    }

    /// The window covering one whole calendar year
    pub fn calendar_year(year: i32) -> Self {
        Self::new(
            NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(year, 12, 31).unwrap(),
        )
    }
}

impl fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl ReportingPeriod {
    /// Parse a period from user input ("week", "month", "year")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "week" | "w" => Some(Self::Week),
            "month" | "m" => Some(Self::Month),
            "year" | "y" => Some(Self::Year),
            _ => None,
        }
    }

    /// The window containing the reference date
    ///
    /// Week windows run from the most recent Sunday through the reference
    /// date itself. Month and year windows span the full calendar unit, so
    /// dates later in the same month or year still fall inside.
    pub fn current_window(&self, now: NaiveDate) -> PeriodWindow {
        match self {
            Self::Week => {
                let days_since_sunday = now.weekday().num_days_from_sunday() as i64;
                let start = now - Duration::days(days_since_sunday);
                PeriodWindow::new(start, now)
            }
            Self::Month => PeriodWindow::calendar_month(now.year(), now.month()),
            Self::Year => PeriodWindow::calendar_year(now.year()),
        }
    }

    /// The window immediately before the current one
    ///
    /// For weeks this is the 7 days ending the day before the current
    /// window starts. For months, the prior calendar month (January rolls
    /// back to December of the previous year). For years, the prior year.
    pub fn previous_window(&self, now: NaiveDate) -> PeriodWindow {
        match self {
            Self::Week => {
                let current_start = self.current_window(now).start;
                PeriodWindow::new(
                    current_start - Duration::days(7),
                    current_start - Duration::days(1),
                )
            }
            Self::Month => {
                let (year, month) = if now.month() == 1 {
                    (now.year() - 1, 12)
                } else {
                    (now.year(), now.month() - 1)
                };
                PeriodWindow::calendar_month(year, month)
            }
            Self::Year => PeriodWindow::calendar_year(now.year() - 1),
        }
    }

    /// Lowercase noun for messages ("week", "month", "year")
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Label for the comparison line ("last week", ...)
    pub fn previous_label(&self) -> &'static str {
        match self {
            Self::Week => "last week",
            Self::Month => "last month",
            Self::Year => "last year",
        }
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.noun())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_window_anchors_on_sunday() {
        // 2025-06-18 is a Wednesday; the Sunday before is 2025-06-15
        let now = date(2025, 6, 18);
        let window = ReportingPeriod::Week.current_window(now);
        assert_eq!(window.start, date(2025, 6, 15));
        assert_eq!(window.end, now);
    }

    #[test]
    fn test_week_window_on_a_sunday() {
        // Reference date itself is a Sunday: one-day window
        let now = date(2025, 6, 15);
        let window = ReportingPeriod::Week.current_window(now);
        assert_eq!(window.start, now);
        assert_eq!(window.end, now);
        assert_eq!(window.len_days(), 1);
    }

    #[test]
    fn test_previous_week_is_seven_days() {
        let now = date(2025, 6, 18);
        let prev = ReportingPeriod::Week.previous_window(now);
        assert_eq!(prev.start, date(2025, 6, 8));
        assert_eq!(prev.end, date(2025, 6, 14));
        assert_eq!(prev.len_days(), 7);
    }

    #[test]
    fn test_month_window_spans_whole_month() {
        let now = date(2025, 6, 18);
        let window = ReportingPeriod::Month.current_window(now);
        assert_eq!(window.start, date(2025, 6, 1));
        assert_eq!(window.end, date(2025, 6, 30));
        // A date after "now" but in the same month still counts
        assert!(window.contains(date(2025, 6, 25)));
    }

    #[test]
    fn test_previous_month_january_rolls_back() {
        let now = date(2025, 1, 10);
        let prev = ReportingPeriod::Month.previous_window(now);
        assert_eq!(prev.start, date(2024, 12, 1));
        assert_eq!(prev.end, date(2024, 12, 31));
    }

    #[test]
    fn test_month_window_leap_february() {
        let window = ReportingPeriod::Month.current_window(date(2024, 2, 10));
        assert_eq!(window.end, date(2024, 2, 29));
    }

    #[test]
    fn test_year_windows() {
        let now = date(2025, 6, 18);
        let current = ReportingPeriod::Year.current_window(now);
        let prev = ReportingPeriod::Year.previous_window(now);
        assert_eq!(current.start, date(2025, 1, 1));
        assert_eq!(current.end, date(2025, 12, 31));
        assert_eq!(prev.start, date(2024, 1, 1));
        assert_eq!(prev.end, date(2024, 12, 31));
    }

    #[test]
    fn test_window_contains_is_inclusive() {
        let window = PeriodWindow::new(date(2025, 6, 1), date(2025, 6, 30));
        assert!(window.contains(date(2025, 6, 1)));
        assert!(window.contains(date(2025, 6, 30)));
        assert!(!window.contains(date(2025, 5, 31)));
        assert!(!window.contains(date(2025, 7, 1)));
    }

    #[test]
    fn test_parse() {
        assert_eq!(ReportingPeriod::parse("week"), Some(ReportingPeriod::Week));
        assert_eq!(ReportingPeriod::parse("Month"), Some(ReportingPeriod::Month));
        assert_eq!(ReportingPeriod::parse("y"), Some(ReportingPeriod::Year));
        assert_eq!(ReportingPeriod::parse("quarter"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ReportingPeriod::Week.to_string(), "week");
        assert_eq!(ReportingPeriod::Month.previous_label(), "last month");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&ReportingPeriod::Week).unwrap();
        assert_eq!(json, "\"week\"");
        let back: ReportingPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ReportingPeriod::Week);
    }
}
