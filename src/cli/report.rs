//! CLI commands for reports
//!
//! Provides commands for generating and exporting the spending reports.

use crate::config::settings::Settings;
use crate::error::OutlayResult;
use crate::models::{Money, ReportingPeriod};
use crate::reports::{
    BudgetReport, DashboardReport, ForecastReport, InsightsReport, TrendsReport,
};
use crate::storage::Storage;
use chrono::NaiveDate;
use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show the spending dashboard
    #[command(alias = "dash")]
    Dashboard {
        /// Reporting period (week, month, year)
        #[arg(short, long)]
        period: Option<String>,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show monthly spending totals
    Trends {
        /// Number of months to include
        #[arg(short, long, default_value = "6")]
        months: usize,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Project next month's spending from recent history
    Forecast {
        /// Number of past months to sample
        #[arg(short, long, default_value = "3")]
        months: usize,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show progress against the monthly budget
    Budget {
        /// Budget amount, defaults to the configured monthly budget
        #[arg(short, long)]
        budget: Option<String>,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show spending insights
    Insights {
        /// Reporting period (week, month, year)
        #[arg(short, long)]
        period: Option<String>,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> OutlayResult<()> {
    match cmd {
        ReportCommands::Dashboard {
            period,
            date,
            output,
        } => handle_dashboard_report(storage, settings, period, date, output),
        ReportCommands::Trends {
            months,
            date,
            output,
        } => handle_trends_report(storage, months, date, output),
        ReportCommands::Forecast {
            months,
            date,
            output,
        } => handle_forecast_report(storage, months, date, output),
        ReportCommands::Budget {
            budget,
            date,
            output,
        } => handle_budget_report(storage, settings, budget, date, output),
        ReportCommands::Insights {
            period,
            date,
            output,
        } => handle_insights_report(storage, settings, period, date, output),
    }
}

/// Handle the dashboard report
fn handle_dashboard_report(
    storage: &Storage,
    settings: &Settings,
    period: Option<String>,
    date: Option<String>,
    output: Option<PathBuf>,
) -> OutlayResult<()> {
    let period = parse_period(period, settings.default_period)?;
    let now = parse_reference_date(date)?;

    let report = DashboardReport::generate(storage, period, now)?;

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            crate::error::OutlayError::Export(format!(
                "Failed to create file {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut writer = BufWriter::new(file);
        report.export_csv(&mut writer)?;
        println!("Dashboard exported to: {}", path.display());
    } else {
        println!("{}", report.format_terminal());
    }

    Ok(())
}

/// Handle the trends report
fn handle_trends_report(
    storage: &Storage,
    months: usize,
    date: Option<String>,
    output: Option<PathBuf>,
) -> OutlayResult<()> {
    let now = parse_reference_date(date)?;

    let report = TrendsReport::generate(storage, months, now)?;

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            crate::error::OutlayError::Export(format!(
                "Failed to create file {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut writer = BufWriter::new(file);
        report.export_csv(&mut writer)?;
        println!("Trends report exported to: {}", path.display());
    } else {
        println!("{}", report.format_terminal());
    }

    Ok(())
}

/// Handle the forecast report
fn handle_forecast_report(
    storage: &Storage,
    months: usize,
    date: Option<String>,
    output: Option<PathBuf>,
) -> OutlayResult<()> {
    let now = parse_reference_date(date)?;

    let report = ForecastReport::generate(storage, months, now)?;

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            crate::error::OutlayError::Export(format!(
                "Failed to create file {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut writer = BufWriter::new(file);
        report.export_csv(&mut writer)?;
        println!("Forecast report exported to: {}", path.display());
    } else {
        println!("{}", report.format_terminal());
    }

    Ok(())
}

/// Handle the budget progress report
fn handle_budget_report(
    storage: &Storage,
    settings: &Settings,
    budget: Option<String>,
    date: Option<String>,
    output: Option<PathBuf>,
) -> OutlayResult<()> {
    let budget = match budget {
        Some(amount_str) => Money::parse(&amount_str).map_err(|e| {
            crate::error::OutlayError::Validation(format!("Invalid budget amount: {}", e))
        })?,
        None => settings.monthly_budget.ok_or_else(|| {
            crate::error::OutlayError::Validation(
                "No monthly budget configured. Pass --budget or set one with \
                 'outlay config --budget <amount>'"
                    .into(),
            )
        })?,
    };

    let now = parse_reference_date(date)?;

    let report = BudgetReport::generate(storage, budget, now)?;

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            crate::error::OutlayError::Export(format!(
                "Failed to create file {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut writer = BufWriter::new(file);
        report.export_csv(&mut writer)?;
        println!("Budget report exported to: {}", path.display());
    } else {
        println!("{}", report.format_terminal());
    }

    Ok(())
}

/// Handle the insights report
fn handle_insights_report(
    storage: &Storage,
    settings: &Settings,
    period: Option<String>,
    date: Option<String>,
    output: Option<PathBuf>,
) -> OutlayResult<()> {
    let period = parse_period(period, settings.default_period)?;
    let now = parse_reference_date(date)?;

    let report = InsightsReport::generate(storage, period, now)?;

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            crate::error::OutlayError::Export(format!(
                "Failed to create file {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut writer = BufWriter::new(file);
        report.export_csv(&mut writer)?;
        println!("Insights report exported to: {}", path.display());
    } else {
        println!("{}", report.format_terminal());
    }

    Ok(())
}

/// Parse a reporting period argument, falling back to the configured default
fn parse_period(
    period: Option<String>,
    default: ReportingPeriod,
) -> OutlayResult<ReportingPeriod> {
    match period {
        Some(s) => ReportingPeriod::parse(&s).ok_or_else(|| {
            crate::error::OutlayError::Validation(format!(
                "Invalid period: '{}'. Use week, month, or year",
                s
            ))
        }),
        None => Ok(default),
    }
}

/// Parse a reference date argument, falling back to today
fn parse_reference_date(date: Option<String>) -> OutlayResult<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            crate::error::OutlayError::Validation(format!(
                "Invalid date format: '{}'. Use YYYY-MM-DD",
                s
            ))
        }),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
