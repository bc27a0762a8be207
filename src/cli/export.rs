//! CLI commands for data export
//!
//! Provides commands for exporting data in various formats.

use crate::error::OutlayResult;
use crate::export::{csv, json, yaml};
use crate::storage::Storage;
use clap::{Subcommand, ValueEnum};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (expenses only)
    Csv,
    /// JSON format (full database)
    Json,
    /// YAML format (full database, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all data to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export expenses to CSV
    Expenses {
        /// Output file path
        output: PathBuf,
    },

    /// Export bills to CSV
    Bills {
        /// Output file path
        output: PathBuf,
    },

    /// Export goals to CSV
    Goals {
        /// Output file path
        output: PathBuf,
    },

    /// Show export information without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> OutlayResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => handle_export_all(storage, output, format, pretty),
        ExportCommands::Expenses { output } => handle_export_expenses(storage, output),
        ExportCommands::Bills { output } => handle_export_bills(storage, output),
        ExportCommands::Goals { output } => handle_export_goals(storage, output),
        ExportCommands::Info => handle_export_info(storage),
    }
}

/// Handle full export
fn handle_export_all(
    storage: &Storage,
    output: PathBuf,
    format: ExportFormat,
    pretty: bool,
) -> OutlayResult<()> {
    let file = File::create(&output).map_err(|e| {
        crate::error::OutlayError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => {
            // For CSV, export expenses as the primary data
            csv::export_expenses_csv(storage, &mut writer)?;
            println!("Expenses exported to: {}", output.display());
            println!("Note: CSV format exports expenses only. Use JSON or YAML for full database export.");
        }
        ExportFormat::Json => {
            json::export_full_json(storage, &mut writer, pretty)?;
            println!("Full database exported to: {}", output.display());
        }
        ExportFormat::Yaml => {
            yaml::export_full_yaml(storage, &mut writer)?;
            println!("Full database exported to: {}", output.display());
        }
    }

    Ok(())
}

/// Handle expenses export
fn handle_export_expenses(storage: &Storage, output: PathBuf) -> OutlayResult<()> {
    let file = File::create(&output).map_err(|e| {
        crate::error::OutlayError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    csv::export_expenses_csv(storage, &mut writer)?;

    let count = storage.expenses.get_all()?.len();
    println!("Exported {} expenses to: {}", count, output.display());

    Ok(())
}

/// Handle bills export
fn handle_export_bills(storage: &Storage, output: PathBuf) -> OutlayResult<()> {
    let file = File::create(&output).map_err(|e| {
        crate::error::OutlayError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    csv::export_bills_csv(storage, &mut writer)?;

    let count = storage.bills.get_all()?.len();
    println!("Exported {} bills to: {}", count, output.display());

    Ok(())
}

/// Handle goals export
fn handle_export_goals(storage: &Storage, output: PathBuf) -> OutlayResult<()> {
    let file = File::create(&output).map_err(|e| {
        crate::error::OutlayError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    csv::export_goals_csv(storage, &mut writer)?;

    let count = storage.goals.get_all()?.len();
    println!("Exported {} goals to: {}", count, output.display());

    Ok(())
}

/// Show export information
fn handle_export_info(storage: &Storage) -> OutlayResult<()> {
    let export = json::FullExport::from_storage(storage)?;

    println!("Export Information");
    println!("==================\n");

    println!("Schema Version: {}", export.schema_version);
    println!("App Version:    {}", export.app_version);
    println!();

    println!("Data Summary:");
    println!("  Expenses:   {}", export.metadata.expense_count);
    println!("  Categories: {}", export.metadata.category_count);
    println!("  Bills:      {}", export.metadata.bill_count);
    println!("  Goals:      {}", export.metadata.goal_count);
    println!("  Recurring:  {}", export.metadata.recurring_count);
    println!();

    if let Some(earliest) = &export.metadata.earliest_expense {
        println!("Expense Date Range:");
        println!("  Earliest: {}", earliest);
    }
    if let Some(latest) = &export.metadata.latest_expense {
        println!("  Latest:   {}", latest);
    }

    println!("\nAvailable Export Formats:");
    println!("  csv  - CSV format (expenses, bills, or goals)");
    println!("  json - JSON format (full database, machine-readable)");
    println!("  yaml - YAML format (full database, human-readable)");

    println!("\nExamples:");
    println!("  outlay export all backup.json --format json --pretty");
    println!("  outlay export expenses expenses.csv");
    println!("  outlay export goals goals.csv");

    Ok(())
}
