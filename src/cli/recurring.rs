//! Recurring expense CLI commands
//!
//! Implements CLI commands for recurring expense definitions and
//! materializing the expenses they are due to create.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::error::{OutlayError, OutlayResult};
use crate::models::{Frequency, Money};
use crate::services::{CategoryService, RecurringService};
use crate::storage::Storage;

/// Recurring expense subcommands
#[derive(Subcommand)]
pub enum RecurringCommands {
    /// Add a recurring expense definition
    Add {
        /// Title for generated expenses
        title: String,
        /// Amount (e.g., "9.99")
        amount: String,
        /// How often the expense repeats (daily, weekly, monthly)
        #[arg(short, long, default_value = "monthly")]
        frequency: String,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List recurring definitions
    List,
    /// Create expenses for definitions that are due
    Apply {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a recurring definition
    Delete {
        /// Definition title or ID
        recurring: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a recurring command
pub fn handle_recurring_command(storage: &Storage, cmd: RecurringCommands) -> OutlayResult<()> {
    let service = RecurringService::new(storage);
    let category_service = CategoryService::new(storage);

    match cmd {
        RecurringCommands::Add {
            title,
            amount,
            frequency,
            category,
        } => {
            let amount = Money::parse(&amount).map_err(|e| {
                OutlayError::Validation(format!(
                    "Invalid amount format: '{}'. Use format like '9.99'. Error: {}",
                    amount, e
                ))
            })?;

            let frequency = Frequency::parse(&frequency).ok_or_else(|| {
                OutlayError::Validation(format!(
                    "Invalid frequency: '{}'. Use daily, weekly, or monthly",
                    frequency
                ))
            })?;

            let category_id = if let Some(cat_name) = &category {
                let cat = category_service
                    .find(cat_name)?
                    .ok_or_else(|| OutlayError::category_not_found(cat_name))?;
                Some(cat.id)
            } else {
                None
            };

            let def = service.create(&title, amount, frequency, category_id)?;

            println!("Created recurring expense: {}", def.title);
            println!("  Amount:    {}", def.amount);
            println!("  Frequency: {}", def.frequency);
            println!("  ID:        {}", def.id);
            println!();
            println!("Run 'outlay recurring apply' to create expenses that are due.");
        }

        RecurringCommands::List => {
            let definitions = service.list()?;

            if definitions.is_empty() {
                println!("No recurring expenses defined.");
                return Ok(());
            }

            println!(
                "{:<25} {:>12} {:<10} {}",
                "Title", "Amount", "Frequency", "Last Applied"
            );
            println!("{}", "-".repeat(62));

            for def in &definitions {
                let last = match def.last_applied {
                    Some(date) => date.to_string(),
                    None => "never".to_string(),
                };
                println!(
                    "{:<25} {:>12} {:<10} {}",
                    def.title,
                    def.amount.to_string(),
                    def.frequency.to_string(),
                    last
                );
            }

            println!("\nShowing {} recurring expenses", definitions.len());
        }

        RecurringCommands::Apply { date } => {
            let now = match date {
                Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
                    OutlayError::Validation(format!(
                        "Invalid date format: '{}'. Use YYYY-MM-DD",
                        s
                    ))
                })?,
                None => chrono::Local::now().date_naive(),
            };

            let created = service.apply_due(now)?;

            if created.is_empty() {
                println!("No recurring expenses due.");
            } else {
                println!("Created {} expenses:", created.len());
                for expense in &created {
                    println!("  {} {} {}", expense.date, expense.title, expense.amount);
                }
            }
        }

        RecurringCommands::Delete { recurring, force } => {
            let def = service
                .find(&recurring)?
                .ok_or_else(|| OutlayError::recurring_not_found(&recurring))?;

            if !force {
                println!("About to delete recurring expense:");
                println!("  Title:     {}", def.title);
                println!("  Amount:    {}", def.amount);
                println!("  Frequency: {}", def.frequency);
                println!();
                println!("Expenses already created from it are kept.");
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(def.id)?;
            println!("Deleted recurring expense: {}", deleted.title);
        }
    }

    Ok(())
}
