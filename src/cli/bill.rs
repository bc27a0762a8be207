//! Bill CLI commands
//!
//! Implements CLI commands for upcoming bill management.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::display::bill::{format_bill_details, format_bill_list};
use crate::error::{OutlayError, OutlayResult};
use crate::models::Money;
use crate::services::{BillService, CategoryService, CreateBillInput};
use crate::storage::Storage;

/// Bill subcommands
#[derive(Subcommand)]
pub enum BillCommands {
    /// Add a new bill
    Add {
        /// Bill title
        title: String,
        /// Amount (e.g., "65.00")
        amount: String,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: String,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Mark as paid automatically
        #[arg(long)]
        auto: bool,
    },
    /// List all bills
    List,
    /// List bills due soon
    Upcoming {
        /// How many days ahead to look
        #[arg(short, long, default_value = "30")]
        days: i64,
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Show bill details
    Show {
        /// Bill title or ID
        bill: String,
    },
    /// Edit a bill
    Edit {
        /// Bill title or ID
        bill: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Mark as paid automatically
        #[arg(long)]
        auto: bool,
        /// Mark as paid manually
        #[arg(long)]
        manual: bool,
        /// New category ("none" to clear)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a bill
    Delete {
        /// Bill title or ID
        bill: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a bill command
pub fn handle_bill_command(storage: &Storage, cmd: BillCommands) -> OutlayResult<()> {
    let service = BillService::new(storage);
    let category_service = CategoryService::new(storage);

    match cmd {
        BillCommands::Add {
            title,
            amount,
            due,
            category,
            auto,
        } => {
            let amount = Money::parse(&amount).map_err(|e| {
                OutlayError::Validation(format!(
                    "Invalid amount format: '{}'. Use format like '65.00'. Error: {}",
                    amount, e
                ))
            })?;

            let due_date = NaiveDate::parse_from_str(&due, "%Y-%m-%d").map_err(|_| {
                OutlayError::Validation(format!("Invalid due date: '{}'. Use YYYY-MM-DD", due))
            })?;

            let category_id = if let Some(cat_name) = &category {
                let cat = category_service
                    .find(cat_name)?
                    .ok_or_else(|| OutlayError::category_not_found(cat_name))?;
                Some(cat.id)
            } else {
                None
            };

            let input = CreateBillInput {
                title,
                amount,
                due_date,
                category_id,
                auto_paid: auto,
            };

            let bill = service.create(input)?;

            println!("Created bill:");
            println!("  ID:     {}", bill.id);
            println!("  Title:  {}", bill.title);
            println!("  Amount: {}", bill.amount);
            println!("  Due:    {}", bill.due_date);
            if bill.auto_paid {
                println!("  Paid automatically");
            }
        }

        BillCommands::List => {
            let bills = service.list()?;
            let now = chrono::Local::now().date_naive();
            print!("{}", format_bill_list(&bills, now));
        }

        BillCommands::Upcoming { days, date } => {
            let now = parse_reference_date(date)?;
            let bills = service.upcoming(now, days)?;

            if bills.is_empty() {
                println!("No bills due in the next {} days.", days);
            } else {
                print!("{}", format_bill_list(&bills, now));
            }
        }

        BillCommands::Show { bill } => {
            let b = service
                .find(&bill)?
                .ok_or_else(|| OutlayError::bill_not_found(&bill))?;

            let category_name = if let Some(cat_id) = b.category_id {
                category_service.get(cat_id)?.map(|c| c.name)
            } else {
                None
            };

            let now = chrono::Local::now().date_naive();
            print!("{}", format_bill_details(&b, category_name.as_deref(), now));
        }

        BillCommands::Edit {
            bill,
            title,
            amount,
            due,
            auto,
            manual,
            category,
        } => {
            let b = service
                .find(&bill)?
                .ok_or_else(|| OutlayError::bill_not_found(&bill))?;

            if auto && manual {
                return Err(OutlayError::Validation(
                    "Pass either --auto or --manual, not both".into(),
                ));
            }

            let new_amount = if let Some(amt_str) = amount {
                Some(
                    Money::parse(&amt_str)
                        .map_err(|e| OutlayError::Validation(format!("Invalid amount: {}", e)))?,
                )
            } else {
                None
            };

            let new_due = if let Some(due_str) = due {
                Some(
                    NaiveDate::parse_from_str(&due_str, "%Y-%m-%d").map_err(|_| {
                        OutlayError::Validation(format!(
                            "Invalid due date: '{}'. Use YYYY-MM-DD",
                            due_str
                        ))
                    })?,
                )
            } else {
                None
            };

            let new_auto = if auto {
                Some(true)
            } else if manual {
                Some(false)
            } else {
                None
            };

            let new_category_id = if let Some(cat_name) = category {
                if cat_name.is_empty() || cat_name.to_lowercase() == "none" {
                    Some(None)
                } else {
                    let cat = category_service
                        .find(&cat_name)?
                        .ok_or_else(|| OutlayError::category_not_found(&cat_name))?;
                    Some(Some(cat.id))
                }
            } else {
                None
            };

            let updated =
                service.update(b.id, title, new_amount, new_due, new_auto, new_category_id)?;

            println!("Updated bill: {}", updated.title);
            println!("  Amount: {}", updated.amount);
            println!("  Due:    {}", updated.due_date);
        }

        BillCommands::Delete { bill, force } => {
            let b = service
                .find(&bill)?
                .ok_or_else(|| OutlayError::bill_not_found(&bill))?;

            if !force {
                println!("About to delete bill:");
                println!("  Title:  {}", b.title);
                println!("  Amount: {}", b.amount);
                println!("  Due:    {}", b.due_date);
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(b.id)?;
            println!("Deleted bill: {} ({})", deleted.title, deleted.due_date);
        }
    }

    Ok(())
}

fn parse_reference_date(date: Option<String>) -> OutlayResult<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            OutlayError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
        }),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
