//! Expense CLI commands
//!
//! Implements CLI commands for expense management.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::error::{OutlayError, OutlayResult};
use crate::models::Money;
use crate::services::{
    CategoryService, CreateExpenseInput, ExpenseFilter, ExpenseService, SortDirection, SortField,
};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// Expense title
        title: String,
        /// Amount (e.g., "12.50" or "8")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List expenses
    List {
        /// Filter by category name
        #[arg(short, long)]
        category: Option<String>,
        /// Search titles and notes
        #[arg(short, long)]
        search: Option<String>,
        /// Number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Sort field (date, amount)
        #[arg(long, default_value = "date")]
        sort: String,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },
    /// Show expense details
    Show {
        /// Expense title or ID
        expense: String,
    },
    /// Edit an expense
    Edit {
        /// Expense title or ID
        expense: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category ("none" to clear)
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense title or ID
        expense: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> OutlayResult<()> {
    let service = ExpenseService::new(storage);
    let category_service = CategoryService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            title,
            amount,
            category,
            date,
            notes,
        } => {
            // Parse amount
            let amount = Money::parse(&amount).map_err(|e| {
                OutlayError::Validation(format!(
                    "Invalid amount format: '{}'. Use format like '12.50' or '8'. Error: {}",
                    amount, e
                ))
            })?;

            // Parse date (default to today)
            let date = if let Some(date_str) = date {
                NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
                    OutlayError::Validation(format!(
                        "Invalid date format: '{}'. Use YYYY-MM-DD",
                        date_str
                    ))
                })?
            } else {
                chrono::Local::now().date_naive()
            };

            // Find category
            let category_id = if let Some(cat_name) = &category {
                let cat = category_service
                    .find(cat_name)?
                    .ok_or_else(|| OutlayError::category_not_found(cat_name))?;
                Some(cat.id)
            } else {
                None
            };

            let input = CreateExpenseInput {
                title,
                amount,
                date,
                category_id,
                currency: Some(settings.currency_code.clone()),
                notes,
            };

            let expense = service.create(input)?;

            println!("Created expense:");
            println!("  ID:       {}", expense.id);
            println!("  Date:     {}", expense.date);
            println!("  Title:    {}", expense.title);
            println!("  Amount:   {}", expense.amount);
            if let Some(cat_id) = expense.category_id {
                if let Some(cat) = category_service.get(cat_id)? {
                    println!("  Category: {}", cat.name);
                }
            }
        }

        ExpenseCommands::List {
            category,
            search,
            limit,
            from,
            to,
            sort,
            asc,
        } => {
            let mut filter = ExpenseFilter::new().limit(limit);

            if let Some(query) = search {
                filter = filter.search(query);
            }

            // Apply category filter
            if let Some(cat_name) = &category {
                let cat = category_service
                    .find(cat_name)?
                    .ok_or_else(|| OutlayError::category_not_found(cat_name))?;
                filter = filter.category(cat.id);
            }

            // Apply date range filter
            if let Some(from_str) = from {
                let from_date = NaiveDate::parse_from_str(&from_str, "%Y-%m-%d").map_err(|_| {
                    OutlayError::Validation(format!(
                        "Invalid date format: '{}'. Use YYYY-MM-DD",
                        from_str
                    ))
                })?;
                filter.start_date = Some(from_date);
            }

            if let Some(to_str) = to {
                let to_date = NaiveDate::parse_from_str(&to_str, "%Y-%m-%d").map_err(|_| {
                    OutlayError::Validation(format!(
                        "Invalid date format: '{}'. Use YYYY-MM-DD",
                        to_str
                    ))
                })?;
                filter.end_date = Some(to_date);
            }

            // Apply sort
            let field = match sort.to_lowercase().as_str() {
                "date" => SortField::Date,
                "amount" => SortField::Amount,
                _ => {
                    return Err(OutlayError::Validation(format!(
                        "Invalid sort field: '{}'. Use date or amount",
                        sort
                    )))
                }
            };
            let direction = if asc {
                SortDirection::Asc
            } else {
                SortDirection::Desc
            };
            filter = filter.sort_by(field, direction);

            let expenses = service.list(filter)?;
            let categories = category_service.list()?;

            print!("{}", format_expense_list(&expenses, &categories));

            let listed_total: Money = expenses.iter().map(|e| e.amount).sum();
            println!(
                "\nShowing {} of {} expenses · Total: {}",
                expenses.len(),
                service.count()?,
                listed_total
            );
        }

        ExpenseCommands::Show { expense } => {
            let exp = service
                .find(&expense)?
                .ok_or_else(|| OutlayError::expense_not_found(&expense))?;

            let category_name = if let Some(cat_id) = exp.category_id {
                category_service.get(cat_id)?.map(|c| c.name)
            } else {
                None
            };

            print!("{}", format_expense_details(&exp, category_name.as_deref()));
        }

        ExpenseCommands::Edit {
            expense,
            title,
            amount,
            category,
            date,
            notes,
        } => {
            let exp = service
                .find(&expense)?
                .ok_or_else(|| OutlayError::expense_not_found(&expense))?;

            // Parse new values if provided
            let new_amount = if let Some(amt_str) = amount {
                Some(
                    Money::parse(&amt_str)
                        .map_err(|e| OutlayError::Validation(format!("Invalid amount: {}", e)))?,
                )
            } else {
                None
            };

            let new_date = if let Some(date_str) = date {
                Some(
                    NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
                        OutlayError::Validation(format!(
                            "Invalid date format: '{}'. Use YYYY-MM-DD",
                            date_str
                        ))
                    })?,
                )
            } else {
                None
            };

            let new_category_id = if let Some(cat_name) = category {
                if cat_name.is_empty() || cat_name.to_lowercase() == "none" {
                    // Clear category
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
                service.update(exp.id, title, new_amount, new_date, new_category_id, notes)?;

            println!("Updated expense: {}", updated.id);
            println!("  Date:   {}", updated.date);
            println!("  Title:  {}", updated.title);
            println!("  Amount: {}", updated.amount);
        }

        ExpenseCommands::Delete { expense, force } => {
            let exp = service
                .find(&expense)?
                .ok_or_else(|| OutlayError::expense_not_found(&expense))?;

            if !force {
                println!("About to delete expense:");
                println!("  Date:   {}", exp.date);
                println!("  Title:  {}", exp.title);
                println!("  Amount: {}", exp.amount);
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(exp.id)?;
            println!(
                "Deleted expense: {} ({} {})",
                deleted.id, deleted.date, deleted.title
            );
        }
    }

    Ok(())
}
