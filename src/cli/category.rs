//! Category CLI commands
//!
//! Implements CLI commands for category management.

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::{OutlayError, OutlayResult};
use crate::models::Money;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Hex color (e.g., "#FF8042"), defaults to the next palette color
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Show category details with spending summary
    Show {
        /// Category name or ID
        category: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New hex color
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> OutlayResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Create { name, color } => {
            let category = service.create(&name, color.as_deref())?;

            println!("Created category: {}", category.name);
            println!("  Color: {}", category.color);
            println!("  ID:    {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let cat = service
                .find(&category)?
                .ok_or_else(|| OutlayError::category_not_found(&category))?;

            let expenses = storage.expenses.get_by_category(cat.id)?;
            let total_spent: Money = expenses.iter().map(|e| e.amount).sum();

            print!(
                "{}",
                format_category_details(&cat, expenses.len(), total_spent)
            );
        }

        CategoryCommands::Edit {
            category,
            name,
            color,
        } => {
            let cat = service
                .find(&category)?
                .ok_or_else(|| OutlayError::category_not_found(&category))?;

            if name.is_none() && color.is_none() {
                println!("No changes specified. Use --name or --color.");
                return Ok(());
            }

            let updated = service.update(cat.id, name.as_deref(), color.as_deref())?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category, force } => {
            let cat = service
                .find(&category)?
                .ok_or_else(|| OutlayError::category_not_found(&category))?;

            let orphaned = storage.expenses.get_by_category(cat.id)?.len();

            if !force {
                println!("About to delete category: {}", cat.name);
                if orphaned > 0 {
                    println!(
                        "  {} expenses reference it and will show as \"Unknown\" in reports",
                        orphaned
                    );
                }
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let (deleted, orphaned) = service.delete(cat.id)?;
            println!("Deleted category: {}", deleted.name);
            if orphaned > 0 {
                println!(
                    "  {} expenses now show under \"Unknown\" in reports",
                    orphaned
                );
            }
        }
    }

    Ok(())
}
