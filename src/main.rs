use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use outlay::cli::{
    handle_bill_command, handle_category_command, handle_expense_command, handle_export_command,
    handle_goal_command, handle_import_command, handle_recurring_command, handle_report_command,
    BillCommands, CategoryCommands, ExpenseCommands, ExportCommands, GoalCommands,
    RecurringCommands, ReportCommands,
};
use outlay::config::{paths::OutlayPaths, settings::Settings};
use outlay::storage::Storage;

#[derive(Parser)]
#[command(
    name = "outlay",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "Outlay is a terminal-based personal expense tracker. It keeps \
                  your spending, upcoming bills, and savings goals in plain local \
                  files and turns them into dashboards, trends, and forecasts."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
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

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Category management commands
    #[command(subcommand, alias = "cat")]
    Category(CategoryCommands),

    /// Bill management commands
    #[command(subcommand)]
    Bill(BillCommands),

    /// Savings goal management commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Recurring expense commands
    #[command(subcommand, alias = "rec")]
    Recurring(RecurringCommands),

    /// Reports and analysis
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data to CSV, JSON, or YAML
    #[command(subcommand)]
    Export(ExportCommands),

    /// Import expenses from a CSV file
    Import {
        /// Path to CSV file
        file: String,

        /// Date format in the file (e.g., "%m/%d/%Y")
        #[arg(long)]
        date_format: Option<String>,

        /// Treat the first row as data, not a header
        #[arg(long)]
        no_header: bool,
    },

    /// Initialize the data directory with starter categories
    Init,

    /// Show or change configuration
    Config {
        /// Set the default reporting period (week, month, year)
        #[arg(long)]
        period: Option<String>,

        /// Set the monthly budget (e.g., "1500"), "none" to clear
        #[arg(long)]
        budget: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = OutlayPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Dashboard {
            period,
            date,
            output,
        }) => {
            handle_report_command(
                &storage,
                &settings,
                ReportCommands::Dashboard {
                    period,
                    date,
                    output,
                },
            )?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Bill(cmd)) => {
            handle_bill_command(&storage, cmd)?;
        }
        Some(Commands::Goal(cmd)) => {
            handle_goal_command(&storage, cmd)?;
        }
        Some(Commands::Recurring(cmd)) => {
            handle_recurring_command(&storage, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Import {
            file,
            date_format,
            no_header,
        }) => {
            handle_import_command(&storage, &file, date_format, no_header)?;
        }
        Some(Commands::Init) => {
            println!("Initializing Outlay at: {}", paths.data_dir().display());
            outlay::storage::init::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Starter categories have been created:");
            println!("  Groceries, Utilities, Entertainment, Transport, Dining Out, Rent");
            println!();
            println!("Run 'outlay expense add <title> <amount>' to record your first expense.");
            println!("Run 'outlay dashboard' to see your spending summary.");
        }
        Some(Commands::Config { period, budget }) => {
            handle_config_command(&paths, settings, period, budget)?;
        }
        None => {
            println!("Outlay - Terminal-based personal expense tracker");
            println!();
            println!("Run 'outlay --help' for usage information.");
            println!("Run 'outlay dashboard' to see your spending summary.");
        }
    }

    Ok(())
}

fn handle_config_command(
    paths: &OutlayPaths,
    mut settings: Settings,
    period: Option<String>,
    budget: Option<String>,
) -> Result<()> {
    let mut changed = false;

    if let Some(period_str) = period {
        let parsed = outlay::models::ReportingPeriod::parse(&period_str).ok_or_else(|| {
            outlay::error::OutlayError::Validation(format!(
                "Invalid period: '{}'. Use week, month, or year",
                period_str
            ))
        })?;
        settings.default_period = parsed;
        changed = true;
    }

    if let Some(budget_str) = budget {
        if budget_str.to_lowercase() == "none" {
            settings.monthly_budget = None;
        } else {
            let amount = outlay::models::Money::parse(&budget_str).map_err(|e| {
                outlay::error::OutlayError::Validation(format!("Invalid budget amount: {}", e))
            })?;
            settings.monthly_budget = Some(amount);
        }
        changed = true;
    }

    if changed {
        settings.save(paths)?;
        println!("Settings updated.");
        println!();
    }

    println!("Outlay Configuration");
    println!("====================");
    println!("Data directory: {}", paths.data_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!();
    println!("Settings:");
    println!("  Default period: {}", settings.default_period);
    println!(
        "  Currency:       {} ({})",
        settings.currency_code, settings.currency_symbol
    );
    match settings.monthly_budget {
        Some(budget) => println!("  Monthly budget: {}", budget),
        None => println!("  Monthly budget: not set"),
    }

    Ok(())
}
