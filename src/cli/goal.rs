//! Savings goal CLI commands
//!
//! Implements CLI commands for savings goal management.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::display::goal::{format_goal_details, format_goal_list};
use crate::error::{OutlayError, OutlayResult};
use crate::models::Money;
use crate::services::GoalService;
use crate::storage::Storage;

/// Savings goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Add a new savings goal
    Add {
        /// Goal title
        title: String,
        /// Target amount (e.g., "5000")
        target: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<String>,
        /// Hex color for charts
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List all goals
    List,
    /// Show goal details
    Show {
        /// Goal title or ID
        goal: String,
    },
    /// Add money toward a goal
    Contribute {
        /// Goal title or ID
        goal: String,
        /// Contribution amount (e.g., "250.00")
        amount: String,
    },
    /// Edit a goal
    Edit {
        /// Goal title or ID
        goal: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New target amount
        #[arg(long)]
        target: Option<String>,
        /// New deadline ("none" to clear)
        #[arg(short, long)]
        deadline: Option<String>,
        /// New hex color
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a goal
    Delete {
        /// Goal title or ID
        goal: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a goal command
pub fn handle_goal_command(storage: &Storage, cmd: GoalCommands) -> OutlayResult<()> {
    let service = GoalService::new(storage);

    match cmd {
        GoalCommands::Add {
            title,
            target,
            deadline,
            color,
        } => {
            let target = Money::parse(&target).map_err(|e| {
                OutlayError::Validation(format!(
                    "Invalid target amount: '{}'. Use format like '5000'. Error: {}",
                    target, e
                ))
            })?;

            let deadline = deadline
                .map(|s| {
                    NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
                        OutlayError::Validation(format!(
                            "Invalid deadline: '{}'. Use YYYY-MM-DD",
                            s
                        ))
                    })
                })
                .transpose()?;

            let goal = service.create(&title, target, deadline, color.as_deref())?;

            println!("Created goal: {}", goal.title);
            println!("  Target: {}", goal.target_amount);
            if let Some(deadline) = goal.deadline {
                println!("  Deadline: {}", deadline);
            }
            println!("  ID: {}", goal.id);
        }

        GoalCommands::List => {
            let goals = service.list()?;
            print!("{}", format_goal_list(&goals));
        }

        GoalCommands::Show { goal } => {
            let g = service
                .find(&goal)?
                .ok_or_else(|| OutlayError::goal_not_found(&goal))?;

            print!("{}", format_goal_details(&g));
        }

        GoalCommands::Contribute { goal, amount } => {
            let g = service
                .find(&goal)?
                .ok_or_else(|| OutlayError::goal_not_found(&goal))?;

            let amount = Money::parse(&amount).map_err(|e| {
                OutlayError::Validation(format!("Invalid contribution amount: {}", e))
            })?;

            let updated = service.contribute(g.id, amount)?;

            println!("Contributed {} to '{}'", amount, updated.title);
            println!(
                "  Saved: {} of {} ({:.0}%)",
                updated.current_amount,
                updated.target_amount,
                updated.progress_percent()
            );
            if updated.is_reached() {
                println!("  Goal reached!");
            }
        }

        GoalCommands::Edit {
            goal,
            title,
            target,
            deadline,
            color,
        } => {
            let g = service
                .find(&goal)?
                .ok_or_else(|| OutlayError::goal_not_found(&goal))?;

            let new_target = if let Some(target_str) = target {
                Some(Money::parse(&target_str).map_err(|e| {
                    OutlayError::Validation(format!("Invalid target amount: {}", e))
                })?)
            } else {
                None
            };

            let new_deadline = if let Some(deadline_str) = deadline {
                if deadline_str.is_empty() || deadline_str.to_lowercase() == "none" {
                    // Clear deadline
                    Some(None)
                } else {
                    let date =
                        NaiveDate::parse_from_str(&deadline_str, "%Y-%m-%d").map_err(|_| {
                            OutlayError::Validation(format!(
                                "Invalid deadline: '{}'. Use YYYY-MM-DD",
                                deadline_str
                            ))
                        })?;
                    Some(Some(date))
                }
            } else {
                None
            };

            let updated = service.update(g.id, title, new_target, new_deadline, color)?;

            println!("Updated goal: {}", updated.title);
            println!(
                "  Saved: {} of {} ({:.0}%)",
                updated.current_amount,
                updated.target_amount,
                updated.progress_percent()
            );
        }

        GoalCommands::Delete { goal, force } => {
            let g = service
                .find(&goal)?
                .ok_or_else(|| OutlayError::goal_not_found(&goal))?;

            if !force {
                println!("About to delete goal:");
                println!("  Title:  {}", g.title);
                println!("  Saved:  {} of {}", g.current_amount, g.target_amount);
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(g.id)?;
            println!("Deleted goal: {}", deleted.title);
        }
    }

    Ok(())
}
