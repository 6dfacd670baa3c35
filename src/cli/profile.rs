//! Profile CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, CategoryType, Money, ProfileSettings, ProfileUpdate, SavingsGoal};
use crate::storage::Storage;

use super::{amount_formatter, open_ledger, parse_amount, save};

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show balance, categories and savings goals
    Show,
    /// Set the current balance by hand
    Balance {
        /// New balance
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Hide or show amounts in all output
    HideAmounts {
        /// on or off
        #[arg(action = clap::ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
        hide: bool,
    },
    /// Recompute the balance from all transactions and compare
    Verify {
        /// Overwrite the stored balance with the recomputed one
        #[arg(long)]
        fix: bool,
    },
    /// Add a spending category
    AddCategory {
        name: String,
        /// fixed, needs, wants or savings
        kind: CategoryType,
    },
    /// Remove a spending category; past transactions keep their copy
    RemoveCategory {
        /// Category name or ID
        name: String,
    },
    /// Add a savings goal
    AddGoal {
        name: String,
        /// Target amount
        target: String,
    },
}

/// Handle a profile command
pub fn handle_profile_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ProfileCommands,
) -> FinanceResult<()> {
    let (mut ledger, audit) = open_ledger(storage, settings)?;
    let fmt = amount_formatter(settings, &ledger);

    match cmd {
        ProfileCommands::Show => {
            let profile = ledger.profile();
            println!("Balance:         {}", fmt.format(profile.current_balance));
            println!("Opening balance: {}", fmt.format(ledger.opening_balance()));
            println!("Transactions:    {}", ledger.transactions().len());
            println!("Hide amounts:    {}", profile.settings.hide_amounts);
            println!();
            println!("Categories:");
            if profile.categories.is_empty() {
                println!("  (none)");
            }
            for category in &profile.categories {
                println!("  {:10} {}", category.kind.as_str(), category.name);
            }
            println!();
            println!("Savings goals:");
            if profile.savings_goals.is_empty() {
                println!("  (none)");
            }
            for goal in &profile.savings_goals {
                println!(
                    "  {} {} / {} ({:.1}%)",
                    goal.name,
                    fmt.format(goal.current_amount),
                    fmt.format(goal.target_amount),
                    goal.progress_percent()
                );
            }
        }

        ProfileCommands::Balance { amount } => {
            let balance = Money::parse(&amount).map_err(|e| {
                FinanceError::Validation(format!("Invalid amount '{}': {}", amount, e))
            })?;
            ledger.set_current_balance(balance);
            save(storage, &ledger, &audit)?;
            println!("Balance set to {}", fmt.format(balance));
        }

        ProfileCommands::HideAmounts { hide } => {
            ledger.update_profile(ProfileUpdate {
                settings: Some(ProfileSettings { hide_amounts: hide }),
                ..ProfileUpdate::default()
            });
            save(storage, &ledger, &audit)?;
            println!("Amounts are now {}", if hide { "hidden" } else { "shown" });
        }

        ProfileCommands::Verify { fix } => {
            let check = ledger.verify_balance();
            if check.is_consistent() {
                println!("Balance OK: {}", fmt.format(check.actual));
                return Ok(());
            }

            println!("Balance mismatch:");
            println!("  Stored:      {}", fmt.format(check.actual));
            println!("  Recomputed:  {}", fmt.format(check.expected));
            println!("  Difference:  {}", fmt.format(check.discrepancy()));

            if fix {
                ledger.rebuild_balance();
                save(storage, &ledger, &audit)?;
                println!("Balance reset to {}", fmt.format(check.expected));
            } else {
                println!("Run with --fix to reset the stored balance.");
            }
        }

        ProfileCommands::AddCategory { name, kind } => {
            if ledger.profile().find_category(&name).is_some() {
                return Err(FinanceError::Validation(format!(
                    "Category '{}' already exists",
                    name
                )));
            }

            let category = Category::new(name, kind);
            let mut categories = ledger.profile().categories.clone();
            categories.push(category.clone());
            ledger.update_profile(ProfileUpdate {
                categories: Some(categories),
                ..ProfileUpdate::default()
            });
            save(storage, &ledger, &audit)?;
            println!("Added category {}", category);
        }

        ProfileCommands::RemoveCategory { name } => {
            let category = ledger
                .profile()
                .find_category(&name)
                .cloned()
                .ok_or_else(|| FinanceError::category_not_found(&name))?;

            let categories = ledger
                .profile()
                .categories
                .iter()
                .filter(|c| c.id != category.id)
                .cloned()
                .collect();
            ledger.update_profile(ProfileUpdate {
                categories: Some(categories),
                ..ProfileUpdate::default()
            });
            save(storage, &ledger, &audit)?;
            println!("Removed category {}", category);
        }

        ProfileCommands::AddGoal { name, target } => {
            let goal = SavingsGoal::new(name, parse_amount(&target)?);
            let mut goals = ledger.profile().savings_goals.clone();
            goals.push(goal.clone());
            ledger.update_profile(ProfileUpdate {
                savings_goals: Some(goals),
                ..ProfileUpdate::default()
            });
            save(storage, &ledger, &audit)?;
            println!("Added savings goal {} ({})", goal.name, fmt.format(goal.target_amount));
        }
    }

    Ok(())
}
