//! Budget CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_budget_overview;
use crate::error::{FinanceError, FinanceResult};
use crate::services::{last_salary_amount, PercentSplit};
use crate::storage::Storage;

use super::{amount_formatter, open_ledger, parse_amount, save};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show targets, spend and remaining for the current cycle
    Show,
    /// Distribute an amount across the buckets
    Allocate {
        /// Amount to distribute
        amount: String,
        /// Split in percent as FIXED NEEDS WANTS SAVINGS (defaults to the configured split)
        #[arg(long, num_args = 4, value_names = ["FIXED", "NEEDS", "WANTS", "SAVINGS"])]
        split: Option<Vec<String>>,
    },
    /// Reallocate the most recent salary with a custom split in percent
    Split {
        fixed: String,
        needs: String,
        wants: String,
        savings: String,
    },
}

fn percent_split(values: &[String]) -> PercentSplit {
    let get = |i: usize| values.get(i).map(String::as_str).unwrap_or("");
    PercentSplit::parse(get(0), get(1), get(2), get(3))
}

fn incomplete_split(split: &PercentSplit) -> FinanceError {
    FinanceError::Validation(format!(
        "Split must total 100%, got {:.1}%",
        split.total()
    ))
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FinanceResult<()> {
    let (mut ledger, audit) = open_ledger(storage, settings)?;
    let fmt = amount_formatter(settings, &ledger);
    let tolerance = settings.split_tolerance_percent;

    match cmd {
        BudgetCommands::Show => {
            let spent = ledger.compute_cycle_spend();
            let profile = ledger.profile();
            print!(
                "{}",
                format_budget_overview(
                    &profile.budget_distribution,
                    &spent,
                    &profile.budget_split,
                    &fmt
                )
            );
        }

        BudgetCommands::Allocate { amount, split } => {
            let amount = parse_amount(&amount)?;
            let split = match split {
                Some(values) => {
                    let split = percent_split(&values);
                    if !split.is_complete(tolerance) {
                        return Err(incomplete_split(&split));
                    }
                    Some(split.to_split())
                }
                None => None,
            };

            ledger.allocate_budget(amount, split);
            save(storage, &ledger, &audit)?;

            println!("Allocated {}:", fmt.format(amount));
            for (kind, target) in ledger.profile().budget_distribution.iter() {
                println!("  {:8} {}", kind.as_str(), fmt.format(target));
            }
        }

        BudgetCommands::Split {
            fixed,
            needs,
            wants,
            savings,
        } => {
            let split = PercentSplit::parse(&fixed, &needs, &wants, &savings);
            if !split.is_complete(tolerance) {
                return Err(incomplete_split(&split));
            }

            let Some(distribution) = ledger.apply_custom_split(split, tolerance) else {
                let salary = last_salary_amount(ledger.transactions(), ledger.classifier());
                return Err(FinanceError::Validation(match salary {
                    Some(_) => "The most recent salary is zero; nothing to split".into(),
                    None => "No salary recorded yet; record one before setting a split".into(),
                }));
            };
            save(storage, &ledger, &audit)?;

            println!("Applied split {}:", ledger.profile().budget_split);
            for (kind, target) in distribution.iter() {
                println!("  {:8} {}", kind.as_str(), fmt.format(target));
            }
        }
    }

    Ok(())
}
