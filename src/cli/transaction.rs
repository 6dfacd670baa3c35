//! Transaction CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, NewTransaction, TransactionId, TransactionKind, TransactionUpdate};
use crate::services::{sort_newest_first, Ledger};
use crate::storage::Storage;

use super::{amount_formatter, open_ledger, parse_amount, parse_date, save};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// income or expense
        kind: TransactionKind,
        /// Amount (e.g. "12.50"), always positive
        amount: String,
        /// Description; incomes containing the salary marker start a new cycle
        description: String,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD), defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Mark as salary regardless of the description
        #[arg(long, conflicts_with = "not_salary")]
        salary: bool,
        /// Never treat as salary
        #[arg(long)]
        not_salary: bool,
    },
    /// List transactions, newest first
    List {
        /// Only the current budget cycle
        #[arg(long)]
        cycle: bool,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (full, txn- form, or unique prefix)
        id: String,
    },
    /// Edit a transaction; omitted fields keep their value
    Edit {
        /// Transaction ID
        id: String,
        /// New type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionKind>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// New category name or ID
        #[arg(short, long, conflicts_with = "uncategorize")]
        category: Option<String>,
        /// Remove the category
        #[arg(long)]
        uncategorize: bool,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Set the salary flag (true/false), or "auto" to use the marker
        #[arg(long)]
        salary: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

fn resolve_id(ledger: &Ledger, identifier: &str) -> FinanceResult<TransactionId> {
    ledger
        .find_transaction(identifier)
        .map(|t| t.id)
        .ok_or_else(|| FinanceError::transaction_not_found(identifier))
}

fn resolve_category(ledger: &Ledger, identifier: &str) -> FinanceResult<Category> {
    ledger
        .profile()
        .find_category(identifier)
        .cloned()
        .ok_or_else(|| FinanceError::category_not_found(identifier))
}

fn parse_salary_flag(input: &str) -> FinanceResult<Option<bool>> {
    match input.trim().to_lowercase().as_str() {
        "auto" => Ok(None),
        "true" | "yes" | "on" => Ok(Some(true)),
        "false" | "no" | "off" => Ok(Some(false)),
        other => Err(FinanceError::Validation(format!(
            "Invalid salary flag '{}'. Use true, false or auto",
            other
        ))),
    }
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    let (mut ledger, audit) = open_ledger(storage, settings)?;
    let fmt = amount_formatter(settings, &ledger);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            description,
            category,
            date,
            salary,
            not_salary,
        } => {
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => chrono::Utc::now(),
            };

            let mut new = NewTransaction::new(kind, amount, description, date);
            if let Some(cat) = category {
                new = new.with_category(resolve_category(&ledger, &cat)?);
            }
            if salary || not_salary {
                new = new.salary(salary);
            }

            let txn = ledger.record_transaction(new);
            save(storage, &ledger, &audit)?;

            println!("Recorded transaction:");
            print!(
                "{}",
                format_transaction_details(&txn, &fmt, ledger.classifier(), &settings.date_format)
            );
            println!("Balance:     {}", fmt.format(ledger.profile().current_balance));
            if ledger.classifier().is_salary(&txn) {
                println!("Salary detected: budget reallocated ({})", ledger.profile().budget_split);
            }
        }

        TransactionCommands::List { cycle, limit } => {
            let transactions = if cycle {
                ledger.current_cycle()
            } else {
                sort_newest_first(ledger.transactions())
            };
            let total = transactions.len();
            let shown: Vec<_> = transactions.into_iter().take(limit).collect();

            print!(
                "{}",
                format_transaction_register(&shown, &fmt, ledger.classifier(), &settings.date_format)
            );
            println!("\nShowing {} of {} transactions", shown.len(), total);
        }

        TransactionCommands::Show { id } => {
            let txn = ledger
                .find_transaction(&id)
                .ok_or_else(|| FinanceError::transaction_not_found(&id))?;
            print!(
                "{}",
                format_transaction_details(txn, &fmt, ledger.classifier(), &settings.date_format)
            );
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            description,
            category,
            uncategorize,
            date,
            salary,
        } => {
            let txn_id = resolve_id(&ledger, &id)?;
            let mut update = TransactionUpdate::new();

            if let Some(kind) = kind {
                update = update.kind(kind);
            }
            if let Some(amount) = amount {
                update = update.amount(parse_amount(&amount)?);
            }
            if let Some(description) = description {
                update = update.description(description);
            }
            if let Some(cat) = category {
                update = update.category(Some(resolve_category(&ledger, &cat)?));
            } else if uncategorize {
                update = update.category(None);
            }
            if let Some(date) = date {
                update = update.date(parse_date(&date)?);
            }
            if let Some(flag) = salary {
                update = update.salary(parse_salary_flag(&flag)?);
            }

            if update.is_empty() {
                return Err(FinanceError::Validation(
                    "Nothing to change. Pass at least one field to edit".into(),
                ));
            }

            let balance_before = ledger.profile().current_balance;
            ledger.edit_transaction(txn_id, update);
            save(storage, &ledger, &audit)?;

            let balance_after = ledger.profile().current_balance;
            println!("Updated transaction {}", txn_id);
            if balance_after != balance_before {
                println!(
                    "Balance:     {} -> {}",
                    fmt.format(balance_before),
                    fmt.format(balance_after)
                );
            }
        }

        TransactionCommands::Delete { id } => {
            let txn_id = resolve_id(&ledger, &id)?;
            if let Some(removed) = ledger.delete_transaction(txn_id) {
                save(storage, &ledger, &audit)?;
                println!(
                    "Deleted transaction {} ({})",
                    removed.id,
                    fmt.format_transaction(removed.kind, removed.amount)
                );
                println!("Balance:     {}", fmt.format(ledger.profile().current_balance));
            }
        }
    }

    Ok(())
}
