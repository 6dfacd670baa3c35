//! Transaction register and detail views

use crate::models::Transaction;
use crate::services::SalaryClassifier;

use super::amount::AmountFormatter;
use super::report::{separator, truncate};

const REGISTER_WIDTH: usize = 72;

/// One register line: id, date, description, category, signed amount
///
/// Salaries are marked with `*`.
pub fn format_transaction_row(
    txn: &Transaction,
    fmt: &AmountFormatter,
    classifier: &SalaryClassifier,
    date_format: &str,
) -> String {
    let marker = if classifier.is_salary(txn) { "*" } else { " " };
    let category = txn
        .category
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("");

    format!(
        "{} {:12} {:10} {:24} {:14} {:>12}",
        marker,
        txn.id.to_string(),
        txn.date.format(date_format).to_string(),
        truncate(&txn.description, 24),
        truncate(category, 14),
        fmt.format_transaction(txn.kind, txn.amount)
    )
}

/// Register of `transactions` in the order given
pub fn format_transaction_register(
    transactions: &[Transaction],
    fmt: &AmountFormatter,
    classifier: &SalaryClassifier,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = format!(
        "  {:12} {:10} {:24} {:14} {:>12}\n",
        "ID", "Date", "Description", "Category", "Amount"
    );
    output.push_str(&separator(REGISTER_WIDTH));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, fmt, classifier, date_format));
        output.push('\n');
    }

    output
}

pub fn format_transaction_details(
    txn: &Transaction,
    fmt: &AmountFormatter,
    classifier: &SalaryClassifier,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Date:        {}\n", txn.date.format(date_format)));
    output.push_str(&format!(
        "Amount:      {}\n",
        fmt.format_transaction(txn.kind, txn.amount)
    ));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    match &txn.category {
        Some(category) => output.push_str(&format!("Category:    {}\n", category)),
        None => output.push_str("Category:    (uncategorized)\n"),
    }

    if classifier.is_salary(txn) {
        output.push_str("Salary:      yes (starts a budget cycle)\n");
    }

    output
}
