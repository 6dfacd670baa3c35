//! CSV export of the transaction register

use std::io::Write;

use crate::error::FinanceResult;
use crate::models::Transaction;
use crate::services::SalaryClassifier;

const HEADER: [&str; 8] = [
    "ID",
    "Date",
    "Type",
    "Amount",
    "Description",
    "Category",
    "Category Type",
    "Salary",
];

/// Write one row per transaction, in the order given
///
/// Amounts are signed decimal units so spreadsheets can sum the column.
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    classifier: &SalaryClassifier,
    writer: W,
) -> FinanceResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER)?;

    for txn in transactions {
        let effect = txn.signed_effect();
        let (category, category_type) = match &txn.category {
            Some(c) => (c.name.as_str(), c.kind.as_str()),
            None => ("", ""),
        };

        csv.write_record([
            txn.id.as_uuid().to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.kind.as_str().to_string(),
            format!("{:.2}", effect.cents() as f64 / 100.0),
            txn.description.clone(),
            category.to_string(),
            category_type.to_string(),
            classifier.is_salary(txn).to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
