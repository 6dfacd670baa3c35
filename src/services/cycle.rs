//! Spending cycle extraction
//!
//! A cycle runs from the most recent salary payment up to now. Everything
//! here is a pure view over a transaction slice.

use chrono::{DateTime, Utc};

use crate::models::{Money, Transaction};

/// Marker looked for in income descriptions when no explicit flag is set
pub const DEFAULT_SALARY_MARKER: &str = "gehalt";

/// Decides whether an income transaction starts a new budget cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryClassifier {
    marker: String,
}

impl Default for SalaryClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SALARY_MARKER)
    }
}

impl SalaryClassifier {
    /// Classifier matching `marker` case-insensitively
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into().to_lowercase(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Income only. The explicit flag wins; otherwise the description is
    /// scanned for the marker. An empty marker never matches.
    pub fn is_salary(&self, txn: &Transaction) -> bool {
        if !txn.is_income() {
            return false;
        }
        match txn.is_salary {
            Some(flag) => flag,
            None => {
                !self.marker.is_empty() && txn.description.to_lowercase().contains(&self.marker)
            }
        }
    }
}

/// Sort by date, newest first
///
/// The sort is stable: transactions sharing a timestamp keep their input
/// order. Store order is most-recently-recorded first, so that is the
/// tie-break for stored data.
pub fn sort_newest_first(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Transactions of the current cycle, newest first
///
/// Cut after the most recent salary (inclusive). Without any salary the whole
/// history is the cycle.
pub fn current_cycle(transactions: &[Transaction], classifier: &SalaryClassifier) -> Vec<Transaction> {
    let mut sorted = sort_newest_first(transactions);

    if let Some(index) = sorted.iter().position(|t| classifier.is_salary(t)) {
        sorted.truncate(index + 1);
    }

    sorted
}

fn latest_salary<'a>(
    transactions: &'a [Transaction],
    classifier: &SalaryClassifier,
) -> Option<&'a Transaction> {
    // max_by_key keeps the last maximum; iterate reversed so input order
    // breaks ties the same way as `sort_newest_first`.
    transactions
        .iter()
        .rev()
        .filter(|t| classifier.is_salary(t))
        .max_by_key(|t| t.date)
}

/// Date of the most recent salary, if any
pub fn last_salary_date(
    transactions: &[Transaction],
    classifier: &SalaryClassifier,
) -> Option<DateTime<Utc>> {
    latest_salary(transactions, classifier).map(|t| t.date)
}

/// Amount of the most recent salary, if any
pub fn last_salary_amount(transactions: &[Transaction], classifier: &SalaryClassifier) -> Option<Money> {
    latest_salary(transactions, classifier).map(|t| t.amount)
}
