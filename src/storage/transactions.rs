//! Transaction repository backed by transactions.json
//!
//! Transactions are stored in ledger order, most recently recorded first.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::FinanceError;
use crate::models::Transaction;

use super::file_io::{read_json, remove_if_exists, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

pub struct TransactionRepository {
    path: PathBuf,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load all transactions; a missing file is an empty list
    ///
    /// Duplicate ids mean the file was edited by hand and are rejected.
    pub fn load(&self) -> Result<Vec<Transaction>, FinanceError> {
        let data: TransactionData = read_json(&self.path)?;

        let mut seen = HashSet::with_capacity(data.transactions.len());
        if let Some(dup) = data.transactions.iter().find(|t| !seen.insert(t.id)) {
            return Err(FinanceError::Storage(format!(
                "Duplicate transaction id {} in {}",
                dup.id,
                self.path.display()
            )));
        }

        Ok(data.transactions)
    }

    pub fn save(&self, transactions: &[Transaction]) -> Result<(), FinanceError> {
        let data = TransactionData {
            transactions: transactions.to_vec(),
        };
        write_json_atomic(&self.path, &data)
    }

    pub fn remove(&self) -> Result<(), FinanceError> {
        remove_if_exists(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewTransaction, TransactionId};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample(description: &str) -> Transaction {
        let date = Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap();
        NewTransaction::expense(Money::from_cents(1_999), description, date)
            .into_transaction(TransactionId::new(), date)
    }

    #[test]
    fn test_save_and_load_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        assert!(repo.load().unwrap().is_empty());

        let transactions = vec![sample("zweite"), sample("erste")];
        repo.save(&transactions).unwrap();

        assert_eq!(repo.load().unwrap(), transactions);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        let txn = sample("doppelt");
        repo.save(&[txn.clone(), txn]).unwrap();

        let err = repo.load().unwrap_err();
        assert!(err.to_string().contains("Duplicate transaction id"));
    }
}
