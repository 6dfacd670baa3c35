//! In-memory transaction store
//!
//! Keeps transactions in recording order, newest first. Lookups are linear;
//! a personal ledger holds a few thousand entries at most.

use crate::models::{Transaction, TransactionId, TransactionUpdate};

/// Ordered collection of transactions, most recently recorded first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from persisted transactions, keeping their order
    pub fn from_vec(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Add a transaction at the front
    pub fn prepend(&mut self, txn: Transaction) {
        self.transactions.insert(0, txn);
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Find by full id, `txn-` display form, or a unique short prefix
    pub fn find(&self, identifier: &str) -> Option<&Transaction> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.get(id);
        }

        let prefix = identifier.trim().strip_prefix("txn-").unwrap_or(identifier.trim());
        if prefix.is_empty() {
            return None;
        }

        let mut matches = self
            .transactions
            .iter()
            .filter(|t| t.id.as_uuid().to_string().starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Some(txn),
            _ => None,
        }
    }

    /// Apply an update; returns the transaction as it was before, if found
    pub fn update(&mut self, id: TransactionId, update: TransactionUpdate) -> Option<Transaction> {
        let txn = self.transactions.iter_mut().find(|t| t.id == id)?;
        let before = txn.clone();
        txn.apply(update);
        Some(before)
    }

    /// Remove by id; returns the removed transaction, if found
    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.transactions.iter().position(|t| t.id == id)?;
        Some(self.transactions.remove(index))
    }

    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    /// All transactions in store order
    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
