//! Transaction model
//!
//! A transaction stores its amount as a non-negative magnitude; whether it
//! adds to or subtracts from the balance is decided by its kind alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Signed contribution of `amount` to a balance
    pub fn effect(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount.abs(),
            Self::Expense => -amount.abs(),
        }
    }

    /// Lowercase name as stored in JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown transaction type '{}' (expected income or expense)",
                other
            )),
        }
    }
}

/// A recorded financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier, assigned when recorded
    pub id: TransactionId,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Magnitude, never negative
    pub amount: Money,

    #[serde(default)]
    pub description: String,

    /// When the transaction happened; only used for ordering
    pub date: DateTime<Utc>,

    /// Budget category (only meaningful for expenses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Explicit salary flag; `None` falls back to the description marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_salary: Option<bool>,

    /// When the transaction was recorded
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Signed effect on the balance: `+amount` for income, `-amount` for expense
    pub fn signed_effect(&self) -> Money {
        self.kind.effect(self.amount)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: TransactionUpdate) {
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(amount) = update.amount {
            self.amount = amount.abs();
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(is_salary) = update.is_salary {
            self.is_salary = is_salary;
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.signed_effect()
        )
    }
}

/// A transaction as submitted by the user, before it has an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Money,
    pub description: String,
    pub date: DateTime<Utc>,
    pub category: Option<Category>,
    pub is_salary: Option<bool>,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionKind,
        amount: Money,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            amount: amount.abs(),
            description: description.into(),
            date,
            category: None,
            is_salary: None,
        }
    }

    pub fn income(amount: Money, description: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self::new(TransactionKind::Income, amount, description, date)
    }

    pub fn expense(amount: Money, description: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self::new(TransactionKind::Expense, amount, description, date)
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Mark explicitly as salary (or explicitly not)
    pub fn salary(mut self, is_salary: bool) -> Self {
        self.is_salary = Some(is_salary);
        self
    }

    /// Attach an identity, producing a storable transaction
    pub fn into_transaction(self, id: TransactionId, created_at: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount.abs(),
            description: self.description,
            date: self.date,
            category: self.category,
            is_salary: self.is_salary,
            created_at,
        }
    }
}

/// Partial update of a transaction; `None` means "leave unchanged"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    pub kind: Option<TransactionKind>,
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    /// `Some(None)` clears the category
    pub category: Option<Option<Category>>,
    /// `Some(None)` reverts to marker-based salary detection
    pub is_salary: Option<Option<bool>>,
}

impl TransactionUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = Some(category);
        self
    }

    pub fn salary(mut self, is_salary: Option<bool>) -> Self {
        self.is_salary = Some(is_salary);
        self
    }

    /// Whether applying this update can change the balance
    pub fn touches_effect(&self) -> bool {
        self.kind.is_some() || self.amount.is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
