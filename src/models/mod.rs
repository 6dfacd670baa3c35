//! Core data models for Finanzgarten
//!
//! Transactions, budget categories, the user profile and the per-bucket
//! budget amounts derived from salaries.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod profile;
pub mod transaction;

pub use budget::{BudgetBreakdown, BudgetSplit};
pub use category::{Category, CategoryType};
pub use ids::{
    CategoryId, IdGenerator, SavingsGoalId, SequentialIdGenerator, TransactionId, UuidGenerator,
};
pub use money::Money;
pub use profile::{Profile, ProfileSettings, ProfileUpdate, SavingsGoal};
pub use transaction::{NewTransaction, Transaction, TransactionKind, TransactionUpdate};
