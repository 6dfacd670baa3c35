//! Business logic for Finanzgarten
//!
//! Pure views over transactions (cycle extraction, spend aggregation,
//! allocation) plus the `Ledger`, which owns all state and keeps the balance
//! reconciled across mutations.

pub mod allocation;
pub mod clock;
pub mod cycle;
pub mod ledger;
pub mod spending;
pub mod store;

pub use allocation::{allocate, parse_percentage, PercentSplit, DEFAULT_SPLIT_TOLERANCE_PERCENT};
pub use clock::{Clock, FixedClock, SystemClock};
pub use cycle::{
    current_cycle, last_salary_amount, last_salary_date, sort_newest_first, SalaryClassifier,
    DEFAULT_SALARY_MARKER,
};
pub use ledger::{BalanceCheck, Ledger, LedgerEvent, LedgerObserver};
pub use spending::{compute_cycle_spend, spent_by_category};
pub use store::TransactionStore;
