//! Display formatting for terminal output

pub mod amount;
pub mod budget;
pub mod report;
pub mod transaction;

pub use amount::{AmountFormatter, HIDDEN_AMOUNT};
pub use budget::{format_budget_overview, format_dashboard};
pub use transaction::{format_transaction_details, format_transaction_register, format_transaction_row};
