//! Finanzgarten - personal finance tracking with salary-driven budget cycles
//!
//! The library keeps a running balance over a list of income and expense
//! transactions. Every income recognized as a salary starts a new budget
//! cycle and redistributes the salary across four buckets (fixed costs,
//! needs, wants and savings).
//!
//! # Architecture
//!
//! - `models`: Money, transactions, categories, profile and budget types
//! - `services`: The `Ledger` and the pure cycle, allocation and spend logic
//! - `storage`: JSON file storage with atomic writes
//! - `audit`: JSONL audit log fed by ledger events
//! - `export`: JSON, YAML and CSV export plus validated import
//! - `display`: Terminal formatting
//! - `config`: Paths and settings
//! - `cli`: Command handlers for the `finanzgarten` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use finanzgarten::config::{FinancePaths, Settings};
//! use finanzgarten::storage::Storage;
//!
//! let paths = FinancePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let ledger = Storage::new(paths)?.load_ledger(&settings)?;
//! println!("{}", ledger.profile().current_balance);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
