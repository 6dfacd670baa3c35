//! Audit logging for Finanzgarten
//!
//! Every ledger mutation is recorded with before/after snapshots in an
//! append-only, line-delimited JSON log.
//!
//! - `AuditEntry`: one operation on one entity
//! - `AuditLogger`: appends and reads the log file
//! - `AuditObserver`: turns `LedgerEvent`s into entries, either written at
//!   once or held in a `PendingAudit` until the ledger is saved
//!
//! ```rust,ignore
//! let mut ledger = storage.load_ledger(&settings)?;
//! ledger.subscribe(AuditObserver::new(AuditLogger::new(paths.audit_log())));
//! ```

mod diff;
mod entry;
mod logger;
mod observer;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
pub use observer::{AuditObserver, PendingAudit};
