//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger. Each handler loads the
//! ledger, applies one command and saves the result.

pub mod budget;
pub mod export;
pub mod profile;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use export::{handle_export_command, handle_import_command, ExportFormat};
pub use profile::{handle_profile_command, ProfileCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::audit::{AuditLogger, AuditObserver, PendingAudit};
use crate::config::Settings;
use crate::display::AmountFormatter;
use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;
use crate::services::Ledger;
use crate::storage::Storage;

/// Load the ledger with auditing attached
///
/// Audit entries are held in the returned [`PendingAudit`] until [`save`]
/// has written the ledger.
pub fn open_ledger(
    storage: &Storage,
    settings: &Settings,
) -> FinanceResult<(Ledger, PendingAudit)> {
    let mut ledger = storage.load_ledger(settings)?;
    let (observer, audit) =
        AuditObserver::buffered(AuditLogger::new(storage.paths().audit_log()));
    ledger.subscribe(observer);
    Ok((ledger, audit))
}

/// Persist the ledger, then log the changes that led to it
pub fn save(storage: &Storage, ledger: &Ledger, audit: &PendingAudit) -> FinanceResult<()> {
    storage.save_ledger(ledger)?;
    audit.commit();
    Ok(())
}

/// Formatter for the ledger's current hide-amounts preference
pub fn amount_formatter(settings: &Settings, ledger: &Ledger) -> AmountFormatter {
    AmountFormatter::from_settings(settings, ledger.profile())
}

/// Parse a non-negative amount such as `12.50`, `12,50` or `€12`
pub fn parse_amount(input: &str) -> FinanceResult<Money> {
    let amount = Money::parse(input).map_err(|e| {
        FinanceError::Validation(format!(
            "Invalid amount '{}': {}. Use a format like '12.50' or '100'",
            input, e
        ))
    })?;

    if amount.is_negative() {
        return Err(FinanceError::Validation(format!(
            "Amount must not be negative: '{}'. Use the transaction type for direction",
            input
        )));
    }

    Ok(amount)
}

/// Parse `YYYY-MM-DD` (noon UTC) or a full RFC 3339 timestamp
pub fn parse_date(input: &str) -> FinanceResult<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN + chrono::Duration::hours(12)).and_utc());
    }

    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            FinanceError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD or an RFC 3339 timestamp",
                input
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FinancePaths;
    use crate::models::NewTransaction;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn ledger_with_expense(storage: &Storage) -> (Ledger, PendingAudit) {
        let (mut ledger, audit) = open_ledger(storage, &Settings::default()).unwrap();
        let date = Utc.with_ymd_and_hms(2025, 4, 2, 18, 0, 0).unwrap();
        ledger.record_transaction(NewTransaction::expense(Money::from_units(8, 40), "Kino", date));
        (ledger, audit)
    }

    #[test]
    fn test_save_writes_audit_after_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(FinancePaths::with_base_dir(temp_dir.path())).unwrap();
        let logger = AuditLogger::new(storage.paths().audit_log());

        let (ledger, audit) = ledger_with_expense(&storage);
        assert!(logger.read_all().unwrap().is_empty());

        save(&storage, &ledger, &audit).unwrap();
        assert_eq!(logger.read_all().unwrap().len(), 1);
        assert_eq!(storage.transactions.load().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_save_leaves_audit_log_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(FinancePaths::with_base_dir(temp_dir.path())).unwrap();
        let (ledger, audit) = ledger_with_expense(&storage);

        // A directory in place of the temp file makes the write fail
        let temp_path = storage.paths().transactions_file().with_extension("json.tmp");
        std::fs::create_dir_all(&temp_path).unwrap();

        assert!(save(&storage, &ledger, &audit).is_err());
        drop(audit);

        let logger = AuditLogger::new(storage.paths().audit_log());
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12,50").unwrap(), Money::from_cents(1_250));
        assert_eq!(parse_amount("€100").unwrap(), Money::from_cents(10_000));
        assert!(parse_amount("-5").unwrap_err().is_validation());
        assert!(parse_amount("zwölf").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-02-14").unwrap(),
            Utc.with_ymd_and_hms(2025, 2, 14, 12, 0, 0).unwrap()
        );
        assert_eq!(
            parse_date("2025-02-14T08:30:00+01:00").unwrap(),
            Utc.with_ymd_and_hms(2025, 2, 14, 7, 30, 0).unwrap()
        );
        assert!(parse_date("14.02.2025").is_err());
    }
}
