//! Storage layer for Finanzgarten
//!
//! JSON files with atomic writes. The storage layer only moves whole
//! snapshots; all mutation goes through the `Ledger`.

pub mod file_io;
pub mod profile;
pub mod transactions;

pub use file_io::{read_json, write_json_atomic};
pub use profile::ProfileRepository;
pub use transactions::TransactionRepository;

use tracing::debug;

use crate::config::paths::FinancePaths;
use crate::config::settings::Settings;
use crate::error::FinanceError;
use crate::models::{Profile, Transaction};
use crate::services::Ledger;

/// Coordinates the repositories under one data directory
pub struct Storage {
    paths: FinancePaths,
    pub profile: ProfileRepository,
    pub transactions: TransactionRepository,
}

impl Storage {
    pub fn new(paths: FinancePaths) -> Result<Self, FinanceError> {
        paths.ensure_directories()?;

        Ok(Self {
            profile: ProfileRepository::new(paths.profile_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &FinancePaths {
        &self.paths
    }

    /// Write a fresh profile if none exists yet; returns whether it did
    pub fn initialize(&self) -> Result<bool, FinanceError> {
        if self.profile.exists() {
            return Ok(false);
        }
        self.save_parts(&Profile::default(), &[])?;
        Ok(true)
    }

    /// Build a ledger from disk, configured from `settings`
    pub fn load_ledger(&self, settings: &Settings) -> Result<Ledger, FinanceError> {
        let profile = self.profile.load()?.unwrap_or_default();
        let transactions = self.transactions.load()?;
        debug!(
            transactions = transactions.len(),
            balance = %profile.current_balance,
            "loaded ledger"
        );

        Ok(Ledger::new(profile, transactions)
            .with_classifier(settings.salary_classifier())
            .with_default_split(settings.default_split))
    }

    pub fn save_ledger(&self, ledger: &Ledger) -> Result<(), FinanceError> {
        self.save_parts(ledger.profile(), ledger.transactions())
    }

    pub fn save_parts(
        &self,
        profile: &Profile,
        transactions: &[Transaction],
    ) -> Result<(), FinanceError> {
        self.transactions.save(transactions)?;
        self.profile.save(profile)?;
        debug!(transactions = transactions.len(), "saved ledger");
        Ok(())
    }

    /// Delete the stored profile and transactions
    pub fn clear(&self) -> Result<(), FinanceError> {
        self.transactions.remove()?;
        self.profile.remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewTransaction};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn storage(temp_dir: &TempDir) -> Storage {
        Storage::new(FinancePaths::with_base_dir(temp_dir.path())).unwrap()
    }

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);

        assert!(temp_dir.path().join("data").is_dir());
        assert!(storage.initialize().unwrap());
        assert!(!storage.initialize().unwrap());
    }

    #[test]
    fn test_ledger_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        let settings = Settings::default();

        let mut ledger = storage.load_ledger(&settings).unwrap();
        let date = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        ledger.record_transaction(NewTransaction::income(Money::from_units(1000, 0), "Gehalt Mai", date));
        ledger.record_transaction(NewTransaction::expense(Money::from_units(25, 50), "Friseur", date));
        storage.save_ledger(&ledger).unwrap();

        let loaded = storage.load_ledger(&settings).unwrap();
        assert_eq!(loaded.profile(), ledger.profile());
        assert_eq!(loaded.transactions(), ledger.transactions());
        assert!(loaded.verify_balance().is_consistent());
    }

    #[test]
    fn test_settings_drive_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        let settings = Settings {
            salary_marker: "lohn".into(),
            ..Settings::default()
        };

        let mut ledger = storage.load_ledger(&settings).unwrap();
        let date = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        ledger.record_transaction(NewTransaction::income(Money::from_units(1000, 0), "Lohn Mai", date));

        assert_eq!(
            ledger.profile().budget_distribution.fixed,
            Money::from_units(500, 0)
        );
    }

    #[test]
    fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        storage.initialize().unwrap();

        storage.clear().unwrap();

        assert!(!storage.paths().profile_file().exists());
        assert!(!storage.paths().transactions_file().exists());
    }
}
