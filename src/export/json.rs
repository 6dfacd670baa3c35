//! JSON export and import of the whole ledger
//!
//! The document is `{ "schemaVersion", "profile", "transactions", "exportDate" }`
//! with amounts in cents. Documents without a schema version come from the
//! browser app and are converted on import.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, Profile, Transaction};
use crate::services::Ledger;

use super::legacy::LegacyExport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

const EXPORT_FILE_PREFIX: &str = "finanzgarten-export";

/// Snapshot of the profile and all transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataExport {
    /// `None` only for documents converted from the browser app
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,

    pub profile: Profile,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    pub export_date: DateTime<Utc>,
}

impl DataExport {
    pub fn from_ledger(ledger: &Ledger, export_date: DateTime<Utc>) -> Self {
        Self {
            schema_version: Some(EXPORT_SCHEMA_VERSION.to_string()),
            profile: ledger.profile().clone(),
            transactions: ledger.transactions().to_vec(),
            export_date,
        }
    }

    /// Check that the snapshot can be loaded as a ledger
    ///
    /// Rejects unknown schema versions, duplicate ids, negative amounts and a
    /// balance that disagrees with the opening balance plus all effects.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(version) = &self.schema_version {
            if version != EXPORT_SCHEMA_VERSION {
                return Err(format!(
                    "Schema version mismatch: expected {}, got {}",
                    EXPORT_SCHEMA_VERSION, version
                ));
            }
        }

        let mut seen = HashSet::with_capacity(self.transactions.len());
        for txn in &self.transactions {
            if !seen.insert(txn.id) {
                return Err(format!("Duplicate transaction id {}", txn.id));
            }
            if txn.amount.is_negative() {
                return Err(format!("Transaction {} has a negative amount", txn.id));
            }
        }

        if let Some(opening) = self.profile.opening_balance {
            let effects: Money = self.transactions.iter().map(Transaction::signed_effect).sum();
            let expected = opening + effects;
            if expected != self.profile.current_balance {
                return Err(format!(
                    "Balance {} does not match opening balance plus transactions ({})",
                    self.profile.current_balance, expected
                ));
            }
        }

        Ok(())
    }

    /// Ledger over the imported state
    pub fn into_ledger(self) -> Ledger {
        Ledger::new(self.profile, self.transactions)
    }
}

/// Default file name for an export written on `date`
pub fn default_export_file_name(date: NaiveDate, extension: &str) -> String {
    format!("{}-{}.{}", EXPORT_FILE_PREFIX, date.format("%Y-%m-%d"), extension)
}

pub fn export_json<W: Write>(export: &DataExport, writer: &mut W, pretty: bool) -> FinanceResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| FinanceError::Export(e.to_string()))
}

/// Parse and validate a JSON export, converting browser-app documents
pub fn import_from_json(json_str: &str) -> FinanceResult<DataExport> {
    let value: serde_json::Value =
        serde_json::from_str(json_str).map_err(|e| FinanceError::Import(e.to_string()))?;

    let export = if value.get("schemaVersion").is_some() {
        serde_json::from_value::<DataExport>(value)
    } else {
        serde_json::from_value::<LegacyExport>(value).map(LegacyExport::into_export)
    }
    .map_err(|e| FinanceError::Import(e.to_string()))?;

    export.validate().map_err(FinanceError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryType, NewTransaction, SequentialIdGenerator, TransactionId};
    use chrono::TimeZone;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::default().with_id_generator(SequentialIdGenerator::new());
        let date = Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap();
        ledger.record_transaction(NewTransaction::income(Money::from_units(2400, 0), "Gehalt Juli", date));
        ledger.record_transaction(NewTransaction::expense(Money::from_units(12, 90), "Pizza", date));
        ledger
    }

    fn export_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 2, 20, 15, 0).unwrap()
    }

    #[test]
    fn test_export_document_shape() {
        let export = DataExport::from_ledger(&sample_ledger(), export_date());
        let mut buf = Vec::new();
        export_json(&export, &mut buf, false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert!(value.get("profile").is_some());
        assert_eq!(value["transactions"].as_array().unwrap().len(), 2);
        assert_eq!(value["exportDate"], "2025-07-02T20:15:00Z");
        assert_eq!(value["transactions"][0]["type"], "expense");
        assert_eq!(value["profile"]["currentBalance"], 738_710);
    }

    #[test]
    fn test_import_validates_and_restores() {
        let ledger = sample_ledger();
        let export = DataExport::from_ledger(&ledger, export_date());
        let mut buf = Vec::new();
        export_json(&export, &mut buf, true).unwrap();

        let imported = import_from_json(std::str::from_utf8(&buf).unwrap()).unwrap();
        assert_eq!(imported, export);

        let restored = imported.into_ledger();
        assert_eq!(restored.transactions(), ledger.transactions());
        assert!(restored.verify_balance().is_consistent());
    }

    #[test]
    fn test_import_rejects_duplicates() {
        let mut export = DataExport::from_ledger(&sample_ledger(), export_date());
        let first = export.transactions[0].clone();
        export.transactions.push(first);

        let err = export.validate().unwrap_err();
        assert!(err.contains("Duplicate transaction id"));
    }

    #[test]
    fn test_import_rejects_inconsistent_balance() {
        let mut export = DataExport::from_ledger(&sample_ledger(), export_date());
        export.profile.current_balance += Money::from_cents(1);

        let json = serde_json::to_string(&export).unwrap();
        let err = import_from_json(&json).unwrap_err();
        assert!(matches!(err, FinanceError::Import(_)));
    }

    #[test]
    fn test_import_browser_app_document() {
        let json = r#"{
            "profile": {
                "currentBalance": 5787.5,
                "budgetDistribution": {"fixed": 1250, "needs": 750, "wants": 250, "savings": 250},
                "lastSalaryDate": "2025-01-28T09:12:44.318Z",
                "categories": [],
                "savingsGoals": [],
                "settings": {"hideAmounts": true}
            },
            "transactions": [
                {
                    "id": "1738141200000",
                    "type": "expense",
                    "amount": 12.5,
                    "description": "Döner",
                    "date": "2025-01-29T12:00:00.000Z",
                    "category": {"id": "1737000000000", "name": "Essen", "type": "needs"}
                },
                {
                    "id": "1738054800000",
                    "type": "income",
                    "amount": 2500,
                    "description": "Gehalt Januar",
                    "date": "2025-01-28"
                }
            ],
            "exportDate": "2025-01-31T18:30:00.000Z"
        }"#;

        let export = import_from_json(json).unwrap();
        assert!(export.schema_version.is_none());
        assert_eq!(export.profile.current_balance, Money::from_cents(578_750));
        assert_eq!(export.profile.budget_distribution.fixed, Money::from_units(1250, 0));
        assert!(export.profile.settings.hide_amounts);

        let expense = &export.transactions[0];
        assert_eq!(expense.amount, Money::from_cents(1_250));
        assert_eq!(expense.id, TransactionId::from_legacy("1738141200000"));
        assert_eq!(expense.category.as_ref().unwrap().kind, CategoryType::Needs);
        assert_eq!(
            export.transactions[1].date,
            Utc.with_ymd_and_hms(2025, 1, 28, 12, 0, 0).unwrap()
        );

        let ledger = export.into_ledger();
        assert_eq!(ledger.opening_balance(), Money::from_units(3300, 0));
        assert!(ledger.verify_balance().is_consistent());
        assert_eq!(ledger.compute_cycle_spend().needs, Money::from_cents(1_250));
    }

    #[test]
    fn test_browser_app_duplicate_ids_rejected() {
        let json = r#"{
            "profile": {"currentBalance": 5000},
            "transactions": [
                {"id": "1", "type": "income", "amount": 10, "description": "a", "date": "2025-02-01"},
                {"id": "1", "type": "expense", "amount": 10, "description": "b", "date": "2025-02-02"}
            ],
            "exportDate": "2025-02-03T00:00:00Z"
        }"#;

        let err = import_from_json(json).unwrap_err();
        assert!(err.to_string().contains("Duplicate transaction id"));
    }

    #[test]
    fn test_versioned_document_keeps_cents() {
        let mut export = DataExport::from_ledger(&sample_ledger(), export_date());
        export.transactions.clear();
        export.profile.opening_balance = None;
        export.profile.current_balance = Money::from_cents(5_000);

        let json = serde_json::to_string(&export).unwrap();
        let imported = import_from_json(&json).unwrap();
        assert_eq!(imported.profile.current_balance, Money::from_cents(5_000));
    }

    #[test]
    fn test_unknown_schema_version() {
        let mut export = DataExport::from_ledger(&sample_ledger(), export_date());
        export.schema_version = Some("9.9.9".into());
        assert!(export.validate().unwrap_err().contains("Schema version mismatch"));
    }

    #[test]
    fn test_default_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(
            default_export_file_name(date, "json"),
            "finanzgarten-export-2025-03-09.json"
        );
    }
}
