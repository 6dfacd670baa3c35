//! User settings for Finanzgarten
//!
//! Display preferences, the salary marker used to detect cycle starts, and
//! the split applied when a salary arrives.

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::FinanceError;
use crate::models::money::DEFAULT_CURRENCY_SYMBOL;
use crate::models::BudgetSplit;
use crate::services::allocation::DEFAULT_SPLIT_TOLERANCE_PERCENT;
use crate::services::cycle::{SalaryClassifier, DEFAULT_SALARY_MARKER};

/// User settings for Finanzgarten
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Substring marking an income as salary (case-insensitive)
    #[serde(default = "default_salary_marker")]
    pub salary_marker: String,

    /// Split applied automatically when a salary is recorded
    #[serde(default)]
    pub default_split: BudgetSplit,

    /// How far a custom split may be from 100% and still be accepted
    #[serde(default = "default_split_tolerance")]
    pub split_tolerance_percent: f64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_salary_marker() -> String {
    DEFAULT_SALARY_MARKER.to_string()
}

fn default_split_tolerance() -> f64 {
    DEFAULT_SPLIT_TOLERANCE_PERCENT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            salary_marker: default_salary_marker(),
            default_split: BudgetSplit::default(),
            split_tolerance_percent: default_split_tolerance(),
        }
    }
}

impl Settings {
    /// Classifier built from the configured salary marker
    pub fn salary_classifier(&self) -> SalaryClassifier {
        SalaryClassifier::new(&self.salary_marker)
    }

    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Not persisted until the caller saves
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
