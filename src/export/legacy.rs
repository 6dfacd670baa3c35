//! Import of exports written by the browser app
//!
//! Those documents carry no schema version, store amounts as decimal euros
//! (`12.5`, `5000`) and use millisecond timestamps as ids. They are read
//! into the current shape: amounts become cents and ids become stable
//! name-based UUIDs.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::models::{
    BudgetBreakdown, BudgetSplit, Category, CategoryId, CategoryType, Money, Profile,
    ProfileSettings, SavingsGoal, SavingsGoalId, Transaction, TransactionId, TransactionKind,
};

use super::json::DataExport;

fn euros<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
    f64::deserialize(deserializer).map(Money::from_decimal)
}

fn optional_euros<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
    Option::<f64>::deserialize(deserializer).map(|v| v.map(Money::from_decimal).unwrap_or_default())
}

fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
}

fn optional_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw))),
        None => Ok(None),
    }
}

/// ISO timestamps, or plain `YYYY-MM-DD` from date inputs (noon UTC)
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN + chrono::Duration::hours(12)).and_utc())
}

/// Ids were strings from `Date.now()`, occasionally plain numbers
#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyId {
    Text(String),
    Number(serde_json::Number),
}

impl LegacyId {
    fn as_key(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyBreakdown {
    #[serde(default, deserialize_with = "optional_euros")]
    fixed: Money,
    #[serde(default, deserialize_with = "optional_euros")]
    needs: Money,
    #[serde(default, deserialize_with = "optional_euros")]
    wants: Money,
    #[serde(default, deserialize_with = "optional_euros")]
    savings: Money,
}

#[derive(Deserialize)]
struct LegacyCategory {
    id: Option<LegacyId>,
    name: String,
    #[serde(rename = "type")]
    kind: CategoryType,
}

impl LegacyCategory {
    fn into_category(self) -> Category {
        let id = match &self.id {
            Some(id) => CategoryId::from_legacy(&id.as_key()),
            None => CategoryId::from_legacy(&format!("{}:{}", self.kind.as_str(), self.name)),
        };
        Category {
            id,
            name: self.name,
            kind: self.kind,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacySavingsGoal {
    id: Option<LegacyId>,
    name: String,
    #[serde(deserialize_with = "euros")]
    target_amount: Money,
    #[serde(default, deserialize_with = "optional_euros")]
    current_amount: Money,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyProfile {
    #[serde(deserialize_with = "euros")]
    current_balance: Money,
    budget_distribution: Option<LegacyBreakdown>,
    #[serde(default, deserialize_with = "optional_timestamp")]
    last_salary_date: Option<DateTime<Utc>>,
    #[serde(default)]
    categories: Vec<LegacyCategory>,
    #[serde(default)]
    savings_goals: Vec<LegacySavingsGoal>,
    #[serde(default)]
    settings: ProfileSettings,
}

#[derive(Deserialize)]
struct LegacyTransaction {
    id: LegacyId,
    #[serde(rename = "type")]
    kind: TransactionKind,
    #[serde(deserialize_with = "euros")]
    amount: Money,
    #[serde(default)]
    description: String,
    #[serde(deserialize_with = "timestamp")]
    date: DateTime<Utc>,
    category: Option<LegacyCategory>,
}

/// A browser-app export as written by its settings page
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyExport {
    profile: LegacyProfile,
    #[serde(default)]
    transactions: Vec<LegacyTransaction>,
    #[serde(deserialize_with = "timestamp")]
    export_date: DateTime<Utc>,
}

impl LegacyExport {
    /// Convert to the current document; the opening balance is left for the
    /// ledger to derive from the balance and the transactions
    pub fn into_export(self) -> DataExport {
        let profile = self.profile;
        let distribution = profile
            .budget_distribution
            .map(|b| BudgetBreakdown::new(b.fixed, b.needs, b.wants, b.savings))
            .unwrap_or_default();

        let savings_goals = profile
            .savings_goals
            .into_iter()
            .map(|goal| SavingsGoal {
                id: match &goal.id {
                    Some(id) => SavingsGoalId::from_legacy(&id.as_key()),
                    None => SavingsGoalId::from_legacy(&goal.name),
                },
                name: goal.name,
                target_amount: goal.target_amount,
                current_amount: goal.current_amount,
            })
            .collect();

        let transactions = self
            .transactions
            .into_iter()
            .map(|txn| Transaction {
                id: TransactionId::from_legacy(&txn.id.as_key()),
                kind: txn.kind,
                amount: txn.amount.abs(),
                description: txn.description,
                date: txn.date,
                category: txn.category.map(LegacyCategory::into_category),
                is_salary: None,
                created_at: txn.date,
            })
            .collect();

        DataExport {
            schema_version: None,
            profile: Profile {
                current_balance: profile.current_balance,
                opening_balance: None,
                budget_distribution: distribution,
                budget_split: BudgetSplit::default(),
                last_salary_date: profile.last_salary_date,
                categories: profile
                    .categories
                    .into_iter()
                    .map(LegacyCategory::into_category)
                    .collect(),
                savings_goals,
                settings: profile.settings,
            },
            transactions,
            export_date: self.export_date,
        }
    }
}
