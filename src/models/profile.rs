//! User profile model
//!
//! Holds the running balance, the derived budget distribution and the user's
//! categories, savings goals and display preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::budget::{BudgetBreakdown, BudgetSplit};
use super::category::Category;
use super::ids::SavingsGoalId;
use super::money::Money;

/// Balance a brand-new profile starts with
pub const DEFAULT_OPENING_BALANCE: Money = Money::from_cents(500_000);

/// Display preferences stored with the profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    /// Mask amounts in all output
    #[serde(default)]
    pub hide_amounts: bool,
}

/// A savings target the user is working toward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: SavingsGoalId,
    pub name: String,
    pub target_amount: Money,
    #[serde(default)]
    pub current_amount: Money,
}

impl SavingsGoal {
    pub fn new(name: impl Into<String>, target_amount: Money) -> Self {
        Self {
            id: SavingsGoalId::new(),
            name: name.into(),
            target_amount,
            current_amount: Money::zero(),
        }
    }

    /// Progress in percent, capped at 100
    pub fn progress_percent(&self) -> f64 {
        if !self.target_amount.is_positive() {
            return 100.0;
        }
        let ratio = self.current_amount.cents() as f64 / self.target_amount.cents() as f64;
        (ratio * 100.0).clamp(0.0, 100.0)
    }
}

/// The user's financial profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Running balance; always opening balance plus all transaction effects
    pub current_balance: Money,

    /// Balance before any recorded transaction
    ///
    /// `None` for profiles saved before opening balances were tracked; the
    /// ledger derives it from the current balance when loading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_balance: Option<Money>,

    /// Target amounts per bucket, derived from the last salary
    #[serde(default)]
    pub budget_distribution: BudgetBreakdown,

    /// Split used for the current distribution
    #[serde(default)]
    pub budget_split: BudgetSplit,

    /// When the distribution was last recomputed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_salary_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub savings_goals: Vec<SavingsGoal>,

    #[serde(default)]
    pub settings: ProfileSettings,
}

impl Default for Profile {
    fn default() -> Self {
        Self::with_opening_balance(DEFAULT_OPENING_BALANCE)
    }
}

impl Profile {
    pub fn with_opening_balance(opening_balance: Money) -> Self {
        Self {
            current_balance: opening_balance,
            opening_balance: Some(opening_balance),
            budget_distribution: BudgetBreakdown::default(),
            budget_split: BudgetSplit::default(),
            last_salary_date: None,
            categories: Category::defaults(),
            savings_goals: Vec::new(),
            settings: ProfileSettings::default(),
        }
    }

    /// Find a category by exact id string or case-insensitive name
    pub fn find_category(&self, identifier: &str) -> Option<&Category> {
        if let Ok(id) = identifier.parse() {
            if let Some(cat) = self.categories.iter().find(|c| c.id == id) {
                return Some(cat);
            }
        }
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(identifier.trim()))
    }

    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(categories) = update.categories {
            self.categories = categories;
        }
        if let Some(goals) = update.savings_goals {
            self.savings_goals = goals;
        }
        if let Some(settings) = update.settings {
            self.settings = settings;
        }
    }
}

/// Partial update of the presentation-side profile fields
///
/// Balance and budget fields change only through the ledger.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub categories: Option<Vec<Category>>,
    pub savings_goals: Option<Vec<SavingsGoal>>,
    pub settings: Option<ProfileSettings>,
}
