//! Budget amounts and splits per bucket
//!
//! `BudgetBreakdown` holds one amount per bucket and is used both for the
//! target distribution and for what was actually spent. `BudgetSplit` holds
//! the fractions a salary is divided by.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::CategoryType;
use super::money::Money;

/// One amount per budget bucket; absent spend is zero, never missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub fixed: Money,
    pub needs: Money,
    pub wants: Money,
    pub savings: Money,
}

impl BudgetBreakdown {
    pub fn new(fixed: Money, needs: Money, wants: Money, savings: Money) -> Self {
        Self {
            fixed,
            needs,
            wants,
            savings,
        }
    }

    pub fn get(&self, kind: CategoryType) -> Money {
        match kind {
            CategoryType::Fixed => self.fixed,
            CategoryType::Needs => self.needs,
            CategoryType::Wants => self.wants,
            CategoryType::Savings => self.savings,
        }
    }

    pub fn get_mut(&mut self, kind: CategoryType) -> &mut Money {
        match kind {
            CategoryType::Fixed => &mut self.fixed,
            CategoryType::Needs => &mut self.needs,
            CategoryType::Wants => &mut self.wants,
            CategoryType::Savings => &mut self.savings,
        }
    }

    pub fn total(&self) -> Money {
        self.iter().map(|(_, amount)| amount).sum()
    }

    /// Buckets with their amounts, in display order
    pub fn iter(&self) -> impl Iterator<Item = (CategoryType, Money)> + '_ {
        CategoryType::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// What is left per bucket when `spent` is taken from these targets
    pub fn remaining_after(&self, spent: &BudgetBreakdown) -> BudgetBreakdown {
        BudgetBreakdown::new(
            self.fixed - spent.fixed,
            self.needs - spent.needs,
            self.wants - spent.wants,
            self.savings - spent.savings,
        )
    }
}

/// Fractions of a salary assigned to each bucket
///
/// Fractions are expected, but not required, to sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetSplit {
    pub fixed: f64,
    pub needs: f64,
    pub wants: f64,
    pub savings: f64,
}

impl Default for BudgetSplit {
    /// 50% fixed, 30% needs, 10% wants, 10% savings
    fn default() -> Self {
        Self {
            fixed: 0.5,
            needs: 0.3,
            wants: 0.1,
            savings: 0.1,
        }
    }
}

impl BudgetSplit {
    pub fn new(fixed: f64, needs: f64, wants: f64, savings: f64) -> Self {
        Self {
            fixed,
            needs,
            wants,
            savings,
        }
    }

    /// Build a split from percentages (50.0 rather than 0.5)
    pub fn from_percentages(fixed: f64, needs: f64, wants: f64, savings: f64) -> Self {
        Self::new(fixed / 100.0, needs / 100.0, wants / 100.0, savings / 100.0)
    }

    pub fn get(&self, kind: CategoryType) -> f64 {
        match kind {
            CategoryType::Fixed => self.fixed,
            CategoryType::Needs => self.needs,
            CategoryType::Wants => self.wants,
            CategoryType::Savings => self.savings,
        }
    }

    pub fn total(&self) -> f64 {
        self.fixed + self.needs + self.wants + self.savings
    }

    /// Same split expressed in percent
    pub fn as_percentages(&self) -> [f64; 4] {
        [
            self.fixed * 100.0,
            self.needs * 100.0,
            self.wants * 100.0,
            self.savings * 100.0,
        ]
    }
}

impl fmt::Display for BudgetSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [fixed, needs, wants, savings] = self.as_percentages();
        write!(
            f,
            "fixed {:.1}% / needs {:.1}% / wants {:.1}% / savings {:.1}%",
            fixed, needs, wants, savings
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_access_and_total() {
        let mut breakdown = BudgetBreakdown::default();
        *breakdown.get_mut(CategoryType::Needs) += Money::from_cents(3000);
        *breakdown.get_mut(CategoryType::Wants) += Money::from_cents(2000);

        assert_eq!(breakdown.get(CategoryType::Fixed), Money::zero());
        assert_eq!(breakdown.needs, Money::from_cents(3000));
        assert_eq!(breakdown.total(), Money::from_cents(5000));
        assert_eq!(breakdown.iter().count(), 4);
    }

    #[test]
    fn test_remaining_after() {
        let targets = BudgetBreakdown::new(
            Money::from_cents(50_000),
            Money::from_cents(30_000),
            Money::from_cents(10_000),
            Money::from_cents(10_000),
        );
        let spent = BudgetBreakdown::new(
            Money::zero(),
            Money::from_cents(31_000),
            Money::from_cents(2_500),
            Money::zero(),
        );

        let remaining = targets.remaining_after(&spent);
        assert_eq!(remaining.needs, Money::from_cents(-1_000));
        assert_eq!(remaining.wants, Money::from_cents(7_500));
    }

    #[test]
    fn test_default_split() {
        let split = BudgetSplit::default();
        assert!((split.total() - 1.0).abs() < 1e-9);
        assert_eq!(split.get(CategoryType::Needs), 0.3);
    }

    #[test]
    fn test_from_percentages() {
        let split = BudgetSplit::from_percentages(40.0, 30.0, 20.0, 10.0);
        assert!((split.fixed - 0.4).abs() < 1e-9);
        assert!((split.savings - 0.1).abs() < 1e-9);
        assert_eq!(
            split.to_string(),
            "fixed 40.0% / needs 30.0% / wants 20.0% / savings 10.0%"
        );
    }
}
