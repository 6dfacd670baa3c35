//! Budget allocation from a salary
//!
//! Turns a salary amount and a split into per-bucket targets, and parses the
//! percentage inputs coming from the settings surface.

use crate::models::{BudgetBreakdown, BudgetSplit, Money};

/// Allowed distance of a custom split's total from 100%
pub const DEFAULT_SPLIT_TOLERANCE_PERCENT: f64 = 0.1;

/// Target per bucket: `amount × fraction`, rounded to cents
///
/// The split is not required to sum to 1.
pub fn allocate(amount: Money, split: &BudgetSplit) -> BudgetBreakdown {
    BudgetBreakdown::new(
        amount.scale(split.fixed),
        amount.scale(split.needs),
        amount.scale(split.wants),
        amount.scale(split.savings),
    )
}

/// Parse a percentage typed by the user; anything unparsable is 0
pub fn parse_percentage(input: &str) -> f64 {
    input
        .trim()
        .trim_end_matches('%')
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// A split entered in percent, with its total
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentSplit {
    pub fixed: f64,
    pub needs: f64,
    pub wants: f64,
    pub savings: f64,
}

impl PercentSplit {
    pub fn new(fixed: f64, needs: f64, wants: f64, savings: f64) -> Self {
        Self {
            fixed,
            needs,
            wants,
            savings,
        }
    }

    /// Parse four text inputs, defaulting each unparsable one to 0
    pub fn parse(fixed: &str, needs: &str, wants: &str, savings: &str) -> Self {
        Self::new(
            parse_percentage(fixed),
            parse_percentage(needs),
            parse_percentage(wants),
            parse_percentage(savings),
        )
    }

    pub fn total(&self) -> f64 {
        self.fixed + self.needs + self.wants + self.savings
    }

    /// Whether the total is within `tolerance` percentage points of 100
    pub fn is_complete(&self, tolerance: f64) -> bool {
        (self.total() - 100.0).abs() < tolerance
    }

    pub fn to_split(&self) -> BudgetSplit {
        BudgetSplit::from_percentages(self.fixed, self.needs, self.wants, self.savings)
    }
}

impl From<BudgetSplit> for PercentSplit {
    fn from(split: BudgetSplit) -> Self {
        let [fixed, needs, wants, savings] = split.as_percentages();
        Self::new(fixed, needs, wants, savings)
    }
}
