//! Spend aggregation per budget bucket

use crate::models::{BudgetBreakdown, Transaction};

use super::cycle::{current_cycle, SalaryClassifier};

/// Sum expense amounts per bucket
///
/// Income and uncategorized expenses are skipped; buckets without spend are
/// zero.
pub fn spent_by_category(cycle: &[Transaction]) -> BudgetBreakdown {
    let mut spent = BudgetBreakdown::default();

    for txn in cycle.iter().filter(|t| t.is_expense()) {
        if let Some(category) = &txn.category {
            *spent.get_mut(category.kind) += txn.amount;
        }
    }

    spent
}

/// Spend per bucket within the current cycle of `transactions`
pub fn compute_cycle_spend(
    transactions: &[Transaction],
    classifier: &SalaryClassifier,
) -> BudgetBreakdown {
    spent_by_category(&current_cycle(transactions, classifier))
}
