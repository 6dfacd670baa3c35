//! Budget overview and dashboard views

use crate::models::{BudgetBreakdown, BudgetSplit, CategoryType, Money};
use crate::services::Ledger;

use super::amount::AmountFormatter;
use super::report::{format_bar, separator};
use super::transaction::format_transaction_register;

const OVERVIEW_WIDTH: usize = 68;
const BAR_WIDTH: usize = 12;
const DASHBOARD_RECENT: usize = 5;

fn bucket_label(kind: CategoryType) -> &'static str {
    match kind {
        CategoryType::Fixed => "Fixed costs",
        CategoryType::Needs => "Needs",
        CategoryType::Wants => "Wants",
        CategoryType::Savings => "Savings",
    }
}

/// Target, spent and remaining per bucket with a usage bar
pub fn format_budget_overview(
    targets: &BudgetBreakdown,
    spent: &BudgetBreakdown,
    split: &BudgetSplit,
    fmt: &AmountFormatter,
) -> String {
    let remaining = targets.remaining_after(spent);
    let mut output = format!(
        "{:12} {:>6} {:>12} {:>12} {:>12}  {}\n",
        "Bucket", "Share", "Target", "Spent", "Remaining", "Used"
    );
    output.push_str(&separator(OVERVIEW_WIDTH));
    output.push('\n');

    for kind in CategoryType::ALL {
        let target = targets.get(kind);
        let used = spent.get(kind);
        let bar = format_bar(used.cents() as f64, target.cents() as f64, BAR_WIDTH);
        let over = if remaining.get(kind).is_negative() { " !" } else { "" };

        output.push_str(&format!(
            "{:12} {:>5.1}% {:>12} {:>12} {:>12}  {}{}\n",
            bucket_label(kind),
            split.get(kind) * 100.0,
            fmt.format(target),
            fmt.format(used),
            fmt.format(remaining.get(kind)),
            bar,
            over
        ));
    }

    output.push_str(&separator(OVERVIEW_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:12} {:>6} {:>12} {:>12} {:>12}\n",
        "Total",
        "",
        fmt.format(targets.total()),
        fmt.format(spent.total()),
        fmt.format(remaining.total())
    ));

    output
}

/// Balance, cycle summary, budget overview, recent activity and goals
pub fn format_dashboard(ledger: &Ledger, fmt: &AmountFormatter, date_format: &str) -> String {
    let profile = ledger.profile();
    let cycle = ledger.current_cycle();
    let spent = ledger.compute_cycle_spend();

    let cycle_income: Money = cycle
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let cycle_expenses: Money = cycle
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();

    let mut output = String::new();
    output.push_str(&format!("Balance:        {}\n", fmt.format(profile.current_balance)));
    match profile.last_salary_date {
        Some(date) => output.push_str(&format!(
            "Last salary:    {}\n",
            date.format(date_format)
        )),
        None => output.push_str("Last salary:    (none recorded)\n"),
    }
    output.push_str(&format!(
        "This cycle:     {} in, {} out ({} transactions)\n\n",
        fmt.format(cycle_income),
        fmt.format(cycle_expenses),
        cycle.len()
    ));

    output.push_str(&format_budget_overview(
        &profile.budget_distribution,
        &spent,
        &profile.budget_split,
        fmt,
    ));

    output.push_str("\nRecent transactions\n");
    let recent: Vec<_> = cycle.into_iter().take(DASHBOARD_RECENT).collect();
    output.push_str(&format_transaction_register(
        &recent,
        fmt,
        ledger.classifier(),
        date_format,
    ));

    if !profile.savings_goals.is_empty() {
        output.push_str("\nSavings goals\n");
        for goal in &profile.savings_goals {
            output.push_str(&format!(
                "  {:20} {:>12} / {:>12}  {:>5.1}%\n",
                goal.name,
                fmt.format(goal.current_amount),
                fmt.format(goal.target_amount),
                goal.progress_percent()
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NewTransaction, SavingsGoal};
    use crate::models::{ProfileUpdate, SequentialIdGenerator};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_overview_rows() {
        let targets = BudgetBreakdown::new(
            Money::from_units(500, 0),
            Money::from_units(300, 0),
            Money::from_units(100, 0),
            Money::from_units(100, 0),
        );
        let spent = BudgetBreakdown::new(
            Money::zero(),
            Money::from_units(30, 0),
            Money::from_units(120, 0),
            Money::zero(),
        );

        let output = format_budget_overview(
            &targets,
            &spent,
            &BudgetSplit::default(),
            &AmountFormatter::default(),
        );

        let needs = output.lines().find(|l| l.starts_with("Needs")).unwrap();
        assert!(needs.contains("30.0%"));
        assert!(needs.contains("€300.00"));
        assert!(needs.contains("€270.00"));

        let wants = output.lines().find(|l| l.starts_with("Wants")).unwrap();
        assert!(wants.contains("-€20.00"));
        assert!(wants.ends_with(" !"));

        let total = output.lines().last().unwrap();
        assert!(total.contains("€1000.00"));
        assert!(total.contains("€150.00"));
    }

    #[test]
    fn test_dashboard() {
        let mut ledger = Ledger::default().with_id_generator(SequentialIdGenerator::new());
        let day = |d| Utc.with_ymd_and_hms(2025, 11, d, 9, 0, 0).unwrap();
        ledger.record_transaction(NewTransaction::income(Money::from_units(2000, 0), "Gehalt", day(1)));
        ledger.record_transaction(
            NewTransaction::expense(Money::from_units(80, 0), "Bio-Markt", day(2))
                .with_category(Category::new("Lebensmittel", CategoryType::Needs)),
        );
        ledger.update_profile(ProfileUpdate {
            savings_goals: Some(vec![SavingsGoal::new("Urlaub", Money::from_units(1500, 0))]),
            ..ProfileUpdate::default()
        });

        let output = format_dashboard(&ledger, &AmountFormatter::default(), "%Y-%m-%d");

        assert!(output.starts_with("Balance:        €6920.00\n"));
        assert!(output.contains("This cycle:     €2000.00 in, €80.00 out (2 transactions)"));
        assert!(output.contains("Bio-Markt"));
        assert!(output.contains("Urlaub"));
    }

    #[test]
    fn test_dashboard_hidden() {
        let ledger = Ledger::default();
        let output = format_dashboard(&ledger, &AmountFormatter::new("€", true), "%Y-%m-%d");

        assert!(output.contains("Last salary:    (none recorded)"));
        assert!(!output.contains("5000"));
    }
}
