//! Budget display formatting

use crate::models::Budget;

use super::report::{format_bar, format_percentage};

const BAR_WIDTH: usize = 20;

/// Budget table with a progress bar per row.
///
/// The bar is capped at full width; the percentage column shows the real
/// figure, which may exceed 100.
pub fn format_budget_list(budgets: &[Budget], symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let mut output = format!(
        "{:<13} {:<15} {:<8} {:>12} {:>12}  {:<width$} {:>6}\n",
        "ID",
        "Category",
        "Period",
        "Spent",
        "Limit",
        "Progress",
        "",
        width = BAR_WIDTH
    );
    output.push_str(&"-".repeat(88));
    output.push('\n');

    for budget in budgets {
        let progress = budget.progress();
        let marker = if budget.is_over() { " !" } else { "" };
        output.push_str(&format!(
            "{:<13} {:<15} {:<8} {:>12} {:>12}  {} {:>6}{}\n",
            budget.id.to_string(),
            budget.category.name(),
            budget.period,
            budget.spent.format_with_symbol(symbol),
            budget.amount.format_with_symbol(symbol),
            format_bar(progress.min(100.0), 100.0, BAR_WIDTH),
            format_percentage(progress),
            marker
        ));
    }
    output
}

pub fn format_budget_details(budget: &Budget, symbol: &str) -> String {
    let remaining = budget.remaining();
    let mut output = String::new();
    output.push_str(&format!("Budget:    {}\n", budget.id));
    output.push_str(&format!("Category:  {}\n", budget.category));
    output.push_str(&format!("Period:    {}\n", budget.period));
    output.push_str(&format!(
        "Limit:     {}\n",
        budget.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Spent:     {} ({})\n",
        budget.spent.format_with_symbol(symbol),
        format_percentage(budget.progress())
    ));
    if remaining.is_negative() {
        output.push_str(&format!(
            "Over by:   {}\n",
            remaining.abs().format_with_symbol(symbol)
        ));
    } else {
        output.push_str(&format!(
            "Remaining: {}\n",
            remaining.format_with_symbol(symbol)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, NewBudget};

    fn budget(spent: i64) -> Budget {
        let mut budget = Budget::from_input(NewBudget::monthly(
            Category::FoodAndDrinks,
            Money::from_cents(20000),
        ));
        budget.spent = Money::from_cents(spent);
        budget
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_budget_list(&[], "$"), "No budgets found.\n");
    }

    #[test]
    fn test_progress_column() {
        let output = format_budget_list(&[budget(4550)], "$");
        assert!(output.contains("$45.50"));
        assert!(output.contains("$200.00"));
        assert!(output.contains("23%"));
        assert!(!output.contains(" !"));
    }

    #[test]
    fn test_overspent_bar_is_clamped() {
        let output = format_budget_list(&[budget(30000)], "$");
        assert!(output.contains(&"█".repeat(BAR_WIDTH)));
        assert!(output.contains("150%"));
        assert!(output.contains(" !"));
    }

    #[test]
    fn test_details() {
        let under = format_budget_details(&budget(5000), "£");
        assert!(under.contains("Remaining: £150.00"));

        let over = format_budget_details(&budget(25000), "£");
        assert!(over.contains("Over by:   £50.00"));
    }
}
