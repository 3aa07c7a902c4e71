//! Cash-flow summary
//!
//! Income, expenses and balance for the whole session, with the most recent
//! transactions.

use serde::Serialize;

use crate::models::{Money, Transaction};
use crate::store::FinanceStore;

/// Number of transactions shown on the summary
pub const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct CashFlowSummary {
    pub income: Money,
    pub expenses: Money,
    pub balance: Money,
    pub transaction_count: usize,
    /// Newest first
    pub recent: Vec<Transaction>,
}

impl CashFlowSummary {
    pub fn generate(store: &FinanceStore) -> Self {
        Self {
            income: store.total_income(),
            expenses: store.total_expenses(),
            balance: store.balance(),
            transaction_count: store.transactions().len(),
            recent: newest_first(store).into_iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }
}

/// All transactions ordered by date, newest first. Equal dates keep insertion order.
pub fn newest_first(store: &FinanceStore) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = store.transactions().iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NewTransaction};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_summary_totals() {
        let mut store = FinanceStore::new();
        store.add_transaction(NewTransaction::income(
            Money::from_cents(500000),
            Category::Salary,
            "Salary",
        ));
        store.add_transaction(NewTransaction::expense(
            Money::from_cents(4550),
            Category::FoodAndDrinks,
            "Lunch",
        ));

        let summary = CashFlowSummary::generate(&store);
        assert_eq!(summary.income, Money::from_cents(500000));
        assert_eq!(summary.expenses, Money::from_cents(4550));
        assert_eq!(summary.balance, Money::from_cents(495450));
        assert_eq!(summary.transaction_count, 2);
    }

    #[test]
    fn test_recent_is_newest_first_and_limited() {
        let mut store = FinanceStore::new();
        for day in [3, 1, 4, 2] {
            let date = Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap();
            store.add_transaction(
                NewTransaction::expense(Money::from_cents(100), Category::Other, format!("day {}", day))
                    .on(date),
            );
        }

        let summary = CashFlowSummary::generate(&store);
        let descriptions: Vec<_> = summary.recent.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, ["day 4", "day 3", "day 2"]);
    }
}
