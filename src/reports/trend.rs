//! Spending trends
//!
//! Expense totals bucketed per calendar day or month (UTC), oldest bucket first.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::Money;
use crate::store::FinanceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailySpending {
    pub date: NaiveDate,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySpending {
    pub year: i32,
    pub month: u32,
    /// Abbreviated month name, e.g. "Jan"
    pub label: String,
    pub amount: Money,
}

fn expenses_by_day(store: &FinanceStore) -> HashMap<NaiveDate, Money> {
    let mut totals: HashMap<NaiveDate, Money> = HashMap::new();
    for txn in store.transactions().iter().filter(|t| t.is_expense()) {
        *totals.entry(txn.date.date_naive()).or_default() += txn.amount;
    }
    totals
}

/// Expense totals for the `days` days ending at `today`
///
/// Days before the earliest representable date are left out.
pub fn daily_spending(store: &FinanceStore, today: NaiveDate, days: u32) -> Vec<DailySpending> {
    let totals = expenses_by_day(store);
    let mut window: Vec<DailySpending> = (0..u64::from(days))
        .map_while(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| DailySpending {
            date,
            amount: totals.get(&date).copied().unwrap_or_default(),
        })
        .collect();
    window.reverse();
    window
}

/// Expense totals for every day of the month containing `today`
pub fn month_to_date(store: &FinanceStore, today: NaiveDate) -> Vec<DailySpending> {
    let totals = expenses_by_day(store);
    let first = today.with_day(1).unwrap_or(today);
    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .map(|date| DailySpending {
            date,
            amount: totals.get(&date).copied().unwrap_or_default(),
        })
        .collect()
}

/// Expense totals for the `months` calendar months ending with the month of `today`
pub fn monthly_spending(store: &FinanceStore, today: NaiveDate, months: u32) -> Vec<MonthlySpending> {
    let mut totals: HashMap<(i32, u32), Money> = HashMap::new();
    for txn in store.transactions().iter().filter(|t| t.is_expense()) {
        let date = txn.date.date_naive();
        *totals.entry((date.year(), date.month())).or_default() += txn.amount;
    }

    let current = i64::from(today.year()) * 12 + i64::from(today.month0());
    let mut window: Vec<MonthlySpending> = (0..i64::from(months))
        .map_while(|offset| {
            let index = current - offset;
            let year = i32::try_from(index.div_euclid(12)).ok()?;
            let month = index.rem_euclid(12) as u32 + 1;
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(MonthlySpending {
                year,
                month,
                label: first.format("%b").to_string(),
                amount: totals.get(&(year, month)).copied().unwrap_or_default(),
            })
        })
        .collect();
    window.reverse();
    window
}
