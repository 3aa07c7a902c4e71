//! Report formatting for terminal output

use crate::reports::{CashFlowSummary, DailySpending, MonthlySpending};
use crate::store::CategorySpending;

const CHART_WIDTH: usize = 30;

/// Percentage with precision that shrinks as the value grows
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Horizontal bar of `width` cells filled in proportion to `value / max`
pub fn format_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }
    let filled = (((value / max) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn format_summary(summary: &CashFlowSummary, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str("Cash Flow\n");
    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format!(
        "Income:    {:>16}\n",
        summary.income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Expenses:  {:>16}\n",
        summary.expenses.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Balance:   {:>16}\n",
        summary.balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Transactions: {}\n", summary.transaction_count));

    if !summary.recent.is_empty() {
        output.push_str("\nRecent\n");
        for txn in &summary.recent {
            output.push_str(&format!(
                "  {} {:<24} {:>14}\n",
                txn.date.format("%Y-%m-%d"),
                super::truncate(&txn.description, 24),
                txn.signed_amount().format_with_symbol(symbol)
            ));
        }
    }
    output
}

/// Spending table with each category's share of total expenses
pub fn format_spending_by_category(spending: &[CategorySpending], symbol: &str) -> String {
    if spending.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let total: i64 = spending.iter().map(|s| s.amount.cents()).sum();
    let max = spending
        .iter()
        .map(|s| s.amount.as_f64())
        .fold(0.0, f64::max);

    let mut output = String::new();
    for entry in spending {
        let share = if total > 0 {
            entry.amount.cents() as f64 * 100.0 / total as f64
        } else {
            0.0
        };
        output.push_str(&format!(
            "{:<15} {:>14} {:>6}  {}\n",
            entry.category.name(),
            entry.amount.format_with_symbol(symbol),
            format_percentage(share),
            format_bar(entry.amount.as_f64(), max, CHART_WIDTH)
        ));
    }
    output
}

pub fn format_daily_trend(days: &[DailySpending], symbol: &str) -> String {
    let max = days.iter().map(|d| d.amount.as_f64()).fold(0.0, f64::max);
    let mut output = String::new();
    for day in days {
        output.push_str(&format!(
            "{} {:>14}  {}\n",
            day.date.format("%a %d %b"),
            day.amount.format_with_symbol(symbol),
            format_bar(day.amount.as_f64(), max, CHART_WIDTH)
        ));
    }
    output
}

pub fn format_monthly_trend(months: &[MonthlySpending], symbol: &str) -> String {
    let max = months.iter().map(|m| m.amount.as_f64()).fold(0.0, f64::max);
    let mut output = String::new();
    for month in months {
        output.push_str(&format!(
            "{} {} {:>14}  {}\n",
            month.label,
            month.year,
            month.amount.format_with_symbol(symbol),
            format_bar(month.amount.as_f64(), max, CHART_WIDTH)
        ));
    }
    output
}
