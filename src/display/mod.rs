//! Display formatting for terminal output
//!
//! Plain-text tables for the session's transactions, budgets, accounts and
//! reports. Amounts are rendered with the symbol of the selected currency.

pub mod account;
pub mod budget;
pub mod report;
pub mod transaction;

pub use account::{format_account_details, format_accounts_by_kind};
pub use budget::{format_budget_details, format_budget_list};
pub use report::{
    format_daily_trend, format_monthly_trend, format_spending_by_category, format_summary,
};
pub use transaction::{format_transaction_details, format_transaction_list};

/// Cut `s` to at most `max` characters, marking the cut with `...`
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
