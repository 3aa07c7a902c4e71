//! Reports over a session
//!
//! Read-only views computed from the store: the home-screen cash-flow summary
//! and the spending trends shown by the analytics screens.

pub mod summary;
pub mod trend;

pub use summary::CashFlowSummary;
pub use trend::{daily_spending, month_to_date, monthly_spending, DailySpending, MonthlySpending};
