//! Balance, spending, trend and summary commands

use std::io::Write;

use super::Session;
use crate::display::report::{
    format_daily_trend, format_monthly_trend, format_spending_by_category, format_summary,
};
use crate::error::LedgerResult;
use crate::reports::{daily_spending, month_to_date, monthly_spending, CashFlowSummary};

const DEFAULT_TREND_DAYS: u32 = 7;
pub(crate) const MAX_TREND_DAYS: i64 = 3660;
pub(crate) const MAX_TREND_MONTHS: i64 = 1200;

pub fn handle_balance(session: &Session, out: &mut dyn Write) -> LedgerResult<()> {
    let store = &session.store;
    writeln!(out, "Income:   {}", store.format_money(store.total_income()))?;
    writeln!(out, "Expenses: {}", store.format_money(store.total_expenses()))?;
    writeln!(out, "Balance:  {}", store.format_money(store.balance()))?;
    Ok(())
}

pub fn handle_spending(session: &Session, out: &mut dyn Write) -> LedgerResult<()> {
    let spending = session.store.spending_by_category();
    write!(
        out,
        "{}",
        format_spending_by_category(&spending, session.symbol())
    )?;
    Ok(())
}

/// Daily totals by default; `months` switches to calendar months and
/// `month` to every day of the current month
pub fn handle_trend(
    session: &Session,
    days: Option<u32>,
    months: Option<u32>,
    month: bool,
    out: &mut dyn Write,
) -> LedgerResult<()> {
    let today = session.today();
    let text = if month {
        format_daily_trend(&month_to_date(&session.store, today), session.symbol())
    } else if let Some(months) = months {
        format_monthly_trend(
            &monthly_spending(&session.store, today, months),
            session.symbol(),
        )
    } else {
        let days = days.unwrap_or(DEFAULT_TREND_DAYS);
        format_daily_trend(&daily_spending(&session.store, today, days), session.symbol())
    };
    write!(out, "{}", text)?;
    Ok(())
}

pub fn handle_summary(session: &Session, out: &mut dyn Write) -> LedgerResult<()> {
    let summary = CashFlowSummary::generate(&session.store);
    write!(out, "{}", format_summary(&summary, session.symbol()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::test_support::{run, session};

    #[test]
    fn test_balance() {
        let (mut session, _temp) = session();
        run(&mut session, "tx add 5000 salary Salary").unwrap();
        run(&mut session, "tx add 45.50 food Lunch").unwrap();
        let output = run(&mut session, "balance").unwrap();
        assert!(output.contains("Income:   $5000.00"));
        assert!(output.contains("Expenses: $45.50"));
        assert!(output.contains("Balance:  $4954.50"));
    }

    #[test]
    fn test_spending_orders_by_amount() {
        let (mut session, _temp) = session();
        run(&mut session, "tx add 10 food Lunch").unwrap();
        run(&mut session, "tx add 90 bills Rent").unwrap();
        run(&mut session, "tx add 100 salary Pay").unwrap();
        let output = run(&mut session, "spending").unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Bills"));
        assert!(lines[1].starts_with("Food & Drinks"));
    }

    #[test]
    fn test_trend_shapes() {
        let (mut session, _temp) = session();
        run(&mut session, "tx add 12 food Lunch").unwrap();

        let daily = run(&mut session, "trend").unwrap();
        assert_eq!(daily.lines().count(), 7);
        assert!(daily.lines().last().unwrap().contains("$12.00"));

        assert_eq!(run(&mut session, "trend --days 3").unwrap().lines().count(), 3);
        assert_eq!(run(&mut session, "trend --months 12").unwrap().lines().count(), 12);
        assert!(run(&mut session, "trend --month").unwrap().lines().count() >= 28);
        assert!(run(&mut session, "trend --days 3 --month").is_err());
    }

    #[test]
    fn test_trend_window_is_bounded() {
        let (mut session, _temp) = session();
        for line in [
            "trend --days 100000000",
            "trend --days 3661",
            "trend --days 0",
            "trend --months 1201",
        ] {
            let err = run(&mut session, line).unwrap_err();
            assert!(err.is_validation(), "{} should be rejected", line);
        }
        assert_eq!(run(&mut session, "trend --days 3660").unwrap().lines().count(), 3660);
        assert_eq!(run(&mut session, "trend --months 1200").unwrap().lines().count(), 1200);
    }

    #[test]
    fn test_summary_lists_recent() {
        let (mut session, _temp) = session();
        for (i, name) in ["One", "Two", "Three", "Four"].iter().enumerate() {
            run(&mut session, &format!("tx add 1 food {} --date 2024-01-0{}", name, i + 1)).unwrap();
        }
        let output = run(&mut session, "summary").unwrap();
        assert!(output.contains("Transactions: 4"));
        assert!(output.contains("Four"));
        assert!(!output.contains("One"));
    }
}
