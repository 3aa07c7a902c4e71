//! CSV export of transactions, budgets and accounts

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::store::FinanceStore;

fn csv_error(e: csv::Error) -> LedgerError {
    LedgerError::Export(e.to_string())
}

/// One row per transaction, in insertion order. Amounts are signed.
pub fn export_transactions_csv<W: Write>(store: &FinanceStore, writer: W) -> LedgerResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "ID", "Date", "Type", "Category", "Description", "Amount", "Tags", "Account",
    ])
    .map_err(csv_error)?;

    for txn in store.transactions() {
        let account = match txn.account_id {
            Some(id) => store
                .account(id)
                .map(|a| a.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            None => String::new(),
        };
        let tags: Vec<&str> = txn.tags.iter().map(String::as_str).collect();

        csv.write_record([
            txn.id.as_uuid().to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.kind.to_string(),
            txn.category.name().to_string(),
            txn.description.clone(),
            txn.signed_amount().to_string(),
            tags.join(";"),
            account,
        ])
        .map_err(csv_error)?;
    }

    csv.flush()?;
    Ok(())
}

pub fn export_budgets_csv<W: Write>(store: &FinanceStore, writer: W) -> LedgerResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Category", "Period", "Limit", "Spent", "Remaining", "Progress"])
        .map_err(csv_error)?;

    for budget in store.budgets() {
        csv.write_record([
            budget.id.as_uuid().to_string(),
            budget.category.name().to_string(),
            budget.period.to_string(),
            budget.amount.to_string(),
            budget.spent.to_string(),
            budget.remaining().to_string(),
            format!("{:.2}", budget.progress()),
        ])
        .map_err(csv_error)?;
    }

    csv.flush()?;
    Ok(())
}

pub fn export_accounts_csv<W: Write>(store: &FinanceStore, writer: W) -> LedgerResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Type", "Name", "Institution", "Balance", "Last Four", "Growth"])
        .map_err(csv_error)?;

    for account in store.accounts() {
        csv.write_record([
            account.id.as_uuid().to_string(),
            account.kind.to_string(),
            account.name.clone(),
            account.institution.clone(),
            account.balance.to_string(),
            account.last_four.clone().unwrap_or_default(),
            account.growth.map(|g| format!("{:.1}", g)).unwrap_or_default(),
        ])
        .map_err(csv_error)?;
    }

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountKind, Category, Money, NewAccount, NewBudget, NewTransaction};

    fn rows(data: &[u8]) -> Vec<csv::StringRecord> {
        csv::Reader::from_reader(data)
            .records()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_transactions_csv_quotes_and_signs() {
        let mut store = FinanceStore::new();
        let account = store.add_account(NewAccount::new(
            AccountKind::Investment,
            "Brokerage",
            Money::zero(),
            "Schwab",
        ));
        store.add_transaction(
            NewTransaction::expense(
                Money::from_cents(4550),
                Category::FoodAndDrinks,
                "Lunch, with \"team\"",
            )
            .tagged("work")
            .tagged("food")
            .through(account.id),
        );
        store.add_transaction(NewTransaction::income(
            Money::from_cents(100000),
            Category::Gifts,
            "Birthday",
        ));
        store.delete_account(account.id);

        let mut buffer = Vec::new();
        export_transactions_csv(&store, &mut buffer).unwrap();
        let records = rows(&buffer);

        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][2], "Expense");
        assert_eq!(&records[0][3], "Food & Drinks");
        assert_eq!(&records[0][4], "Lunch, with \"team\"");
        assert_eq!(&records[0][5], "-45.50");
        assert_eq!(&records[0][6], "food;work");
        assert_eq!(&records[0][7], "Unknown");
        assert_eq!(&records[1][5], "1000.00");
        assert_eq!(&records[1][7], "");
    }

    #[test]
    fn test_budgets_csv() {
        let mut store = FinanceStore::new();
        store.add_budget(NewBudget::monthly(Category::Bills, Money::from_cents(10000)));
        store.add_transaction(NewTransaction::expense(
            Money::from_cents(2500),
            Category::Bills,
            "Power",
        ));

        let mut buffer = Vec::new();
        export_budgets_csv(&store, &mut buffer).unwrap();
        let records = rows(&buffer);
        assert_eq!(&records[0][1], "Bills");
        assert_eq!(&records[0][4], "25.00");
        assert_eq!(&records[0][5], "75.00");
        assert_eq!(&records[0][6], "25.00");
    }

    #[test]
    fn test_accounts_csv() {
        let mut store = FinanceStore::new();
        store.add_account(
            NewAccount::new(AccountKind::Bank, "Checking", Money::from_cents(1000), "Chase")
                .with_last_four("4242"),
        );
        store.add_account(NewAccount::new(
            AccountKind::Crypto,
            "Wallet",
            Money::from_cents(500),
            "Ledger",
        ));

        let mut buffer = Vec::new();
        export_accounts_csv(&store, &mut buffer).unwrap();
        let records = rows(&buffer);
        assert_eq!(&records[0][5], "4242");
        assert_eq!(&records[0][6], "");
        assert_eq!(&records[1][5], "");
        assert_eq!(&records[1][6], "0.0");
    }
}
