//! Transaction display formatting

use crate::models::{Account, Transaction};

use super::truncate;

fn format_row(txn: &Transaction, symbol: &str, date_format: &str) -> String {
    format!(
        "{:<13} {:10} {:<24} {:<15} {:>14}",
        txn.id.to_string(),
        txn.date.format(date_format).to_string(),
        truncate(&txn.description, 24),
        txn.category.name(),
        txn.signed_amount().format_with_symbol(symbol)
    )
}

/// Table of transactions in the order given; `date_format` is a chrono format string
pub fn format_transaction_list(
    transactions: &[&Transaction],
    symbol: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = format!(
        "{:<13} {:10} {:<24} {:<15} {:>14}\n",
        "ID", "Date", "Description", "Category", "Amount"
    );
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_row(txn, symbol, date_format));
        output.push('\n');
    }
    output
}

/// Detail view; `account` is the linked account when it still exists
pub fn format_transaction_details(
    txn: &Transaction,
    account: Option<&Account>,
    symbol: &str,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d %H:%M")));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Description: {}\n", txn.description));

    if !txn.tags.is_empty() {
        let tags: Vec<&str> = txn.tags.iter().map(String::as_str).collect();
        output.push_str(&format!("Tags:        {}\n", tags.join(", ")));
    }

    match (txn.account_id, account) {
        (Some(_), Some(account)) => {
            output.push_str(&format!("Account:     {}\n", account.name));
        }
        (Some(id), None) => {
            output.push_str(&format!("Account:     {} (unknown)\n", id));
        }
        (None, _) => {}
    }

    output
}
