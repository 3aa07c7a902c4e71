//! Account display formatting
//!
//! Accounts are listed in sections by kind, each with its own subtotal.

use crate::models::{Account, AccountKind, Money};

fn format_growth(growth: f64) -> String {
    format!("{:+.1}%", growth)
}

/// One section per account kind that has accounts, then a grand total
pub fn format_accounts_by_kind(accounts: &[Account], symbol: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    for kind in AccountKind::ALL {
        let section: Vec<&Account> = accounts.iter().filter(|a| a.kind == kind).collect();
        if section.is_empty() {
            continue;
        }

        output.push_str(&format!("{}\n", kind.heading()));
        for account in &section {
            let detail = match (account.masked_number(), account.growth) {
                (Some(number), _) => number,
                (None, Some(growth)) => format_growth(growth),
                (None, None) => String::new(),
            };
            output.push_str(&format!(
                "  {:<13} {:<name_width$}  {:<16} {:>14}  {}\n",
                account.id.to_string(),
                account.name,
                account.institution,
                account.balance.format_with_symbol(symbol),
                detail,
                name_width = name_width,
            ));
        }
        let subtotal: Money = section.iter().map(|a| a.balance).sum();
        output.push_str(&format!(
            "  {:<13} {:<name_width$}  {:<16} {:>14}\n\n",
            "",
            "Subtotal",
            "",
            subtotal.format_with_symbol(symbol),
            name_width = name_width,
        ));
    }

    let total: Money = accounts.iter().map(|a| a.balance).sum();
    output.push_str(&format!(
        "Total balance: {}\n",
        total.format_with_symbol(symbol)
    ));
    output
}

pub fn format_account_details(account: &Account, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  Type:        {}\n", account.kind));
    output.push_str(&format!("  ID:          {}\n", account.id));
    output.push_str(&format!("  Institution: {}\n", account.institution));
    output.push_str(&format!(
        "  Balance:     {}\n",
        account.balance.format_with_symbol(symbol)
    ));
    if let Some(number) = account.masked_number() {
        output.push_str(&format!("  Number:      {}\n", number));
    }
    if let Some(growth) = account.growth {
        output.push_str(&format!("  Growth:      {}\n", format_growth(growth)));
    }
    output
}
