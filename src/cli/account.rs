//! Account CLI commands

use std::io::Write;

use clap::Subcommand;

use super::{parse_amount, Session};
use crate::display::account::{format_account_details, format_accounts_by_kind};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountId, AccountKind, AccountPatch, NewAccount};

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Add an account
    Add {
        /// bank, investment or crypto
        kind: String,
        /// Account name
        name: String,
        /// Current balance
        #[arg(allow_negative_numbers = true)]
        balance: String,
        /// Bank, broker or exchange holding the account
        institution: String,
        /// Last 4 digits of the account number (bank accounts)
        #[arg(short, long)]
        last_four: Option<String>,
    },
    /// List accounts grouped by type
    List {
        /// Only accounts of this type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },
    /// Show an account
    Show {
        /// Account name or ID
        account: String,
    },
    /// Change account fields
    Edit {
        /// Account name or ID
        account: String,
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, allow_negative_numbers = true)]
        balance: Option<String>,
        #[arg(short, long)]
        institution: Option<String>,
        #[arg(short, long)]
        last_four: Option<String>,
        /// Growth percentage (investment and crypto accounts)
        #[arg(short, long, allow_negative_numbers = true)]
        growth: Option<f64>,
    },
    /// Delete an account. Transactions keep their link to it.
    Delete {
        /// Account name or ID
        account: String,
    },
}

fn parse_kind(input: &str) -> LedgerResult<AccountKind> {
    AccountKind::parse(input).ok_or_else(|| {
        LedgerError::Validation(format!(
            "Invalid account type '{}'. Valid types: bank, investment, crypto",
            input
        ))
    })
}

fn resolve(session: &Session, input: &str) -> LedgerResult<AccountId> {
    session
        .store
        .find_account(input)
        .map(|a| a.id)
        .ok_or_else(|| LedgerError::account_not_found(input))
}

pub fn handle_account_command(
    session: &mut Session,
    cmd: AccountCommands,
    out: &mut dyn Write,
) -> LedgerResult<()> {
    match cmd {
        AccountCommands::Add {
            kind,
            name,
            balance,
            institution,
            last_four,
        } => {
            let kind = parse_kind(&kind)?;
            let mut input = NewAccount::new(kind, name, parse_amount(&balance)?, institution);
            if let Some(digits) = last_four {
                if kind.tracks_growth() {
                    return Err(LedgerError::Validation(format!(
                        "{} accounts do not have an account number",
                        kind
                    )));
                }
                input = input.with_last_four(digits);
            }
            input
                .validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;

            let account = session.store.add_account(input);
            writeln!(out, "Created account: {}", account.name)?;
            writeln!(out, "  Type:    {}", account.kind)?;
            writeln!(
                out,
                "  Balance: {}",
                session.store.format_money(account.balance)
            )?;
            writeln!(out, "  ID:      {}", account.id)?;
        }

        AccountCommands::List { kind } => {
            let accounts = match kind {
                Some(kind) => {
                    let kind = parse_kind(&kind)?;
                    session
                        .store
                        .accounts_by_kind(kind)
                        .into_iter()
                        .cloned()
                        .collect()
                }
                None => session.store.accounts().to_vec(),
            };
            write!(out, "{}", format_accounts_by_kind(&accounts, session.symbol()))?;
        }

        AccountCommands::Show { account } => {
            let id = resolve(session, &account)?;
            if let Some(found) = session.store.account(id) {
                write!(out, "{}", format_account_details(found, session.symbol()))?;
            }
        }

        AccountCommands::Edit {
            account,
            kind,
            name,
            balance,
            institution,
            last_four,
            growth,
        } => {
            let id = resolve(session, &account)?;
            let patch = AccountPatch {
                kind: kind.as_deref().map(parse_kind).transpose()?,
                name,
                balance: balance.as_deref().map(parse_amount).transpose()?,
                institution,
                last_four,
                growth,
            };
            if patch.is_empty() {
                writeln!(out, "No changes specified.")?;
                return Ok(());
            }
            patch
                .validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;

            if let Some(updated) = session.store.update_account(id, &patch) {
                writeln!(out, "Updated account: {}", updated.name)?;
            }
        }

        AccountCommands::Delete { account } => {
            let id = resolve(session, &account)?;
            if let Some(removed) = session.store.delete_account(id) {
                writeln!(out, "Deleted account: {}", removed.name)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::test_support::{run, session};
    use crate::models::{AccountKind, Money};

    #[test]
    fn test_add_and_list() {
        let (mut session, _temp) = session();
        run(&mut session, "account add bank Checking 2500 Chase --last-four 4242").unwrap();
        run(&mut session, "account add crypto \"Cold Wallet\" 1500 Ledger").unwrap();

        let listed = run(&mut session, "account list").unwrap();
        assert!(listed.contains("Bank Accounts"));
        assert!(listed.contains("Cold Wallet"));
        assert!(listed.contains("Total balance: $4000.00"));

        let banks = run(&mut session, "account list --type bank").unwrap();
        assert!(!banks.contains("Cold Wallet"));
        assert_eq!(session.store.total_account_balance(), Money::from_cents(400000));
    }

    #[test]
    fn test_add_validation() {
        let (mut session, _temp) = session();
        let err = run(&mut session, "account add bank Checking 10 Chase").unwrap_err();
        assert!(err.to_string().contains("last 4 digits"));
        assert!(run(&mut session, "account add crypto Wallet 10 Ledger --last-four 1234")
            .unwrap_err()
            .is_validation());
        assert!(run(&mut session, "account add savings Jar 10 Home")
            .unwrap_err()
            .is_validation());
        assert!(session.store.accounts().is_empty());
    }

    #[test]
    fn test_edit_changes_kind() {
        let (mut session, _temp) = session();
        run(&mut session, "account add bank Brokerage 10 Schwab --last-four 1234").unwrap();
        run(&mut session, "account edit brokerage --type investment --growth 4.5").unwrap();

        let account = &session.store.accounts()[0];
        assert_eq!(account.kind, AccountKind::Investment);
        assert_eq!(account.growth, Some(4.5));
        assert!(account.last_four.is_none());

        let shown = run(&mut session, "account show Brokerage").unwrap();
        assert!(shown.contains("Growth:      +4.5%"));
    }

    #[test]
    fn test_delete_keeps_transaction_link() {
        let (mut session, _temp) = session();
        run(&mut session, "account add bank Checking 10 Chase --last-four 4242").unwrap();
        run(&mut session, "tx add 5 food Coffee --account Checking").unwrap();
        run(&mut session, "account delete Checking").unwrap();

        assert!(session.store.accounts().is_empty());
        assert!(session.store.transactions()[0].account_id.is_some());
        assert!(run(&mut session, "account show Checking")
            .unwrap_err()
            .is_not_found());
    }
}
