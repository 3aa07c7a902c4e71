//! Currency CLI commands

use std::io::Write;

use clap::Subcommand;

use super::Session;
use crate::error::{LedgerError, LedgerResult};

#[derive(Subcommand)]
pub enum CurrencyCommands {
    /// List available currencies
    List,
    /// Show the selected currency
    Show,
    /// Select the display currency. Amounts are not converted.
    Set {
        /// ISO code, e.g. EUR
        code: String,
    },
}

pub fn handle_currency_command(
    session: &mut Session,
    cmd: CurrencyCommands,
    out: &mut dyn Write,
) -> LedgerResult<()> {
    match cmd {
        CurrencyCommands::List => {
            let selected = session.currency().code.clone();
            for currency in session.store.currencies().all() {
                let marker = if currency.code == selected { "*" } else { " " };
                writeln!(
                    out,
                    "{} {:<4} {:<3} {}",
                    marker, currency.code, currency.symbol, currency.name
                )?;
            }
        }

        CurrencyCommands::Show => {
            writeln!(out, "{}", session.currency())?;
        }

        CurrencyCommands::Set { code } => {
            let currency = session
                .store
                .currencies()
                .find(&code)
                .cloned()
                .ok_or_else(|| LedgerError::currency_not_found(&code))?;
            session.store.set_currency(currency);
            writeln!(out, "Currency set to {}", session.currency())?;
        }
    }

    Ok(())
}
