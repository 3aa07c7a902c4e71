//! CLI command handlers
//!
//! Commands run inside one in-memory session: the shell and script runner
//! split each line into words, parse them with clap and dispatch to the
//! handler for the command group.

pub mod account;
pub mod budget;
pub mod currency;
pub mod export;
pub mod profile;
pub mod report;
pub mod shell;
pub mod transaction;

use std::io::Write;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use crate::auth::{AuthSession, MemoryAuthProvider, MemoryProfileStore};
use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Currency, Money};
use crate::store::FinanceStore;

pub use account::{handle_account_command, AccountCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use currency::{handle_currency_command, CurrencyCommands};
pub use export::{handle_export_command, handle_import_command};
pub use profile::{handle_profile_command, ProfileCommands};
pub use report::{handle_balance, handle_spending, handle_summary, handle_trend};
pub use shell::{run_script, run_shell, tokenize, ScriptError};
pub use transaction::{handle_transaction_command, TransactionCommands};

/// Everything a command can read or change
pub struct Session {
    pub store: FinanceStore,
    pub auth: AuthSession<MemoryAuthProvider, MemoryProfileStore>,
    pub paths: LedgerPaths,
    pub settings: Settings,
}

impl Session {
    /// Fresh session configured from `settings`.
    ///
    /// An unknown `default_currency` falls back to the catalog's first entry.
    pub fn new(paths: LedgerPaths, settings: Settings) -> Self {
        let mut store = FinanceStore::with_policy(settings.spent_policy);
        if let Some(currency) = store.currencies().find(&settings.default_currency).cloned() {
            store.set_currency(currency);
        }
        Self {
            store,
            auth: AuthSession::new(MemoryAuthProvider::new(), MemoryProfileStore::new()),
            paths,
            settings,
        }
    }

    pub fn currency(&self) -> &Currency {
        self.store.selected_currency()
    }

    pub fn symbol(&self) -> &str {
        &self.store.selected_currency().symbol
    }

    /// Today's date for reports
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A single session command, as typed at the prompt or in a script
#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct SessionCommand {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record, list and delete transactions
    #[command(subcommand, alias = "txn")]
    Tx(TransactionCommands),

    /// Manage category budgets
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Manage bank, investment and crypto accounts
    #[command(subcommand)]
    Account(AccountCommands),

    /// Show or change the display currency
    #[command(subcommand)]
    Currency(CurrencyCommands),

    /// Income minus expenses
    Balance,

    /// Expenses grouped by category, largest first
    Spending,

    /// Expense totals over time
    Trend {
        /// Show the last N days (up to ten years)
        #[arg(
            long,
            conflicts_with_all = ["months", "month"],
            value_parser = clap::value_parser!(u32).range(1..=report::MAX_TREND_DAYS)
        )]
        days: Option<u32>,
        /// Show the last N calendar months (up to a century)
        #[arg(
            long,
            conflicts_with = "month",
            value_parser = clap::value_parser!(u32).range(1..=report::MAX_TREND_MONTHS)
        )]
        months: Option<u32>,
        /// Show every day of the current month
        #[arg(long)]
        month: bool,
    },

    /// Totals and the most recent transactions
    Summary,

    /// Write a snapshot of the session
    Export {
        /// json, yaml, csv or remote
        #[arg(default_value = "json")]
        format: String,
        /// Output file (defaults to the export directory)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Load a json or yaml snapshot into the session
    Import {
        /// Snapshot file written by `export json` or `export yaml`
        path: String,
        /// json or yaml (defaults to the file extension)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Sign up, sign in and manage the profile
    #[command(subcommand)]
    Profile(ProfileCommands),
}

/// Parse and run one tokenized command line
pub fn execute(session: &mut Session, args: &[String], out: &mut dyn Write) -> LedgerResult<()> {
    let parsed = match SessionCommand::try_parse_from(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            use clap::error::ErrorKind;
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    write!(out, "{}", e.render())?;
                    Ok(())
                }
                _ => Err(LedgerError::Validation(e.render().to_string().trim().to_string())),
            };
        }
    };

    match parsed.command {
        Commands::Tx(cmd) => handle_transaction_command(session, cmd, out),
        Commands::Budget(cmd) => handle_budget_command(session, cmd, out),
        Commands::Account(cmd) => handle_account_command(session, cmd, out),
        Commands::Currency(cmd) => handle_currency_command(session, cmd, out),
        Commands::Balance => handle_balance(session, out),
        Commands::Spending => handle_spending(session, out),
        Commands::Trend {
            days,
            months,
            month,
        } => handle_trend(session, days, months, month, out),
        Commands::Summary => handle_summary(session, out),
        Commands::Export { format, output } => {
            handle_export_command(session, &format, output.as_deref(), out)
        }
        Commands::Import { path, format } => {
            handle_import_command(session, &path, format.as_deref(), out)
        }
        Commands::Profile(cmd) => handle_profile_command(session, cmd, out),
    }
}

/// Parse an amount typed by the user; range checks are left to `validate()`
pub(crate) fn parse_amount(input: &str) -> LedgerResult<Money> {
    Money::parse(input).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid amount '{}'. Use a format like '45.50'. ({})",
            input, e
        ))
    })
}

/// Parse a `YYYY-MM-DD` date typed by the user
pub(crate) fn parse_date(input: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!(
            "Invalid date '{}'. Use the format YYYY-MM-DD.",
            input
        ))
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::{run, session};
    use super::*;
    use crate::config::Settings;
    use crate::store::SpentPolicy;

    #[test]
    fn test_session_uses_settings() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp.path().to_path_buf());
        let settings = Settings {
            default_currency: "eur".into(),
            spent_policy: SpentPolicy::Accumulate,
            ..Settings::default()
        };
        let session = Session::new(paths, settings);
        assert_eq!(session.currency().code, "EUR");
        assert_eq!(session.store.policy(), SpentPolicy::Accumulate);
    }

    #[test]
    fn test_unknown_currency_setting_falls_back() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp.path().to_path_buf());
        let settings = Settings {
            default_currency: "XYZ".into(),
            ..Settings::default()
        };
        assert_eq!(Session::new(paths, settings).currency().code, "USD");
    }

    #[test]
    fn test_unknown_command_is_a_validation_error() {
        let (mut session, _temp) = session();
        let err = run(&mut session, "frobnicate").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_help_is_printed_not_an_error() {
        let (mut session, _temp) = session();
        let output = run(&mut session, "help").unwrap();
        assert!(output.contains("budget"));
    }
}
