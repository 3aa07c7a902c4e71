//! Transaction CLI commands

use std::io::Write;

use chrono::NaiveTime;
use clap::Subcommand;

use super::{parse_amount, parse_date, Session};
use crate::display::transaction::{format_transaction_details, format_transaction_list};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, NewTransaction, Transaction, TransactionKind};

#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Amount, e.g. "45.50"
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Category name or short id (food, salary, ...)
        category: String,
        /// What the money was for
        description: String,
        /// income or expense (defaults to the category's kind)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Date (YYYY-MM-DD), defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Tag, may be repeated
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Account name or ID the money moved through
        #[arg(short, long)]
        account: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Only income or only expenses
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Maximum number to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show a transaction
    Show {
        /// Transaction ID
        id: String,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
    /// List the categories a transaction can use
    Categories,
}

pub(crate) fn parse_category(input: &str) -> LedgerResult<Category> {
    Category::parse(input).ok_or_else(|| {
        let known: Vec<&str> = Category::EXPENSE
            .iter()
            .chain(Category::INCOME.iter())
            .map(|c| c.slug())
            .collect();
        LedgerError::Validation(format!(
            "Unknown category '{}'. Valid categories: {}",
            input,
            known.join(", ")
        ))
    })
}

fn parse_kind(input: &str) -> LedgerResult<TransactionKind> {
    TransactionKind::parse(input).ok_or_else(|| {
        LedgerError::Validation(format!(
            "Invalid transaction type '{}'. Use income or expense.",
            input
        ))
    })
}

fn find<'a>(session: &'a Session, id: &str) -> LedgerResult<&'a Transaction> {
    session
        .store
        .find_transaction(id)
        .ok_or_else(|| LedgerError::transaction_not_found(id))
}

pub fn handle_transaction_command(
    session: &mut Session,
    cmd: TransactionCommands,
    out: &mut dyn Write,
) -> LedgerResult<()> {
    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            description,
            kind,
            date,
            tags,
            account,
        } => {
            let amount = parse_amount(&amount)?;
            let category = parse_category(&category)?;
            let kind = match kind {
                Some(kind) => parse_kind(&kind)?,
                None => category.kind(),
            };

            let mut input = NewTransaction::new(kind, amount, category, description);
            if let Some(date) = date {
                let day = parse_date(&date)?;
                input = input.on(day.and_time(NaiveTime::MIN).and_utc());
            }
            for tag in tags {
                input = input.tagged(tag);
            }
            if let Some(account) = account {
                let found = session
                    .store
                    .find_account(&account)
                    .ok_or_else(|| LedgerError::account_not_found(&account))?;
                input = input.through(found.id);
            }
            input
                .validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;

            let budgets_before: Vec<_> = session.store.budgets().to_vec();
            let txn = session.store.add_transaction(input);

            writeln!(
                out,
                "Added {} {}: {} ({})",
                txn.kind.to_string().to_lowercase(),
                txn.id,
                session.store.format_money(txn.amount),
                txn.category
            )?;
            for budget in session.store.budgets() {
                let charged = budgets_before
                    .iter()
                    .any(|b| b.id == budget.id && b.spent != budget.spent);
                if charged && budget.is_over() {
                    writeln!(
                        out,
                        "  Warning: {} budget is over its limit ({} of {})",
                        budget.category,
                        session.store.format_money(budget.spent),
                        session.store.format_money(budget.amount)
                    )?;
                }
            }
        }

        TransactionCommands::List {
            kind,
            category,
            limit,
        } => {
            let kind = kind.as_deref().map(parse_kind).transpose()?;
            let category = category.as_deref().map(parse_category).transpose()?;

            let mut rows: Vec<&Transaction> = session
                .store
                .transactions()
                .iter()
                .filter(|t| kind.map_or(true, |k| t.kind == k))
                .filter(|t| category.map_or(true, |c| t.category == c))
                .collect();
            rows.sort_by(|a, b| b.date.cmp(&a.date));
            rows.truncate(limit);

            write!(
                out,
                "{}",
                format_transaction_list(&rows, session.symbol(), &session.settings.date_format)
            )?;
        }

        TransactionCommands::Show { id } => {
            let txn = find(session, &id)?;
            let account = txn.account_id.and_then(|id| session.store.account(id));
            write!(
                out,
                "{}",
                format_transaction_details(txn, account, session.symbol())
            )?;
        }

        TransactionCommands::Delete { id } => {
            let txn_id = find(session, &id)?.id;
            if let Some(txn) = session.store.delete_transaction(txn_id) {
                writeln!(
                    out,
                    "Deleted transaction {} ({})",
                    txn.id, txn.description
                )?;
            }
        }

        TransactionCommands::Categories => {
            for kind in [TransactionKind::Expense, TransactionKind::Income] {
                writeln!(out, "{}:", kind)?;
                for category in Category::for_kind(kind) {
                    writeln!(out, "  {:<15} {}", category.slug(), category.name())?;
                }
            }
        }
    }

    Ok(())
}
