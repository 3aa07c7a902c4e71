//! Budget CLI commands

use std::io::Write;

use clap::Subcommand;

use super::transaction::parse_category;
use super::{parse_amount, Session};
use crate::display::budget::{format_budget_details, format_budget_list};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, BudgetId, BudgetPatch, BudgetPeriod, Category, NewBudget};

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget for an expense category
    Add {
        /// Category name or short id
        category: String,
        /// Spending limit
        amount: String,
        /// monthly or weekly (defaults to the configured period)
        #[arg(short, long)]
        period: Option<String>,
    },
    /// List budgets with their progress
    List,
    /// Show a budget
    Show {
        /// Budget ID or category
        budget: String,
    },
    /// Change a budget's category, limit or period
    Edit {
        /// Budget ID or category
        budget: String,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long, allow_negative_numbers = true)]
        amount: Option<String>,
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Delete a budget
    Delete {
        /// Budget ID or category
        budget: String,
    },
}

fn parse_period(input: &str) -> LedgerResult<BudgetPeriod> {
    BudgetPeriod::parse(input).ok_or_else(|| {
        LedgerError::Validation(format!(
            "Invalid period '{}'. Use monthly or weekly.",
            input
        ))
    })
}

/// Resolve by id first, then by category when exactly one budget has it
fn resolve(session: &Session, input: &str) -> LedgerResult<BudgetId> {
    if let Some(budget) = session.store.find_budget(input) {
        return Ok(budget.id);
    }
    if let Some(category) = Category::parse(input) {
        let matching: Vec<&Budget> = session
            .store
            .budgets()
            .iter()
            .filter(|b| b.category == category)
            .collect();
        match matching.as_slice() {
            [only] => return Ok(only.id),
            [] => {}
            _ => {
                return Err(LedgerError::Validation(format!(
                    "Several budgets track {}. Use the budget ID instead.",
                    category
                )))
            }
        }
    }
    Err(LedgerError::budget_not_found(input))
}

pub fn handle_budget_command(
    session: &mut Session,
    cmd: BudgetCommands,
    out: &mut dyn Write,
) -> LedgerResult<()> {
    match cmd {
        BudgetCommands::Add {
            category,
            amount,
            period,
        } => {
            let category = parse_category(&category)?;
            let period = match period {
                Some(p) => parse_period(&p)?,
                None => session.settings.default_budget_period,
            };
            let input = NewBudget::new(category, parse_amount(&amount)?, period);
            input
                .validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;

            let budget = session.store.add_budget(input);
            writeln!(
                out,
                "Created {} budget {} for {}: {}",
                budget.period.to_string().to_lowercase(),
                budget.id,
                budget.category,
                session.store.format_money(budget.amount)
            )?;
        }

        BudgetCommands::List => {
            write!(
                out,
                "{}",
                format_budget_list(session.store.budgets(), session.symbol())
            )?;
        }

        BudgetCommands::Show { budget } => {
            let id = resolve(session, &budget)?;
            if let Some(found) = session.store.budget(id) {
                write!(out, "{}", format_budget_details(found, session.symbol()))?;
            }
        }

        BudgetCommands::Edit {
            budget,
            category,
            amount,
            period,
        } => {
            let id = resolve(session, &budget)?;
            let patch = BudgetPatch {
                category: category.as_deref().map(parse_category).transpose()?,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                period: period.as_deref().map(parse_period).transpose()?,
            };
            if patch.is_empty() {
                writeln!(
                    out,
                    "No changes specified. Use --category, --amount or --period."
                )?;
                return Ok(());
            }
            patch
                .validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;

            if let Some(updated) = session.store.update_budget(id, &patch) {
                writeln!(
                    out,
                    "Updated budget {}: {} {} ({})",
                    updated.id,
                    updated.category,
                    session.store.format_money(updated.amount),
                    updated.period
                )?;
            }
        }

        BudgetCommands::Delete { budget } => {
            let id = resolve(session, &budget)?;
            if let Some(removed) = session.store.delete_budget(id) {
                writeln!(out, "Deleted budget {} ({})", removed.id, removed.category)?;
            }
        }
    }

    Ok(())
}
