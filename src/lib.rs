//! Ledgerly - session-based personal finance tracker
//!
//! Records income and expenses, keeps category budgets in step with the
//! expenses recorded against them, tracks bank, investment and crypto account
//! balances, and reports balance, spending and trends. All state lives in one
//! in-memory session owned by the caller.
//!
//! # Architecture
//!
//! - `config`: paths and user settings
//! - `error`: error types
//! - `models`: transactions, budgets, accounts, currencies, profiles
//! - `store`: the `FinanceStore` session context and its change events
//! - `reports`: cash-flow summary and spending trends
//! - `auth`: sign-in/sign-up session against identity and profile backends
//! - `audit`: JSON-lines log of store mutations
//! - `display`: terminal tables
//! - `export`: JSON, YAML and CSV snapshots
//! - `cli`: command parsing, shell and script runner
//!
//! # Example
//!
//! ```rust,ignore
//! use ledgerly::models::{Category, Money, NewBudget, NewTransaction};
//! use ledgerly::store::FinanceStore;
//!
//! let mut store = FinanceStore::new();
//! let budget = store.add_budget(NewBudget::monthly(Category::FoodAndDrinks, Money::from_cents(20000)));
//! store.add_transaction(NewTransaction::expense(Money::from_cents(4550), Category::FoodAndDrinks, "Lunch"));
//! assert_eq!(store.budget_progress(budget.id), 22.75);
//! ```

pub mod audit;
pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod store;

pub use error::{LedgerError, LedgerResult};
