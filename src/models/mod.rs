//! Core data models for Ledgerly
//!
//! Transactions, budgets, accounts and currencies held by a session, plus the
//! profile and row shapes exchanged with the remote backend.

pub mod account;
pub mod budget;
pub mod category;
pub mod currency;
pub mod ids;
pub mod money;
pub mod profile;
pub mod records;
pub mod transaction;

pub use account::{Account, AccountKind, AccountPatch, AccountValidationError, NewAccount};
pub use budget::{Budget, BudgetPatch, BudgetPeriod, BudgetValidationError, NewBudget};
pub use category::Category;
pub use currency::{Currency, CurrencyCatalog};
pub use ids::{AccountId, BudgetId, TransactionId, UserId};
pub use money::{Money, MoneyParseError};
pub use profile::{Profile, ProfilePatch, DEFAULT_AVATAR_URL};
pub use records::{AccountRecord, TransactionRecord};
pub use transaction::{
    NewTransaction, Transaction, TransactionKind, TransactionValidationError, MAX_TRANSACTION_AMOUNT,
};
