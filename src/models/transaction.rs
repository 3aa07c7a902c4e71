//! Transaction model
//!
//! A single recorded money movement. Transactions are immutable once created;
//! the only lifecycle event after creation is deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::category::Category;
use super::ids::{AccountId, TransactionId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Signed contribution of `amount` to a running balance
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.pad("Income"),
            Self::Expense => f.pad("Expense"),
        }
    }
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Non-negative amount; direction comes from `kind`
    pub amount: Money,

    pub category: Category,

    #[serde(default)]
    pub description: String,

    pub date: DateTime<Utc>,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,

    /// Account the money moved through, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
}

impl Transaction {
    /// Build a transaction from caller input with a freshly generated id
    pub fn from_input(input: NewTransaction) -> Self {
        Self {
            id: TransactionId::new(),
            amount: input.amount,
            category: input.category,
            description: input.description,
            date: input.date,
            kind: input.kind,
            tags: input.tags,
            account_id: input.account_id,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Contribution of this transaction to the balance
    pub fn signed_amount(&self) -> Money {
        self.kind.signed(self.amount)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.signed_amount(),
            self.category
        )
    }
}

/// Largest amount a single transaction may carry (one trillion units)
pub const MAX_TRANSACTION_AMOUNT: Money = Money::from_cents(100_000_000_000_000);

/// Caller input for `FinanceStore::add_transaction`
///
/// The store accepts this as-is; `validate` is for the input boundary.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Money,
    pub category: Category,
    pub description: String,
    pub date: DateTime<Utc>,
    pub kind: TransactionKind,
    pub tags: BTreeSet<String>,
    pub account_id: Option<AccountId>,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionKind,
        amount: Money,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            category,
            description: description.into(),
            date: Utc::now(),
            kind,
            tags: BTreeSet::new(),
            account_id: None,
        }
    }

    pub fn expense(amount: Money, category: Category, description: impl Into<String>) -> Self {
        Self::new(TransactionKind::Expense, amount, category, description)
    }

    pub fn income(amount: Money, category: Category, description: impl Into<String>) -> Self {
        Self::new(TransactionKind::Income, amount, category, description)
    }

    pub fn on(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn through(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Form-level checks the UI performs before calling the store
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }
        if self.amount.is_zero() {
            return Err(TransactionValidationError::ZeroAmount);
        }
        if self.amount > MAX_TRANSACTION_AMOUNT {
            return Err(TransactionValidationError::AmountTooLarge(MAX_TRANSACTION_AMOUNT));
        }
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }
        if self.category.kind() != self.kind {
            return Err(TransactionValidationError::CategoryMismatch {
                category: self.category,
                kind: self.kind,
            });
        }
        Ok(())
    }
}

/// Validation errors for new transactions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionValidationError {
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Money),
    #[error("Please enter a valid amount")]
    ZeroAmount,
    #[error("Amount cannot exceed {0}")]
    AmountTooLarge(Money),
    #[error("Please enter a description")]
    EmptyDescription,
    #[error("Category '{category}' cannot be used for {kind}")]
    CategoryMismatch {
        category: Category,
        kind: TransactionKind,
    },
}
