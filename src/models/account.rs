//! Account model
//!
//! Named stores of money with a balance snapshot. Bank accounts carry the last
//! four digits of their number; investment and crypto accounts carry a growth
//! figure instead.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// Type of account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Bank,
    Investment,
    Crypto,
}

impl AccountKind {
    pub const ALL: [AccountKind; 3] = [Self::Bank, Self::Investment, Self::Crypto];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bank" => Some(Self::Bank),
            "investment" | "investments" => Some(Self::Investment),
            "crypto" => Some(Self::Crypto),
            _ => None,
        }
    }

    /// Whether accounts of this kind track growth
    pub fn tracks_growth(&self) -> bool {
        !matches!(self, Self::Bank)
    }

    /// Section heading used when listing accounts by kind
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Bank => "Bank Accounts",
            Self::Investment => "Investments",
            Self::Crypto => "Crypto",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bank => f.pad("Bank"),
            Self::Investment => f.pad("Investment"),
            Self::Crypto => f.pad("Crypto"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,

    #[serde(rename = "type")]
    pub kind: AccountKind,

    pub name: String,
    pub balance: Money,
    pub institution: String,

    /// Present only for bank accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_four: Option<String>,

    /// Growth percentage; present only for non-bank accounts.
    /// Starts at 0 and is never derived from transactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth: Option<f64>,
}

impl Account {
    /// Create an account from caller input with a fresh id
    pub fn from_input(input: NewAccount) -> Self {
        let mut account = Self {
            id: AccountId::new(),
            kind: input.kind,
            name: input.name,
            balance: input.balance,
            institution: input.institution,
            last_four: input.last_four,
            growth: None,
        };
        account.normalize();
        account
    }

    /// Merge a partial update, then restore the per-kind field invariant
    pub fn apply(&mut self, patch: &AccountPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(balance) = patch.balance {
            self.balance = balance;
        }
        if let Some(institution) = &patch.institution {
            self.institution = institution.clone();
        }
        if let Some(last_four) = &patch.last_four {
            self.last_four = Some(last_four.clone());
        }
        if let Some(growth) = patch.growth {
            self.growth = Some(growth);
        }
        self.normalize();
    }

    fn normalize(&mut self) {
        if self.kind.tracks_growth() {
            self.last_four = None;
            self.growth = Some(self.growth.unwrap_or(0.0));
        } else {
            self.growth = None;
        }
    }

    /// Masked account number, e.g. `•••• 4242`
    pub fn masked_number(&self) -> Option<String> {
        self.last_four.as_ref().map(|digits| format!("•••• {}", digits))
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.kind, self.institution)
    }
}

/// Caller input for `FinanceStore::add_account`
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub kind: AccountKind,
    pub name: String,
    pub balance: Money,
    pub institution: String,
    pub last_four: Option<String>,
}

impl NewAccount {
    pub fn new(
        kind: AccountKind,
        name: impl Into<String>,
        balance: Money,
        institution: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            balance,
            institution: institution.into(),
            last_four: None,
        }
    }

    pub fn with_last_four(mut self, digits: impl Into<String>) -> Self {
        self.last_four = Some(digits.into());
        self
    }

    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }
        if self.institution.trim().is_empty() {
            return Err(AccountValidationError::EmptyInstitution);
        }
        if self.kind == AccountKind::Bank {
            validate_last_four(self.last_four.as_deref().unwrap_or(""))?;
        }
        Ok(())
    }
}

/// Fields an account update may change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountPatch {
    pub kind: Option<AccountKind>,
    pub name: Option<String>,
    pub balance: Option<Money>,
    pub institution: Option<String>,
    pub last_four: Option<String>,
    pub growth: Option<f64>,
}

impl AccountPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(AccountValidationError::EmptyName);
        }
        if matches!(&self.institution, Some(i) if i.trim().is_empty()) {
            return Err(AccountValidationError::EmptyInstitution);
        }
        if let Some(digits) = &self.last_four {
            validate_last_four(digits)?;
        }
        Ok(())
    }
}

fn validate_last_four(digits: &str) -> Result<(), AccountValidationError> {
    let digits = digits.trim();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AccountValidationError::InvalidLastFour);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    #[error("Please enter an account name")]
    EmptyName,
    #[error("Please enter an institution name")]
    EmptyInstitution,
    #[error("Please enter the last 4 digits of the account")]
    InvalidLastFour,
}
