//! Row shapes of the remote backend
//!
//! The hosted backend stores accounts and transactions per user. The session
//! types are richer than these rows; conversions drop what the rows lack.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::{Account, AccountKind};
use super::ids::{AccountId, TransactionId, UserId};
use super::money::Money;
use super::transaction::{Transaction, TransactionKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: AccountId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    pub name: String,
    pub balance: Money,
    pub institution: String,
    pub last_four: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountRecord {
    pub fn from_account(account: &Account, user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: account.id,
            user_id,
            kind: account.kind,
            name: account.name.clone(),
            balance: account.balance,
            institution: account.institution.clone(),
            last_four: account.last_four.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub user_id: UserId,
    pub account_id: Option<AccountId>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Money,
    pub description: String,
    /// Category display label
    pub category: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransactionRecord {
    pub fn from_transaction(txn: &Transaction, user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: txn.id,
            user_id,
            account_id: txn.account_id,
            kind: txn.kind,
            amount: txn.amount,
            description: txn.description.clone(),
            category: txn.category.name().to_string(),
            date: txn.date,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NewAccount, NewTransaction};

    #[test]
    fn test_transaction_record_uses_category_label() {
        let txn = Transaction::from_input(NewTransaction::expense(
            Money::from_cents(4550),
            Category::FoodAndDrinks,
            "Lunch",
        ));
        let user = UserId::new();
        let record = TransactionRecord::from_transaction(&txn, user, Utc::now());
        assert_eq!(record.category, "Food & Drinks");
        assert_eq!(record.user_id, user);
        assert!(record.account_id.is_none());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "expense");
        assert!(json["account_id"].is_null());
    }

    #[test]
    fn test_account_record_drops_growth() {
        let account = Account::from_input(NewAccount::new(
            AccountKind::Crypto,
            "Wallet",
            Money::from_cents(100),
            "Kraken",
        ));
        let record = AccountRecord::from_account(&account, UserId::new(), Utc::now());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("growth").is_none());
        assert!(json["last_four"].is_null());
    }
}
