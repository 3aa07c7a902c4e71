//! JSON snapshot of a session with schema versioning

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Account, AccountPatch, AccountRecord, Budget, Currency, Money, NewAccount, NewBudget,
    NewTransaction, Profile, Transaction, TransactionRecord, UserId, MAX_TRANSACTION_AMOUNT,
};
use crate::store::FinanceStore;

pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Version of the program that wrote the snapshot
    pub app_version: String,
    pub currency: Currency,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub accounts: Vec<Account>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub budget_count: usize,
    pub account_count: usize,
    pub total_income: Money,
    pub total_expenses: Money,
    pub balance: Money,
    pub earliest_transaction: Option<DateTime<Utc>>,
    pub latest_transaction: Option<DateTime<Utc>>,
}

impl FullExport {
    pub fn from_store(store: &FinanceStore) -> Self {
        let transactions = store.transactions().to_vec();
        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            budget_count: store.budgets().len(),
            account_count: store.accounts().len(),
            total_income: store.total_income(),
            total_expenses: store.total_expenses(),
            balance: store.balance(),
            earliest_transaction: transactions.iter().map(|t| t.date).min(),
            latest_transaction: transactions.iter().map(|t| t.date).max(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            currency: store.selected_currency().clone(),
            transactions,
            budgets: store.budgets().to_vec(),
            accounts: store.accounts().to_vec(),
            metadata,
        }
    }

    /// Check the schema version and that no id appears twice.
    ///
    /// Transactions may name accounts that no longer exist.
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut seen = HashSet::new();
        if let Some(txn) = self.transactions.iter().find(|t| !seen.insert(t.id)) {
            return Err(format!("Duplicate transaction id {}", txn.id));
        }
        let mut seen = HashSet::new();
        if let Some(budget) = self.budgets.iter().find(|b| !seen.insert(b.id)) {
            return Err(format!("Duplicate budget id {}", budget.id));
        }
        let mut seen = HashSet::new();
        if let Some(account) = self.accounts.iter().find(|a| !seen.insert(a.id)) {
            return Err(format!("Duplicate account id {}", account.id));
        }

        if let Some(txn) = self.transactions.iter().find(|t| t.amount.is_negative()) {
            return Err(format!("Transaction {} has a negative amount", txn.id));
        }
        if let Some(txn) = self
            .transactions
            .iter()
            .find(|t| t.amount > MAX_TRANSACTION_AMOUNT)
        {
            return Err(format!(
                "Transaction {} exceeds {}",
                txn.id, MAX_TRANSACTION_AMOUNT
            ));
        }

        Ok(())
    }

    /// Replay the snapshot into `store` through its normal add operations.
    ///
    /// Records get fresh ids. Budgets go in before transactions, so their
    /// `spent` is rebuilt from the imported expenses. Links to imported
    /// accounts follow the new ids; links to accounts absent from the
    /// snapshot stay stale. A currency the catalog lacks is ignored.
    pub fn restore_into(&self, store: &mut FinanceStore) {
        if let Some(currency) = store.currencies().find(&self.currency.code).cloned() {
            store.set_currency(currency);
        }

        for budget in &self.budgets {
            store.add_budget(NewBudget::new(budget.category, budget.amount, budget.period));
        }

        let mut account_ids = HashMap::new();
        for account in &self.accounts {
            let mut input = NewAccount::new(
                account.kind,
                account.name.clone(),
                account.balance,
                account.institution.clone(),
            );
            input.last_four = account.last_four.clone();
            let added = store.add_account(input);
            if let Some(growth) = account.growth.filter(|g| *g != 0.0) {
                let patch = AccountPatch {
                    growth: Some(growth),
                    ..Default::default()
                };
                store.update_account(added.id, &patch);
            }
            account_ids.insert(account.id, added.id);
        }

        for txn in &self.transactions {
            let mut input =
                NewTransaction::new(txn.kind, txn.amount, txn.category, txn.description.clone())
                    .on(txn.date);
            input.tags = txn.tags.clone();
            input.account_id = txn
                .account_id
                .map(|id| account_ids.get(&id).copied().unwrap_or(id));
            store.add_transaction(input);
        }
    }
}

pub fn export_full_json<W: Write>(
    store: &FinanceStore,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    let export = FullExport::from_store(store);
    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))
}

/// Parse and validate a snapshot written by `export_full_json`
pub fn import_from_json(json: &str) -> LedgerResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json).map_err(|e| LedgerError::Export(e.to_string()))?;
    export.validate().map_err(LedgerError::Export)?;
    Ok(export)
}

/// The session as rows of the remote `accounts` and `transactions` tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSnapshot {
    pub profile: Option<Profile>,
    pub accounts: Vec<AccountRecord>,
    pub transactions: Vec<TransactionRecord>,
}

impl RemoteSnapshot {
    pub fn from_store(store: &FinanceStore, user_id: UserId, profile: Option<Profile>) -> Self {
        let now = Utc::now();
        Self {
            profile,
            accounts: store
                .accounts()
                .iter()
                .map(|a| AccountRecord::from_account(a, user_id, now))
                .collect(),
            transactions: store
                .transactions()
                .iter()
                .map(|t| TransactionRecord::from_transaction(t, user_id, now))
                .collect(),
        }
    }
}

pub fn export_remote_json<W: Write>(
    store: &FinanceStore,
    user_id: UserId,
    profile: Option<Profile>,
    writer: &mut W,
) -> LedgerResult<()> {
    let snapshot = RemoteSnapshot::from_store(store, user_id, profile);
    serde_json::to_writer_pretty(writer, &snapshot).map_err(|e| LedgerError::Export(e.to_string()))
}
