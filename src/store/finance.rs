//! FinanceStore: session collections, mutations and derived queries
//!
//! Every operation runs to completion synchronously. Mutations never fail:
//! input validation belongs to the caller, and mutating or deleting an unknown
//! id is a silent no-op (the `Option` return lets callers notice).

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::events::{Listener, Listeners, StoreEvent, SubscriptionId};
use super::SpentPolicy;
use crate::models::{
    Account, AccountId, AccountKind, AccountPatch, Budget, BudgetId, BudgetPatch, Category,
    Currency, CurrencyCatalog, Money, NewAccount, NewBudget, NewTransaction, Transaction,
    TransactionId,
};

/// Total expense amount for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategorySpending {
    pub category: Category,
    pub amount: Money,
}

pub struct FinanceStore {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    accounts: Vec<Account>,
    selected_currency: Currency,
    catalog: CurrencyCatalog,
    policy: SpentPolicy,
    /// Budgets each live expense was charged to (Reconcile policy only)
    charges: HashMap<TransactionId, Vec<BudgetId>>,
    listeners: Listeners,
}

impl FinanceStore {
    /// Empty session using the catalog's first currency and the default policy
    pub fn new() -> Self {
        Self::with_catalog(CurrencyCatalog::default(), SpentPolicy::default())
    }

    pub fn with_policy(policy: SpentPolicy) -> Self {
        Self::with_catalog(CurrencyCatalog::default(), policy)
    }

    pub fn with_catalog(catalog: CurrencyCatalog, policy: SpentPolicy) -> Self {
        Self {
            transactions: Vec::new(),
            budgets: Vec::new(),
            accounts: Vec::new(),
            selected_currency: catalog.primary(),
            catalog,
            policy,
            charges: HashMap::new(),
            listeners: Listeners::default(),
        }
    }

    pub fn policy(&self) -> SpentPolicy {
        self.policy
    }

    // --- observers ---

    /// Register a callback run after every effective mutation
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    fn emit(&mut self, event: StoreEvent) {
        self.listeners.emit(&event);
    }

    // --- transactions ---

    /// Record a transaction and charge matching budgets if it is an expense
    pub fn add_transaction(&mut self, input: NewTransaction) -> Transaction {
        let transaction = Transaction::from_input(input);

        let mut charged = Vec::new();
        if transaction.is_expense() {
            for budget in self
                .budgets
                .iter_mut()
                .filter(|b| b.category == transaction.category)
            {
                budget.spent += transaction.amount;
                charged.push(budget.id);
            }
        }

        if self.policy == SpentPolicy::Reconcile && !charged.is_empty() {
            self.charges.insert(transaction.id, charged.clone());
        }

        self.transactions.push(transaction.clone());
        self.emit(StoreEvent::TransactionAdded {
            transaction: transaction.clone(),
            charged,
        });
        transaction
    }

    /// Remove a transaction; under `Reconcile` its charges are given back
    pub fn delete_transaction(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.transactions.iter().position(|t| t.id == id)?;
        let transaction = self.transactions.remove(index);

        let mut refunded = Vec::new();
        if let Some(budget_ids) = self.charges.remove(&id) {
            for budget in self
                .budgets
                .iter_mut()
                .filter(|b| budget_ids.contains(&b.id))
            {
                budget.spent -= transaction.amount;
                refunded.push(budget.id);
            }
        }

        self.emit(StoreEvent::TransactionDeleted {
            transaction: transaction.clone(),
            refunded,
        });
        Some(transaction)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Resolve user input (full id or display fragment) to a single transaction
    pub fn find_transaction(&self, input: &str) -> Option<&Transaction> {
        find_unique(&self.transactions, |t| t.id.matches(input))
    }

    // --- budgets ---

    /// Create a budget; it only sees expenses added from now on
    pub fn add_budget(&mut self, input: NewBudget) -> Budget {
        let budget = Budget::from_input(input);
        self.budgets.push(budget.clone());
        self.emit(StoreEvent::BudgetAdded(budget.clone()));
        budget
    }

    /// Merge `patch` into the budget; `spent` is never recomputed
    pub fn update_budget(&mut self, id: BudgetId, patch: &BudgetPatch) -> Option<Budget> {
        let budget = self.budgets.iter_mut().find(|b| b.id == id)?;
        let before = budget.clone();
        budget.apply(patch);
        let after = budget.clone();

        if before != after {
            self.emit(StoreEvent::BudgetUpdated {
                before,
                after: after.clone(),
            });
        }
        Some(after)
    }

    pub fn delete_budget(&mut self, id: BudgetId) -> Option<Budget> {
        let index = self.budgets.iter().position(|b| b.id == id)?;
        let budget = self.budgets.remove(index);
        self.emit(StoreEvent::BudgetDeleted(budget.clone()));
        Some(budget)
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn budget(&self, id: BudgetId) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    pub fn find_budget(&self, input: &str) -> Option<&Budget> {
        find_unique(&self.budgets, |b| b.id.matches(input))
    }

    // --- accounts ---

    /// Create an account; non-bank accounts start with zero growth
    pub fn add_account(&mut self, input: NewAccount) -> Account {
        let account = Account::from_input(input);
        self.accounts.push(account.clone());
        self.emit(StoreEvent::AccountAdded(account.clone()));
        account
    }

    pub fn update_account(&mut self, id: AccountId, patch: &AccountPatch) -> Option<Account> {
        let account = self.accounts.iter_mut().find(|a| a.id == id)?;
        let before = account.clone();
        account.apply(patch);
        let after = account.clone();

        if before != after {
            self.emit(StoreEvent::AccountUpdated {
                before,
                after: after.clone(),
            });
        }
        Some(after)
    }

    /// Remove an account. Transactions that referenced it keep the stale id.
    pub fn delete_account(&mut self, id: AccountId) -> Option<Account> {
        let index = self.accounts.iter().position(|a| a.id == id)?;
        let account = self.accounts.remove(index);
        self.emit(StoreEvent::AccountDeleted(account.clone()));
        Some(account)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn find_account(&self, input: &str) -> Option<&Account> {
        find_unique(&self.accounts, |a| a.id.matches(input)).or_else(|| {
            find_unique(&self.accounts, |a| a.name.eq_ignore_ascii_case(input.trim()))
        })
    }

    /// Accounts of one kind, in insertion order
    pub fn accounts_by_kind(&self, kind: AccountKind) -> Vec<&Account> {
        self.accounts.iter().filter(|a| a.kind == kind).collect()
    }

    /// Sum of account balance snapshots
    pub fn total_account_balance(&self) -> Money {
        self.accounts.iter().map(|a| a.balance).sum()
    }

    // --- currency ---

    /// Switch the display currency. Stored amounts are not converted.
    pub fn set_currency(&mut self, currency: Currency) {
        if currency == self.selected_currency {
            return;
        }
        let from = std::mem::replace(&mut self.selected_currency, currency.clone());
        self.emit(StoreEvent::CurrencyChanged { from, to: currency });
    }

    pub fn selected_currency(&self) -> &Currency {
        &self.selected_currency
    }

    pub fn currencies(&self) -> &CurrencyCatalog {
        &self.catalog
    }

    /// Format an amount with the selected currency's symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.selected_currency.symbol)
    }

    // --- derived queries ---

    /// Income minus expenses over all transactions
    pub fn balance(&self) -> Money {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    pub fn total_income(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum()
    }

    pub fn total_expenses(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum()
    }

    /// Expense totals per category, largest first.
    ///
    /// Ties keep the order in which each category was first seen.
    pub fn spending_by_category(&self) -> Vec<CategorySpending> {
        let mut totals: Vec<CategorySpending> = Vec::new();
        for txn in self.transactions.iter().filter(|t| t.is_expense()) {
            match totals.iter_mut().find(|s| s.category == txn.category) {
                Some(existing) => existing.amount += txn.amount,
                None => totals.push(CategorySpending {
                    category: txn.category,
                    amount: txn.amount,
                }),
            }
        }
        totals.sort_by(|a, b| b.amount.cmp(&a.amount));
        totals
    }

    /// `spent * 100 / amount` for the budget, or 0 for an unknown id or a
    /// budget without a positive limit
    pub fn budget_progress(&self, id: BudgetId) -> f64 {
        self.budget(id).map(Budget::progress).unwrap_or(0.0)
    }
}

impl Default for FinanceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FinanceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinanceStore")
            .field("transactions", &self.transactions.len())
            .field("budgets", &self.budgets.len())
            .field("accounts", &self.accounts.len())
            .field("selected_currency", &self.selected_currency.code)
            .field("policy", &self.policy)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// The only item matching `pred`, or None when zero or several match
fn find_unique<T>(items: &[T], pred: impl Fn(&T) -> bool) -> Option<&T> {
    let mut matches = items.iter().filter(|item| pred(item));
    let first = matches.next()?;
    match matches.next() {
        Some(_) => None,
        None => Some(first),
    }
}
