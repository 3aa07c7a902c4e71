//! Change notifications emitted by the store

use crate::models::{Account, Budget, BudgetId, Currency, Transaction};

/// One effective mutation of the store
///
/// Calls that change nothing (unknown id, same currency) emit no event.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    TransactionAdded {
        transaction: Transaction,
        /// Budgets whose `spent` grew by the transaction amount
        charged: Vec<BudgetId>,
    },
    TransactionDeleted {
        transaction: Transaction,
        /// Budgets whose `spent` shrank by the transaction amount
        refunded: Vec<BudgetId>,
    },
    BudgetAdded(Budget),
    BudgetUpdated {
        before: Budget,
        after: Budget,
    },
    BudgetDeleted(Budget),
    AccountAdded(Account),
    AccountUpdated {
        before: Account,
        after: Account,
    },
    AccountDeleted(Account),
    CurrencyChanged {
        from: Currency,
        to: Currency,
    },
}

impl StoreEvent {
    /// Short label for status lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::TransactionAdded { .. } => "transaction added",
            Self::TransactionDeleted { .. } => "transaction deleted",
            Self::BudgetAdded(_) => "budget added",
            Self::BudgetUpdated { .. } => "budget updated",
            Self::BudgetDeleted(_) => "budget deleted",
            Self::AccountAdded(_) => "account added",
            Self::AccountUpdated { .. } => "account updated",
            Self::AccountDeleted(_) => "account deleted",
            Self::CurrencyChanged { .. } => "currency changed",
        }
    }
}

/// Handle returned by `FinanceStore::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked after each effective mutation
pub type Listener = Box<dyn FnMut(&StoreEvent)>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Deliver in subscription order
    pub(crate) fn emit(&mut self, event: &StoreEvent) {
        for (_, listener) in self.entries.iter_mut() {
            listener(event);
        }
    }
}
