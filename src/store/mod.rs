//! The session finance store
//!
//! `FinanceStore` is the single in-memory owner of a session's transactions,
//! budgets and accounts. It is an explicit value handed to whoever renders the
//! session, and tells subscribers about every effective mutation.

pub mod events;
pub mod finance;

pub use events::{Listener, StoreEvent, SubscriptionId};
pub use finance::{CategorySpending, FinanceStore};

use serde::{Deserialize, Serialize};
use std::fmt;

/// How budget `spent` reacts when an expense is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpentPolicy {
    /// Deleting an expense gives its amount back to the budgets it was charged to
    #[default]
    Reconcile,
    /// `spent` only ever grows; deletions leave it untouched
    Accumulate,
}

impl SpentPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "reconcile" => Some(Self::Reconcile),
            "accumulate" => Some(Self::Accumulate),
            _ => None,
        }
    }
}

impl fmt::Display for SpentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reconcile => f.pad("reconcile"),
            Self::Accumulate => f.pad("accumulate"),
        }
    }
}
