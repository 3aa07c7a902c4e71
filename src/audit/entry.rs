//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::diff::generate_diff;
use crate::store::StoreEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => f.pad("CREATE"),
            Operation::Update => f.pad("UPDATE"),
            Operation::Delete => f.pad("DELETE"),
        }
    }
}

/// Kinds of state the store holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Transaction,
    Budget,
    Account,
    Currency,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::Transaction => f.pad("Transaction"),
            EntityType::Budget => f.pad("Budget"),
            EntityType::Account => f.pad("Account"),
            EntityType::Currency => f.pad("Currency"),
        }
    }
}

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,

    /// Short human label, e.g. the account name or budget category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn build(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: Option<serde_json::Value>,
        after: Option<serde_json::Value>,
    ) -> Self {
        let diff_summary = match (&before, &after) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self::build(
            Operation::Create,
            entity_type,
            entity_id.into(),
            entity_name,
            None,
            serde_json::to_value(entity).ok(),
        )
    }

    /// Update entry; the diff summary is computed from the two snapshots
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Self {
        Self::build(
            Operation::Update,
            entity_type,
            entity_id.into(),
            entity_name,
            serde_json::to_value(before).ok(),
            serde_json::to_value(after).ok(),
        )
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self::build(
            Operation::Delete,
            entity_type,
            entity_id.into(),
            entity_name,
            serde_json::to_value(entity).ok(),
            None,
        )
    }

    /// Translate a store notification into the entry that records it
    pub fn from_event(event: &StoreEvent) -> Self {
        match event {
            StoreEvent::TransactionAdded {
                transaction,
                charged,
            } => {
                let mut entry = Self::create(
                    EntityType::Transaction,
                    transaction.id.to_string(),
                    Some(transaction.description.clone()),
                    transaction,
                );
                if !charged.is_empty() {
                    entry.diff_summary = Some(format!("charged {} budget(s)", charged.len()));
                }
                entry
            }
            StoreEvent::TransactionDeleted {
                transaction,
                refunded,
            } => {
                let mut entry = Self::delete(
                    EntityType::Transaction,
                    transaction.id.to_string(),
                    Some(transaction.description.clone()),
                    transaction,
                );
                if !refunded.is_empty() {
                    entry.diff_summary = Some(format!("refunded {} budget(s)", refunded.len()));
                }
                entry
            }
            StoreEvent::BudgetAdded(budget) => Self::create(
                EntityType::Budget,
                budget.id.to_string(),
                Some(budget.category.name().to_string()),
                budget,
            ),
            StoreEvent::BudgetUpdated { before, after } => Self::update(
                EntityType::Budget,
                after.id.to_string(),
                Some(after.category.name().to_string()),
                before,
                after,
            ),
            StoreEvent::BudgetDeleted(budget) => Self::delete(
                EntityType::Budget,
                budget.id.to_string(),
                Some(budget.category.name().to_string()),
                budget,
            ),
            StoreEvent::AccountAdded(account) => Self::create(
                EntityType::Account,
                account.id.to_string(),
                Some(account.name.clone()),
                account,
            ),
            StoreEvent::AccountUpdated { before, after } => Self::update(
                EntityType::Account,
                after.id.to_string(),
                Some(after.name.clone()),
                before,
                after,
            ),
            StoreEvent::AccountDeleted(account) => Self::delete(
                EntityType::Account,
                account.id.to_string(),
                Some(account.name.clone()),
                account,
            ),
            StoreEvent::CurrencyChanged { from, to } => Self::update(
                EntityType::Currency,
                "selected",
                Some(to.code.clone()),
                from,
                to,
            ),
        }
    }

    pub fn format_human_readable(&self) -> String {
        let mut line = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );
        if let Some(name) = &self.entity_name {
            line.push_str(&format!(" ({})", name));
        }
        if let Some(diff) = &self.diff_summary {
            line.push_str(&format!("\n  Changes: {}", diff));
        }
        line
    }
}
