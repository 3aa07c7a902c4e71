//! Budget model
//!
//! A spending cap for one category. `spent` is maintained by the store as
//! matching expenses arrive and cannot be written through a patch.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::BudgetId;
use super::money::Money;

/// Period a budget limit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Weekly,
}

impl BudgetPeriod {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "weekly" | "week" | "w" => Some(Self::Weekly),
            _ => None,
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => f.pad("Monthly"),
            Self::Weekly => f.pad("Weekly"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub category: Category,

    /// The limit
    pub amount: Money,

    pub period: BudgetPeriod,

    /// Accumulated matching expenses since the budget was created
    pub spent: Money,
}

impl Budget {
    /// Create a budget from caller input; `spent` starts at zero
    pub fn from_input(input: NewBudget) -> Self {
        Self {
            id: BudgetId::new(),
            category: input.category,
            amount: input.amount,
            period: input.period,
            spent: Money::zero(),
        }
    }

    /// Amount left before the limit is reached (negative when over)
    pub fn remaining(&self) -> Money {
        self.amount - self.spent
    }

    pub fn is_over(&self) -> bool {
        self.spent > self.amount
    }

    /// Percentage of the limit used; zero when the limit is not positive
    pub fn progress(&self) -> f64 {
        if !self.amount.is_positive() {
            return 0.0;
        }
        (self.spent.cents() as f64 * 100.0) / self.amount.cents() as f64
    }

    /// Merge a partial update into this budget
    pub fn apply(&mut self, patch: &BudgetPatch) {
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(period) = patch.period {
            self.period = period;
        }
    }
}

/// Caller input for `FinanceStore::add_budget`
#[derive(Debug, Clone)]
pub struct NewBudget {
    pub category: Category,
    pub amount: Money,
    pub period: BudgetPeriod,
}

impl NewBudget {
    pub fn new(category: Category, amount: Money, period: BudgetPeriod) -> Self {
        Self {
            category,
            amount,
            period,
        }
    }

    pub fn monthly(category: Category, amount: Money) -> Self {
        Self::new(category, amount, BudgetPeriod::Monthly)
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit(self.amount));
        }
        Ok(())
    }
}

/// Fields a budget update may change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPatch {
    pub category: Option<Category>,
    pub amount: Option<Money>,
    pub period: Option<BudgetPeriod>,
}

impl BudgetPatch {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.amount.is_none() && self.period.is_none()
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        match self.amount {
            Some(amount) if !amount.is_positive() => {
                Err(BudgetValidationError::NonPositiveLimit(amount))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BudgetValidationError {
    #[error("Budget limit must be greater than zero, got {0}")]
    NonPositiveLimit(Money),
}
