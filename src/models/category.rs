//! Transaction categories
//!
//! Categories form a closed set so that a budget and the expenses it tracks
//! always refer to the same value; a typo cannot silently break the link.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::transaction::TransactionKind;

/// A spending or income category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    // Expense categories
    FoodAndDrinks,
    Shopping,
    Bills,
    Transportation,
    Entertainment,
    Health,
    Education,
    Other,
    // Income categories
    Salary,
    Savings,
    Investments,
    Gifts,
    Rental,
    OtherIncome,
}

impl Category {
    /// Expense categories in picker order
    pub const EXPENSE: [Category; 8] = [
        Category::FoodAndDrinks,
        Category::Shopping,
        Category::Bills,
        Category::Transportation,
        Category::Entertainment,
        Category::Health,
        Category::Education,
        Category::Other,
    ];

    /// Income categories in picker order
    pub const INCOME: [Category; 6] = [
        Category::Salary,
        Category::Savings,
        Category::Investments,
        Category::Gifts,
        Category::Rental,
        Category::OtherIncome,
    ];

    /// Display label
    pub fn name(&self) -> &'static str {
        match self {
            Self::FoodAndDrinks => "Food & Drinks",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Other => "Other",
            Self::Salary => "Salary",
            Self::Savings => "Savings",
            Self::Investments => "Investments",
            Self::Gifts => "Gifts",
            Self::Rental => "Rental",
            Self::OtherIncome => "Other Income",
        }
    }

    /// Short identifier accepted on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Self::FoodAndDrinks => "food",
            Self::Shopping => "shopping",
            Self::Bills => "bills",
            Self::Transportation => "transport",
            Self::Entertainment => "entertainment",
            Self::Health => "health",
            Self::Education => "education",
            Self::Other => "other",
            Self::Salary => "salary",
            Self::Savings => "savings",
            Self::Investments => "investments",
            Self::Gifts => "gifts",
            Self::Rental => "rental",
            Self::OtherIncome => "other-income",
        }
    }

    /// Which kind of transaction this category belongs to
    pub fn kind(&self) -> TransactionKind {
        if Self::INCOME.contains(self) {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        }
    }

    /// Categories offered for a transaction kind
    pub fn for_kind(kind: TransactionKind) -> &'static [Category] {
        match kind {
            TransactionKind::Income => &Self::INCOME,
            TransactionKind::Expense => &Self::EXPENSE,
        }
    }

    /// Parse from the display label or slug, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim().to_lowercase();
        Self::EXPENSE
            .iter()
            .chain(Self::INCOME.iter())
            .copied()
            .find(|c| c.slug() == needle || c.name().to_lowercase() == needle)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
