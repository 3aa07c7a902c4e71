//! Currency reference data
//!
//! Currencies only affect how amounts are displayed; switching currency never
//! converts stored amounts.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    pub name: String,
}

impl Currency {
    pub fn new(code: impl Into<String>, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    pub fn usd() -> Self {
        Self::new("USD", "$", "US Dollar")
    }

    pub fn eur() -> Self {
        Self::new("EUR", "€", "Euro")
    }

    pub fn gbp() -> Self {
        Self::new("GBP", "£", "British Pound")
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::usd()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) {}", self.code, self.symbol, self.name)
    }
}

/// The list of currencies a user can pick from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyCatalog {
    currencies: Vec<Currency>,
}

impl CurrencyCatalog {
    pub fn new(currencies: Vec<Currency>) -> Self {
        Self { currencies }
    }

    pub fn all(&self) -> &[Currency] {
        &self.currencies
    }

    /// Look a currency up by its code, ignoring case
    pub fn find(&self, code: &str) -> Option<&Currency> {
        let code = code.trim();
        self.currencies
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    /// The first entry, used as the session default
    pub fn primary(&self) -> Currency {
        self.currencies.first().cloned().unwrap_or_default()
    }
}

impl Default for CurrencyCatalog {
    fn default() -> Self {
        Self::new(vec![Currency::usd(), Currency::eur(), Currency::gbp()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = CurrencyCatalog::default();
        let codes: Vec<_> = catalog.all().iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["USD", "EUR", "GBP"]);
        assert_eq!(catalog.primary(), Currency::usd());
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = CurrencyCatalog::default();
        assert_eq!(catalog.find("eur").map(|c| c.symbol.as_str()), Some("€"));
        assert!(catalog.find("JPY").is_none());
    }

    #[test]
    fn test_empty_catalog_primary_falls_back_to_usd() {
        assert_eq!(CurrencyCatalog::new(Vec::new()).primary(), Currency::usd());
    }
}
