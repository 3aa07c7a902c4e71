//! Configuration module for Ledgerly
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Session defaults (currency, budget accounting policy)

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
