//! Audit trail for store mutations
//!
//! Every effective change to the finance store is appended to a JSON-lines
//! file with before/after snapshots. The CLI wires this in by subscribing
//! [`AuditLogger::listener`] to the store.

mod diff;
mod entry;
mod logger;

pub use diff::{field_changes, generate_diff};
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
