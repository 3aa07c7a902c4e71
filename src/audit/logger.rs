//! Append-only JSON-lines audit log

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{LedgerError, LedgerResult};
use crate::store::Listener;

use super::entry::AuditEntry;

/// Writes one JSON object per line and flushes after every write
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn log(&self, entry: &AuditEntry) -> LedgerResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries with a single flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> LedgerResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| LedgerError::Audit(format!("Failed to open audit log: {}", e)))?;

        for entry in entries {
            let line = serde_json::to_string(entry)?;
            writeln!(file, "{}", line)
                .map_err(|e| LedgerError::Audit(format!("Failed to write audit entry: {}", e)))?;
        }

        file.flush()
            .map_err(|e| LedgerError::Audit(format!("Failed to flush audit log: {}", e)))
    }

    /// All entries, oldest first. Blank lines are skipped.
    pub fn read_all(&self) -> LedgerResult<Vec<AuditEntry>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.log_path)?);
        let mut entries = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|e| {
                LedgerError::Audit(format!("Malformed audit entry on line {}: {}", index + 1, e))
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> LedgerResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let skip = entries.len().saturating_sub(count);
        Ok(entries.split_off(skip))
    }

    pub fn entry_count(&self) -> LedgerResult<usize> {
        if !self.exists() {
            return Ok(0);
        }
        let reader = BufReader::new(File::open(&self.log_path)?);
        let mut count = 0;
        for line in reader.lines() {
            if !line?.trim().is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Store listener that appends an entry for every event.
    ///
    /// Listeners cannot fail, so write errors are reported on stderr and the
    /// mutation still stands.
    pub fn listener(self) -> Listener {
        Box::new(move |event| {
            if let Err(e) = self.log(&AuditEntry::from_event(event)) {
                eprintln!("Warning: {}", e);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{EntityType, Operation};
    use crate::models::{AccountPatch, Category, Money, NewAccount, NewBudget, NewTransaction};
    use crate::models::AccountKind;
    use crate::store::FinanceStore;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn entry(id: &str) -> AuditEntry {
        AuditEntry::create(EntityType::Account, id, None, &json!({"id": id}))
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = test_logger();
        assert!(!logger.exists());
        assert_eq!(logger.entry_count().unwrap(), 0);
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_log_and_read_recent() {
        let (logger, _temp) = test_logger();
        for i in 0..5 {
            logger.log(&entry(&format!("acc-{}", i))).unwrap();
        }
        assert_eq!(logger.entry_count().unwrap(), 5);

        let recent = logger.read_recent(2).unwrap();
        let ids: Vec<_> = recent.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["acc-3", "acc-4"]);

        assert_eq!(logger.read_recent(50).unwrap().len(), 5);
    }

    #[test]
    fn test_batch_and_reopen() {
        let (logger, temp) = test_logger();
        logger.log_batch(&[entry("a"), entry("b")]).unwrap();
        logger.log_batch(&[]).unwrap();

        let reopened = AuditLogger::new(temp.path().join("audit.log"));
        assert_eq!(reopened.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_line_is_reported() {
        let (logger, _temp) = test_logger();
        logger.log(&entry("a")).unwrap();
        std::fs::write(logger.path(), "{not json}\n").unwrap();
        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_listener_records_store_mutations() {
        let (logger, _temp) = test_logger();
        let mut store = FinanceStore::new();
        store.subscribe(logger.clone().listener());

        store.add_budget(NewBudget::monthly(
            Category::FoodAndDrinks,
            Money::from_cents(20000),
        ));
        let txn = store.add_transaction(NewTransaction::expense(
            Money::from_cents(4550),
            Category::FoodAndDrinks,
            "Lunch",
        ));
        let account = store.add_account(NewAccount::new(
            AccountKind::Investment,
            "Index Fund",
            Money::from_cents(100000),
            "Vanguard",
        ));
        store.update_account(
            account.id,
            &AccountPatch {
                growth: Some(3.5),
                ..Default::default()
            },
        );
        store.delete_transaction(txn.id);
        // No-op mutations are not logged
        store.delete_transaction(txn.id);

        let entries = logger.read_all().unwrap();
        let ops: Vec<_> = entries
            .iter()
            .map(|e| (e.operation, e.entity_type))
            .collect();
        assert_eq!(
            ops,
            vec![
                (Operation::Create, EntityType::Budget),
                (Operation::Create, EntityType::Transaction),
                (Operation::Create, EntityType::Account),
                (Operation::Update, EntityType::Account),
                (Operation::Delete, EntityType::Transaction),
            ]
        );
        assert_eq!(
            entries[3].diff_summary.as_deref(),
            Some("growth: 0.0 -> 3.5")
        );
    }
}
