//! Session snapshots for backup and hand-off
//!
//! - CSV: transactions, budgets and accounts as spreadsheet rows
//! - JSON: versioned full snapshot, or the remote backend's row shapes
//! - YAML: the full snapshot in human-readable form

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_accounts_csv, export_budgets_csv, export_transactions_csv};
pub use json::{
    export_full_json, export_remote_json, import_from_json, FullExport, RemoteSnapshot,
    EXPORT_SCHEMA_VERSION,
};
pub use yaml::{export_full_yaml, import_from_yaml};

/// Output formats accepted by `ledgerly export`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    Csv,
    /// JSON rows as the remote backend stores them
    Remote,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "csv" => Some(Self::Csv),
            "remote" => Some(Self::Remote),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json | Self::Remote => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(ExportFormat::parse("YML"), Some(ExportFormat::Yaml));
        assert_eq!(ExportFormat::parse("remote"), Some(ExportFormat::Remote));
        assert_eq!(ExportFormat::parse("xml"), None);
        assert_eq!(ExportFormat::Remote.extension(), "json");
    }
}
