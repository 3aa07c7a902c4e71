//! YAML snapshot, the same shape as the JSON one

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::FullExport;
use crate::store::FinanceStore;

fn export_error(e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Export(e.to_string())
}

pub fn export_full_yaml<W: Write>(store: &FinanceStore, writer: &mut W) -> LedgerResult<()> {
    let export = FullExport::from_store(store);

    let header = format!(
        "# Ledgerly export\n# Generated: {}\n# App Version: {}\n# Currency: {}\n\n",
        export.exported_at, export.app_version, export.currency.code
    );
    writer.write_all(header.as_bytes()).map_err(export_error)?;

    serde_yaml::to_writer(writer, &export).map_err(export_error)
}

pub fn import_from_yaml(yaml: &str) -> LedgerResult<FullExport> {
    let export: FullExport = serde_yaml::from_str(yaml).map_err(export_error)?;
    export.validate().map_err(LedgerError::Export)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Currency, Money, NewBudget, NewTransaction};

    #[test]
    fn test_yaml_export_and_import() {
        let mut store = FinanceStore::new();
        store.set_currency(Currency::eur());
        store.add_budget(NewBudget::monthly(Category::Shopping, Money::from_cents(5000)));
        store.add_transaction(
            NewTransaction::expense(Money::from_cents(1999), Category::Shopping, "Shoes")
                .tagged("sale"),
        );

        let mut buffer = Vec::new();
        export_full_yaml(&store, &mut buffer).unwrap();
        let yaml = String::from_utf8(buffer).unwrap();

        assert!(yaml.starts_with("# Ledgerly export"));
        assert!(yaml.contains("# Currency: EUR"));
        assert!(yaml.contains("schema_version"));

        let imported = import_from_yaml(&yaml).unwrap();
        assert_eq!(imported.currency.code, "EUR");
        assert_eq!(imported.budgets[0].spent, Money::from_cents(1999));
        assert_eq!(imported.transactions, store.transactions());
    }

    #[test]
    fn test_invalid_yaml_is_an_export_error() {
        let err = import_from_yaml("not: [valid").unwrap_err();
        assert!(matches!(err, LedgerError::Export(_)));
    }
}
