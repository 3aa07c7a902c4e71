//! Export and import CLI commands

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::Session;
use crate::auth::AuthProvider;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{
    export_full_json, export_full_yaml, export_remote_json, export_transactions_csv,
    import_from_json, import_from_yaml, ExportFormat,
};

fn default_path(session: &Session, format: ExportFormat) -> LedgerResult<PathBuf> {
    session.paths.ensure_directories()?;
    let stem = match format {
        ExportFormat::Remote => "ledgerly-remote",
        _ => "ledgerly",
    };
    Ok(session.paths.export_dir().join(format!(
        "{}-{}.{}",
        stem,
        Utc::now().format("%Y%m%d-%H%M%S"),
        format.extension()
    )))
}

pub fn handle_export_command(
    session: &mut Session,
    format: &str,
    output: Option<&str>,
    out: &mut dyn Write,
) -> LedgerResult<()> {
    let format = ExportFormat::parse(format).ok_or_else(|| {
        LedgerError::Validation(format!(
            "Unknown export format '{}'. Use json, yaml, csv or remote.",
            format
        ))
    })?;

    // Remote rows are owned by a user, so a session must be signed in
    let remote_user = match format {
        ExportFormat::Remote => Some(
            session
                .auth
                .auth()
                .current_user()?
                .ok_or_else(|| {
                    LedgerError::Validation(
                        "Sign in first: remote rows belong to a user".to_string(),
                    )
                })?,
        ),
        _ => None,
    };

    let path = match output {
        Some(path) => PathBuf::from(path),
        None => default_path(session, format)?,
    };
    let file = File::create(&path).map_err(|e| {
        LedgerError::Export(format!("Cannot create {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    match (format, remote_user) {
        (ExportFormat::Json, _) => export_full_json(&session.store, &mut writer, true)?,
        (ExportFormat::Yaml, _) => export_full_yaml(&session.store, &mut writer)?,
        (ExportFormat::Csv, _) => export_transactions_csv(&session.store, &mut writer)?,
        (ExportFormat::Remote, Some(user)) => export_remote_json(
            &session.store,
            user.id,
            session.auth.profile().cloned(),
            &mut writer,
        )?,
        (ExportFormat::Remote, None) => {}
    }
    writer.flush()?;

    writeln!(out, "Exported to {}", path.display())?;
    Ok(())
}

/// Validate a snapshot file and add its records to the session
pub fn handle_import_command(
    session: &mut Session,
    path: &str,
    format: Option<&str>,
    out: &mut dyn Write,
) -> LedgerResult<()> {
    let path = Path::new(path);
    let format_name = format
        .map(str::to_string)
        .or_else(|| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_string)
        })
        .unwrap_or_default();
    let format = match ExportFormat::parse(&format_name) {
        Some(format @ (ExportFormat::Json | ExportFormat::Yaml)) => format,
        _ => {
            return Err(LedgerError::Validation(format!(
                "Cannot import '{}'. Use a json or yaml snapshot.",
                path.display()
            )))
        }
    };

    let contents = std::fs::read_to_string(path).map_err(|e| {
        LedgerError::Export(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let snapshot = match format {
        ExportFormat::Yaml => import_from_yaml(&contents)?,
        _ => import_from_json(&contents)?,
    };
    snapshot.restore_into(&mut session.store);

    writeln!(
        out,
        "Imported {} transactions, {} budgets and {} accounts from {}",
        snapshot.transactions.len(),
        snapshot.budgets.len(),
        snapshot.accounts.len(),
        path.display()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::test_support::{run, session};
    use crate::export::import_from_json;

    #[test]
    fn test_export_json_to_file() {
        let (mut session, temp) = session();
        run(&mut session, "tx add 10 food Lunch").unwrap();
        let path = temp.path().join("out.json");
        let output = run(&mut session, &format!("export json -o {}", path.display())).unwrap();
        assert!(output.starts_with("Exported to"));

        let imported = import_from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(imported.transactions.len(), 1);
    }

    #[test]
    fn test_export_default_location() {
        let (mut session, _temp) = session();
        run(&mut session, "export csv").unwrap();
        let files: Vec<_> = std::fs::read_dir(session.paths.export_dir())
            .unwrap()
            .collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_remote_export_requires_sign_in() {
        let (mut session, temp) = session();
        let path = temp.path().join("remote.json");
        let err = run(&mut session, &format!("export remote -o {}", path.display())).unwrap_err();
        assert!(err.is_validation());
        assert!(!path.exists());

        run(
            &mut session,
            "profile sign-up ana@example.com --first Ana --last Lima --password secret1",
        )
        .unwrap();
        run(&mut session, "tx add 10 food Lunch").unwrap();
        run(&mut session, &format!("export remote -o {}", path.display())).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["profile"]["email"], "ana@example.com");
        assert_eq!(value["transactions"][0]["category"], "Food & Drinks");
    }

    #[test]
    fn test_import_loads_snapshot_into_session() {
        let (mut source, temp) = session();
        run(&mut source, "budget add food 200").unwrap();
        run(&mut source, "tx add 5000 salary Salary").unwrap();
        run(&mut source, "tx add 45.50 food Lunch").unwrap();
        run(&mut source, "currency set EUR").unwrap();
        let json = temp.path().join("snapshot.json");
        let yaml = temp.path().join("snapshot.yml");
        run(&mut source, &format!("export json -o {}", json.display())).unwrap();
        run(&mut source, &format!("export yaml -o {}", yaml.display())).unwrap();

        let (mut target, _other) = session();
        let output = run(&mut target, &format!("import {}", json.display())).unwrap();
        assert!(output.starts_with("Imported 2 transactions, 1 budgets and 0 accounts"));
        assert_eq!(target.currency().code, "EUR");
        assert_eq!(target.store.balance(), source.store.balance());
        assert_eq!(target.store.budgets()[0].spent.cents(), 4550);

        let (mut from_yaml, _third) = session();
        run(&mut from_yaml, &format!("import {}", yaml.display())).unwrap();
        assert_eq!(from_yaml.store.transactions().len(), 2);
    }

    #[test]
    fn test_import_rejects_bad_input() {
        let (mut session, temp) = session();

        let csv = temp.path().join("rows.csv");
        std::fs::write(&csv, "id,amount\n").unwrap();
        let err = run(&mut session, &format!("import {}", csv.display())).unwrap_err();
        assert!(err.is_validation());

        let broken = temp.path().join("broken.json");
        std::fs::write(&broken, r#"{"schema_version":"0.1.0"}"#).unwrap();
        assert!(run(&mut session, &format!("import {}", broken.display())).is_err());

        let missing = temp.path().join("missing.json");
        assert!(run(&mut session, &format!("import {}", missing.display())).is_err());

        assert!(session.store.transactions().is_empty());
    }

    #[test]
    fn test_unknown_format() {
        let (mut session, _temp) = session();
        assert!(run(&mut session, "export xml").unwrap_err().is_validation());
    }
}
