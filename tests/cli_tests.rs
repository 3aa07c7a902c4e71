use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ledgerly(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ledgerly").unwrap();
    cmd.env("LEDGERLY_DATA_DIR", data_dir.path());
    cmd.env_remove("LEDGERLY_PASSWORD");
    cmd
}

fn write_script(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("session.txt");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn config_creates_settings_file() {
    let data = TempDir::new().unwrap();
    ledgerly(&data)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Default currency: USD"))
        .stdout(predicate::str::contains("Spent policy:     reconcile"));
    assert!(data.path().join("config.json").exists());
}

#[test]
fn script_tracks_budget_progress() {
    let data = TempDir::new().unwrap();
    let script = write_script(
        &data,
        "# food budget\n\
         budget add food 200\n\
         tx add 5000 salary Salary\n\
         tx add 45.50 food Lunch\n\
         balance\n\
         budget list\n",
    );

    ledgerly(&data)
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance:  $4954.50"))
        .stdout(predicate::str::contains("23%"));
}

#[test]
fn script_failure_reports_line() {
    let data = TempDir::new().unwrap();
    let script = write_script(&data, "tx add 10 food Lunch\ntx add 0 food Tea\n");

    ledgerly(&data)
        .arg("run")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"))
        .stderr(predicate::str::contains("Please enter a valid amount"));
}

#[test]
fn shell_reads_stdin() {
    let data = TempDir::new().unwrap();
    ledgerly(&data)
        .arg("shell")
        .write_stdin("currency set gbp\ntx add 12 transport Bus\nbalance\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency set to GBP"))
        .stdout(predicate::str::contains("Balance:  -£12.00"));
}

#[test]
fn mutations_are_audited() {
    let data = TempDir::new().unwrap();
    ledgerly(&data)
        .arg("shell")
        .write_stdin("account add crypto Wallet 100 Ledger\n")
        .assert()
        .success();

    ledgerly(&data)
        .args(["audit", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Account"))
        .stdout(predicate::str::contains("(Wallet)"));
}

#[test]
fn export_writes_into_data_dir() {
    let data = TempDir::new().unwrap();
    ledgerly(&data)
        .arg("shell")
        .write_stdin("tx add 9.99 entertainment Movie\nexport yaml\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let exports: Vec<_> = std::fs::read_dir(data.path().join("exports"))
        .unwrap()
        .filter_map(Result::ok)
        .collect();
    assert_eq!(exports.len(), 1);
    let body = std::fs::read_to_string(exports[0].path()).unwrap();
    assert!(body.contains("Movie"));
}

#[test]
fn currencies_lists_catalog() {
    let data = TempDir::new().unwrap();
    ledgerly(&data)
        .arg("currencies")
        .assert()
        .success()
        .stdout(predicate::str::contains("* USD ($) US Dollar"))
        .stdout(predicate::str::contains("EUR"));
}
