//! End-to-end tests for the finanzgarten binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn finanzgarten(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("finanzgarten").unwrap();
    cmd.env("FINANZGARTEN_DATA_DIR", data_dir.path())
        .env_remove("FINANZGARTEN_LOG");
    cmd
}

fn init(data_dir: &TempDir) {
    finanzgarten(data_dir).arg("init").assert().success();
}

fn add(data_dir: &TempDir, args: &[&str]) {
    finanzgarten(data_dir)
        .args(["transaction", "add"])
        .args(args)
        .assert()
        .success();
}

/// Ids of all stored transactions, newest first
fn transaction_ids(data_dir: &TempDir) -> Vec<String> {
    let output = finanzgarten(data_dir)
        .args(["export", "--output", "-"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let export: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    export["transactions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_init_creates_profile() {
    let temp_dir = TempDir::new().unwrap();

    finanzgarten(&temp_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Miete (fixed)"));

    assert!(temp_dir.path().join("config.json").exists());
    assert!(temp_dir.path().join("data").join("profile.json").exists());

    finanzgarten(&temp_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Existing profile kept"));
}

#[test]
fn test_salary_allocates_budget() {
    let temp_dir = TempDir::new().unwrap();
    init(&temp_dir);

    finanzgarten(&temp_dir)
        .args(["transaction", "add", "income", "1000", "Gehalt Januar", "--date", "2025-01-28"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary detected"))
        .stdout(predicate::str::contains("€6000.00"));

    finanzgarten(&temp_dir)
        .args(["budget", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€500.00"))
        .stdout(predicate::str::contains("€300.00"))
        .stdout(predicate::str::contains("€100.00"));
}

#[test]
fn test_expense_with_category_updates_balance() {
    let temp_dir = TempDir::new().unwrap();
    init(&temp_dir);
    add(&temp_dir, &["income", "1000", "Gehalt", "--date", "2025-01-28"]);

    finanzgarten(&temp_dir)
        .args([
            "transaction", "add", "expense", "12.50", "Wocheneinkauf",
            "--category", "lebensmittel", "--date", "2025-02-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("€5987.50"));

    finanzgarten(&temp_dir)
        .args(["transaction", "list", "--cycle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wocheneinkauf"))
        .stdout(predicate::str::contains("Showing 2 of 2"));

    finanzgarten(&temp_dir)
        .args(["transaction", "add", "expense", "5", "Kino", "--category", "Urlaub"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category not found"));
}

#[test]
fn test_edit_and_delete_keep_balance_consistent() {
    let temp_dir = TempDir::new().unwrap();
    init(&temp_dir);
    add(&temp_dir, &["expense", "40", "Tanken", "--date", "2025-03-02"]);

    let id = transaction_ids(&temp_dir).remove(0);

    finanzgarten(&temp_dir)
        .args(["transaction", "edit", &id, "--type", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€4960.00 -> €5040.00"));

    finanzgarten(&temp_dir)
        .args(["profile", "verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance OK: €5040.00"));

    finanzgarten(&temp_dir)
        .args(["transaction", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("€5000.00"));

    assert!(transaction_ids(&temp_dir).is_empty());
}

#[test]
fn test_unknown_transaction_fails() {
    let temp_dir = TempDir::new().unwrap();
    init(&temp_dir);

    finanzgarten(&temp_dir)
        .args(["transaction", "edit", "txn-deadbeef", "--amount", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction not found"));

    finanzgarten(&temp_dir)
        .args(["transaction", "delete", "txn-deadbeef"])
        .assert()
        .failure();
}

#[test]
fn test_edit_without_fields_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    init(&temp_dir);
    add(&temp_dir, &["expense", "9.99", "Streaming"]);
    let id = transaction_ids(&temp_dir).remove(0);

    finanzgarten(&temp_dir)
        .args(["transaction", "edit", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn test_custom_split_validation() {
    let temp_dir = TempDir::new().unwrap();
    init(&temp_dir);

    finanzgarten(&temp_dir)
        .args(["budget", "split", "40", "30", "20", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No salary recorded"));

    add(&temp_dir, &["income", "2000", "Gehalt Februar"]);

    finanzgarten(&temp_dir)
        .args(["budget", "split", "50", "30", "10", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must total 100%"));

    finanzgarten(&temp_dir)
        .args(["budget", "split", "40", "30", "20", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€800.00"))
        .stdout(predicate::str::contains("€200.00"));
}

#[test]
fn test_manual_allocation_with_split() {
    let temp_dir = TempDir::new().unwrap();
    init(&temp_dir);

    finanzgarten(&temp_dir)
        .args(["budget", "allocate", "1000", "--split", "25", "25", "25", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€250.00"));
}

#[test]
fn test_hide_amounts_masks_output() {
    let temp_dir = TempDir::new().unwrap();
    init(&temp_dir);

    finanzgarten(&temp_dir)
        .args(["profile", "hide-amounts", "on"])
        .assert()
        .success();

    finanzgarten(&temp_dir)
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€••••"))
        .stdout(predicate::str::contains("€5000.00").not());
}

#[test]
fn test_set_balance_then_verify() {
    let temp_dir = TempDir::new().unwrap();
    init(&temp_dir);
    add(&temp_dir, &["expense", "100", "Versicherung"]);

    finanzgarten(&temp_dir)
        .args(["profile", "balance", "-250"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-€250.00"));

    finanzgarten(&temp_dir)
        .args(["profile", "verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance OK"));
}

#[test]
fn test_export_import_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let export_dir = TempDir::new().unwrap();
    let export_path = export_dir.path().join("backup.yaml");
    init(&temp_dir);
    add(&temp_dir, &["income", "1500", "Gehalt März", "--date", "2025-03-28"]);
    add(&temp_dir, &["expense", "80", "Strom", "--category", "Miete", "--date", "2025-03-30"]);

    finanzgarten(&temp_dir)
        .args(["export", "--format", "yaml", "--output"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 transactions"));

    finanzgarten(&temp_dir)
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€5000.00"));
    assert!(transaction_ids(&temp_dir).is_empty());

    finanzgarten(&temp_dir)
        .arg("import")
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 transactions"))
        .stdout(predicate::str::contains("€6420.00"));

    assert_eq!(transaction_ids(&temp_dir).len(), 2);
}

#[test]
fn test_csv_export_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    init(&temp_dir);
    add(&temp_dir, &["expense", "3.20", "Bäcker"]);

    finanzgarten(&temp_dir)
        .args(["export", "--format", "csv", "--output", "-"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID,Date,Type,Amount"))
        .stdout(predicate::str::contains("expense,-3.20,Bäcker"));
}

#[test]
fn test_reset_requires_confirmation() {
    let temp_dir = TempDir::new().unwrap();
    init(&temp_dir);
    add(&temp_dir, &["expense", "20", "Buch"]);

    finanzgarten(&temp_dir)
        .arg("reset")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    assert_eq!(transaction_ids(&temp_dir).len(), 1);
}

#[test]
fn test_audit_log_records_mutations() {
    let temp_dir = TempDir::new().unwrap();
    init(&temp_dir);
    add(&temp_dir, &["expense", "15", "Pizza"]);

    let log = std::fs::read_to_string(temp_dir.path().join("audit.log")).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("\"operation\":\"create\""));

    finanzgarten(&temp_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Transaction"))
        .stdout(predicate::str::contains("(Pizza)"));
}

#[test]
fn test_import_browser_app_export() {
    let temp_dir = TempDir::new().unwrap();
    let export_dir = TempDir::new().unwrap();
    let export_path = export_dir.path().join("finanzgarten-export-2025-01-31.json");
    std::fs::write(
        &export_path,
        r#"{
  "profile": {
    "currentBalance": 7487.5,
    "budgetDistribution": { "fixed": 1250, "needs": 750, "wants": 250, "savings": 250 },
    "lastSalaryDate": "2025-01-28T09:12:44.318Z",
    "categories": [],
    "savingsGoals": [],
    "settings": { "hideAmounts": false }
  },
  "transactions": [
    {
      "id": "1738141200000",
      "type": "expense",
      "amount": 12.5,
      "description": "Döner",
      "date": "2025-01-29T12:00:00.000Z",
      "category": { "id": "1737000000000", "name": "Essen", "type": "needs" }
    },
    {
      "id": "1738054800000",
      "type": "income",
      "amount": 2500,
      "description": "Gehalt Januar",
      "date": "2025-01-28T09:12:44.318Z"
    }
  ],
  "exportDate": "2025-01-31T18:30:00.000Z"
}"#,
    )
    .unwrap();
    init(&temp_dir);

    finanzgarten(&temp_dir)
        .arg("import")
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 transactions"))
        .stdout(predicate::str::contains("€7487.50"));

    finanzgarten(&temp_dir)
        .args(["profile", "verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance OK: €7487.50"));

    finanzgarten(&temp_dir)
        .args(["budget", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€1250.00"))
        .stdout(predicate::str::contains("€12.50"));
}
