use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const STATEMENT: &str = "\
Statement of account
1 30/04/2024 S100 MPOWER SALARY APR 45,000.00 (Cr) 55,000.00 (Cr)
2 02/04/2024 S101 RENT APRIL 15,000.00 (Dr) 10,000.00 (Cr)
3 15/05/2024 S102 NACH DIVIDEND XYZ 1,200.00 (Cr) 56,200.00 (Cr)
4 10/05/2024 S104 UPI TRANSFER 6,000.00 (Cr) 62,200.00 (Cr)
";

fn passbook(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("passbook").unwrap();
    cmd.arg("--config").arg(dir.join("settings.json"));
    cmd
}

#[test]
fn test_run_writes_csv_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("statement.txt");
    let csv = dir.path().join("reports").join("clean.csv");
    let report = dir.path().join("reports").join("report.md");
    std::fs::write(&input, STATEMENT).unwrap();

    passbook(dir.path())
        .arg("run")
        .arg("--input")
        .arg(&input)
        .arg("--csv")
        .arg(&csv)
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Credits:"))
        .stdout(predicate::str::contains("4 transactions written"));

    let ledger = std::fs::read_to_string(&csv).unwrap();
    assert!(ledger.starts_with("S.No,Date,Transaction Id,Remarks,Balance,Debit,Credit"));
    assert_eq!(ledger.lines().count(), 5);
    // date-sorted: the rent debit comes first
    assert!(ledger.lines().nth(1).unwrap().contains("RENT APRIL"));

    let md = std::fs::read_to_string(&report).unwrap();
    assert!(md.contains("Salary Transactions"));
    assert!(md.contains("TOTAL CREDITED FOR INCOME TAX CALC : \u{20b9}52,200.00"));
    assert!(md.contains("- **Remarks:** RENT APRIL"));
}

#[test]
fn test_extract_then_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("statement.txt");
    let csv = dir.path().join("clean.csv");
    let report = dir.path().join("report.md");
    std::fs::write(&input, STATEMENT).unwrap();

    passbook(dir.path())
        .args(["extract", "--input"])
        .arg(&input)
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success();
    assert!(csv.exists());
    assert!(!report.exists());

    passbook(dir.path())
        .args(["report", "--csv"])
        .arg(&csv)
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Markdown report generated"));
    assert!(report.exists());
}

#[test]
fn test_empty_statement_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("statement.txt");
    let csv = dir.path().join("clean.csv");
    std::fs::write(&input, "Page 1 of 1\nNo activity this period\n").unwrap();

    passbook(dir.path())
        .args(["extract", "--input"])
        .arg(&input)
        .arg("--csv")
        .arg(&csv)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No transactions found"));
    assert!(!csv.exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    passbook(dir.path())
        .args(["extract", "--input"])
        .arg(dir.path().join("nope.pdf"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input not found"));
}

#[test]
fn test_malformed_line_is_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("statement.txt");
    let csv = dir.path().join("clean.csv");
    let text = format!("{STATEMENT}5 12/05/2024 S106 CHEQUE 5,000.50 (Dr) 54,000.00\n");
    std::fs::write(&input, text).unwrap();

    passbook(dir.path())
        .args(["extract", "--input"])
        .arg(&input)
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success()
        .stderr(predicate::str::contains("line 6"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.json");

    passbook(dir.path()).args(["config", "init"]).assert().success();
    assert!(settings.exists());

    passbook(dir.path())
        .args(["config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--force"));

    passbook(dir.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();

    passbook(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"other_credit_threshold\": \"5000.00\""));
}
