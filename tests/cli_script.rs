mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn script(home: &std::path::Path, input: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_SCRIPT", "1")
        .env("FINTRACK_HOME", home)
        .env("RUST_LOG", "off")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn script_mode_records_income_and_allocates() {
    let home = common::temp_home();
    script(
        &home,
        "record Income 1 1000 Salary\ntotal Savings\ntotal Charity\nhistory\nexit\n",
    )
    .success()
    .stdout(contains("Added 1,000.00 ₽ to Income for January"))
    .stdout(contains("Income total: 1,000.00 ₽"))
    .stdout(contains("Savings total: 100.00 ₽"))
    .stdout(contains("Charity total: 50.00 ₽"))
    .stdout(contains("Auto-allocation"))
    .stdout(contains("Salary"));
}

#[test]
fn script_mode_reports_invalid_input_and_keeps_going() {
    let home = common::temp_home();
    script(
        &home,
        "record Loan 13 10\nrecord Expense March 20 Rent\nrecord Loan 2 -5\ntotal Loan\nexit\n",
    )
    .success()
    .stdout(contains("Invalid input"))
    .stdout(contains("not a valid amount"))
    .stdout(contains("Loan total: 0.00 ₽"))
    .stdout(contains("Added").not());
}

#[test]
fn unknown_command_suggests_closest_match() {
    let home = common::temp_home();
    script(&home, "histry\nexit\n")
        .success()
        .stdout(contains("Suggestion: `history`?"));
}

#[test]
fn config_changes_persist_between_runs() {
    let home = common::temp_home();
    script(&home, "config set currency_symbol $\nexit\n").success();
    assert!(home.join("config.json").exists());

    script(&home, "record Expense 6 20 Groceries\nexit\n")
        .success()
        .stdout(contains("Added 20.00 $ to Expense for June"));
}
