#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use fintrack::domain::{Category, RecordRequest};
use fintrack::ledger::Ledger;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated application home directory for a test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn record(ledger: &mut Ledger, category: Category, month: i64, amount: f64, sub: Option<&str>) {
    let mut request = RecordRequest::for_category(category, month, amount);
    if let Some(sub) = sub {
        request = request.with_subcategory(sub);
    }
    ledger.record(&request).expect("valid record");
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}
