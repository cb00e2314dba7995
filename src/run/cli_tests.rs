#![allow(clippy::unwrap_used)]

use super::*;
use std::io::Write;

fn csv_file(rows: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "Date,Type,Description,Amount,Category\n{rows}").unwrap();
    file
}

#[test]
fn test_import_reports_appended_and_stored_totals() {
    let store = Store::open_in_memory().unwrap();
    let first = csv_file("2024-04-01,income,Grant,900,Salary\n2024-04-02,expense,Books,60,Study\n");
    let second = csv_file("2024-04-03,expense,Lunch,8.5,Food\n");

    let msg = import_file(first.path().to_str().unwrap(), &store).unwrap();
    assert_eq!(msg, "Imported 2 transactions (2 total)");

    let msg = import_file(second.path().to_str().unwrap(), &store).unwrap();
    assert_eq!(msg, "Imported 1 transactions (3 total)");
    assert_eq!(store.transactions().unwrap().len(), 3);
}

#[test]
fn test_import_missing_file_names_the_path() {
    let store = Store::open_in_memory().unwrap();
    let err = import_file("/no/such/dir/budget.csv", &store).unwrap_err();
    assert_eq!(err.to_string(), "File not found: /no/such/dir/budget.csv");
    assert!(store.transactions().unwrap().is_empty());
}
