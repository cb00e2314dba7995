#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;
use std::io::Write;

fn make_csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_import_with_header() {
    let csv = "Date,Type,Description,Amount,Category\n\
               2024-02-01,expense,Bus pass,30,Transport\n\
               2024-02-03,income,Tutoring,120.5,Hustle\n";
    let txns = import_transactions(csv.as_bytes()).unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].date, "2024-02-01");
    assert!(txns[0].is_expense());
    assert_eq!(txns[0].description, "Bus pass");
    assert_eq!(txns[0].amount, dec!(30));
    assert_eq!(txns[0].category, "Transport");
    assert!(txns[1].is_income());
    assert_eq!(txns[1].amount, dec!(120.5));
}

#[test]
fn test_import_without_header() {
    let csv = "2024-02-01,expense,Coffee,3.20,Food\n";
    let txns = import_transactions(csv.as_bytes()).unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].amount, dec!(3.20));
}

#[test]
fn test_import_rejoins_unescaped_description() {
    let csv = "2024-02-01,expense,Pens, paper, folders,9,School\n";
    let txns = import_transactions(csv.as_bytes()).unwrap();
    assert_eq!(txns[0].description, "Pens, paper, folders");
    assert_eq!(txns[0].amount, dec!(9));
    assert_eq!(txns[0].category, "School");
}

#[test]
fn test_import_skips_blank_lines() {
    let csv = "Date,Type,Description,Amount,Category\n\n2024-02-01,expense,Tea,2,Food\n,,,,\n";
    let txns = import_transactions(csv.as_bytes()).unwrap();
    assert_eq!(txns.len(), 1);
}

#[test]
fn test_import_bad_amount_names_row() {
    let csv = "Date,Type,Description,Amount,Category\n2024-02-01,expense,Tea,two,Food\n";
    let err = import_transactions(csv.as_bytes()).unwrap_err();
    assert!(format!("{err}").contains("Row 2"));
}

#[test]
fn test_import_bad_date_names_row() {
    let csv = "someday,expense,Tea,2,Food\n";
    let err = import_transactions(csv.as_bytes()).unwrap_err();
    assert!(format!("{err}").contains("Row 1"));
}

#[test]
fn test_import_too_few_columns() {
    let csv = "2024-02-01,expense,2\n";
    assert!(import_transactions(csv.as_bytes()).is_err());
}

#[test]
fn test_import_dollar_amount_and_unknown_type() {
    let csv = "2024-02-01,refund,Shoes,$45.00,Clothing\n";
    let txns = import_transactions(csv.as_bytes()).unwrap();
    assert_eq!(txns[0].amount, dec!(45));
    assert!(txns[0].is_expense());
}

#[test]
fn test_import_from_path() {
    let file = make_csv_file("2024-04-10,income,Stipend,400,Salary\n");
    let txns = import_from_path(file.path()).unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].category, "Salary");
}

#[test]
fn test_import_missing_file() {
    assert!(import_from_path(std::path::Path::new("/nonexistent/file.csv")).is_err());
}
