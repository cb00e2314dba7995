#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::{Transaction, TxnKind};

fn sample() -> Vec<Transaction> {
    vec![
        Transaction::new(
            "2024-01-05".into(),
            TxnKind::Income,
            "Part-time job".into(),
            dec!(350.00),
            "Salary".into(),
        ),
        Transaction::new(
            "2024-01-06".into(),
            TxnKind::Expense,
            "Bread, milk".into(),
            dec!(12.50),
            "Groceries".into(),
        ),
    ]
}

#[test]
fn test_export_exact_format() {
    let mut out = Vec::new();
    let count = export_transactions(&sample(), &mut out).unwrap();
    assert_eq!(count, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Date,Type,Description,Amount,Category\n\
         2024-01-05,income,Part-time job,350,Salary\n\
         2024-01-06,expense,Bread, milk,12.5,Groceries\n"
    );
}

#[test]
fn test_export_empty_is_an_error() {
    let mut out = Vec::new();
    let err = export_transactions(&[], &mut out).unwrap_err();
    assert_eq!(err.to_string(), "No transactions to export.");
    assert!(out.is_empty());
}

#[test]
fn test_export_to_path_does_not_create_file_when_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_FILE_NAME);
    assert!(export_to_path(&[], &path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_export_then_import_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_FILE_NAME);
    assert_eq!(export_to_path(&sample(), &path).unwrap(), 2);

    let back = import_from_path(&path).unwrap();
    assert_eq!(back.len(), 2);
    assert_eq!(back[1].description, "Bread, milk");
    assert_eq!(back[1].amount, dec!(12.5));
    assert_eq!(back[1].category, "Groceries");
    assert!(back[0].is_income());
}

#[test]
fn test_quoted_description_survives_export_and_import() {
    let txns = vec![Transaction::new(
        "2024-01-05".into(),
        TxnKind::Expense,
        "\"Big\" lunch".into(),
        dec!(12.5),
        "Food".into(),
    )];
    let mut buf = Vec::new();
    export_transactions(&txns, &mut buf).unwrap();
    let text = String::from_utf8(buf.clone()).unwrap();
    assert!(text.contains("2024-01-05,expense,\"Big\" lunch,12.5,Food\n"));

    let back = import_transactions(buf.as_slice()).unwrap();
    assert_eq!(back, txns);
}
