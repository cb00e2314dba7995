use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::models::{parse_date, Transaction, TxnKind};

/// Read transactions laid out the way [`super::export_transactions`] writes
/// them. Because exported descriptions are not escaped, any columns between
/// the type and the amount are joined back into the description.
pub(crate) fn import_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .quoting(false)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row_num = i + 1;
        let record = result.with_context(|| format!("Row {row_num}: failed to read CSV record"))?;
        let raw: Vec<&str> = record.iter().collect();
        let fields: Vec<&str> = raw.iter().map(|f| f.trim()).collect();

        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }
        if row_num == 1 && is_header(&fields) {
            continue;
        }
        if fields.len() < 5 {
            anyhow::bail!(
                "Row {row_num}: expected 5 columns (Date,Type,Description,Amount,Category), found {}",
                fields.len()
            );
        }

        let last = fields.len() - 1;
        let date = fields[0];
        if parse_date(date).is_none() {
            anyhow::bail!("Row {row_num}: unreadable date '{date}'");
        }
        let amount = parse_amount(fields[last - 1])
            .with_context(|| format!("Row {row_num}: failed to parse amount"))?;

        transactions.push(Transaction::new(
            date.to_string(),
            TxnKind::parse(fields[1]),
            raw[2..last - 1].join(",").trim().to_string(),
            amount,
            fields[last].to_string(),
        ));
    }

    Ok(transactions)
}

pub(crate) fn import_from_path(path: &Path) -> Result<Vec<Transaction>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    import_transactions(file)
}

fn is_header(fields: &[&str]) -> bool {
    fields
        .first()
        .is_some_and(|f| f.eq_ignore_ascii_case("date"))
}

fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned = s.replace('$', "");
    Decimal::from_str(cleaned.trim()).with_context(|| format!("'{s}' is not an amount"))
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
