use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::models::Transaction;

pub(crate) const HEADER: [&str; 5] = ["Date", "Type", "Description", "Amount", "Category"];
pub(crate) const DEFAULT_FILE_NAME: &str = "transactions.csv";

/// Write transactions as `Date,Type,Description,Amount,Category` lines.
/// Fields are written verbatim: no quoting and no escaping.
pub(crate) fn export_transactions<W: Write>(transactions: &[Transaction], writer: W) -> Result<usize> {
    if transactions.is_empty() {
        anyhow::bail!("No transactions to export.");
    }

    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for t in transactions {
        let amount = t.amount.normalize().to_string();
        wtr.write_record([
            t.date.as_str(),
            t.kind.as_str(),
            t.description.as_str(),
            amount.as_str(),
            t.category.as_str(),
        ])?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(transactions.len())
}

pub(crate) fn export_to_path(transactions: &[Transaction], path: &Path) -> Result<usize> {
    if transactions.is_empty() {
        anyhow::bail!("No transactions to export.");
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let count = export_transactions(transactions, file)?;
    info!(count, path = %path.display(), "exported transactions");
    Ok(count)
}
