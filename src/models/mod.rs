mod budget;
mod goal;
mod income;
mod profile;
mod transaction;

pub use budget::{BudgetPlan, TimeFrame};
pub use goal::SavingsGoal;
pub use income::{IncomeSource, Month, MonthlyIncomes};
pub use profile::{Preference, Profile, Settings};
pub use transaction::{Transaction, TxnKind};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Lenient numeric parse for form input: takes the longest leading
/// `[+-]digits[.digits]` prefix and ignores whatever follows.
/// `"12.5kg"` → 12.5, `".5"` → 0.5, `"abc"` → None.
pub fn parse_number(input: &str) -> Option<Decimal> {
    let s = input.trim();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut digits = 0;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if digits == 0 {
        return None;
    }
    let numeric = s[..end].trim_end_matches('.').trim_start_matches('+');
    let numeric = match numeric.strip_prefix("-.") {
        Some(rest) => format!("-0.{rest}"),
        None => match numeric.strip_prefix('.') {
            Some(rest) => format!("0.{rest}"),
            None => numeric.to_string(),
        },
    };
    Decimal::from_str(&numeric).ok()
}

/// Sum amounts without overflow panics: a total past the representable
/// range sticks at `Decimal::MAX` (or `Decimal::MIN`).
pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse the date formats transactions are recorded with.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[cfg(test)]
mod tests;
