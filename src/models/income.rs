use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{parse_number, saturating_sum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub fn all() -> &'static [Month] {
        &[
            Self::January,
            Self::February,
            Self::March,
            Self::April,
            Self::May,
            Self::June,
            Self::July,
            Self::August,
            Self::September,
            Self::October,
            Self::November,
            Self::December,
        ]
    }

    /// Zero-based position in the calendar year.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    pub fn from_date(date: chrono::NaiveDate) -> Self {
        // month0() is always 0..=11
        Self::all()[date.month0() as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    pub fn short(&self) -> &'static str {
        &self.as_str()[..3]
    }

    /// Accepts full names, three-letter abbreviations and 1-12.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return n.checked_sub(1).and_then(Self::from_index);
        }
        let lower = s.to_lowercase();
        if lower.len() < 3 {
            return None;
        }
        Self::all()
            .iter()
            .find(|m| m.as_str().to_lowercase().starts_with(&lower))
            .copied()
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IncomeSource {
    Salary,
    Hustle,
    Freelance,
    Investment,
}

impl IncomeSource {
    pub fn all() -> &'static [IncomeSource] {
        &[Self::Salary, Self::Hustle, Self::Freelance, Self::Investment]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Hustle => "Hustle",
            Self::Freelance => "Freelance",
            Self::Investment => "Investment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .find(|src| src.as_str().to_lowercase() == lower)
            .copied()
    }
}

impl std::fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Income per month and source, stored as `{"January": {"Salary": 1200}}`.
/// A source present in a month is "checked" even when its amount is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyIncomes(pub BTreeMap<Month, BTreeMap<IncomeSource, Decimal>>);

impl MonthlyIncomes {
    pub fn is_checked(&self, month: Month, source: IncomeSource) -> bool {
        self.0
            .get(&month)
            .is_some_and(|sources| sources.contains_key(&source))
    }

    pub fn amount(&self, month: Month, source: IncomeSource) -> Decimal {
        self.0
            .get(&month)
            .and_then(|sources| sources.get(&source))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn set_checked(&mut self, month: Month, source: IncomeSource, checked: bool) {
        let sources = self.0.entry(month).or_default();
        if checked {
            sources.entry(source).or_insert(Decimal::ZERO);
        } else {
            sources.remove(&source);
        }
    }

    /// Apply a raw form value. Only a positive number is kept; anything else
    /// drops the source from the month.
    pub fn set_amount_from_input(
        &mut self,
        month: Month,
        source: IncomeSource,
        input: &str,
    ) -> Option<Decimal> {
        let sources = self.0.entry(month).or_default();
        match parse_number(input) {
            Some(amount) if amount > Decimal::ZERO => {
                sources.insert(source, amount);
                Some(amount)
            }
            _ => {
                sources.remove(&source);
                None
            }
        }
    }

    pub fn month_total(&self, month: Month) -> Decimal {
        self.0
            .get(&month)
            .map(|sources| saturating_sum(sources.values().copied()))
            .unwrap_or(Decimal::ZERO)
    }

    pub fn yearly_totals(&self) -> [Decimal; 12] {
        let mut totals = [Decimal::ZERO; 12];
        for month in Month::all() {
            totals[month.index()] = self.month_total(*month);
        }
        totals
    }

    pub fn year_total(&self) -> Decimal {
        saturating_sum(self.yearly_totals())
    }
}
