use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{parse_number, saturating_sum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    #[default]
    Week,
    Month,
    Term,
}

impl TimeFrame {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Term => "term",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "week" | "w" => Some(Self::Week),
            "month" | "m" => Some(Self::Month),
            "term" | "t" => Some(Self::Term),
            _ => None,
        }
    }

    pub fn all() -> &'static [TimeFrame] {
        &[Self::Week, Self::Month, Self::Term]
    }

    /// Cycle to the following time frame, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            Self::Week => Self::Month,
            Self::Month => Self::Term,
            Self::Term => Self::Week,
        }
    }
}

impl std::fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Term => "Term",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub name: String,
    #[serde(default)]
    pub limit: Decimal,
    #[serde(default)]
    pub spent: Decimal,
}

impl BudgetCategory {
    pub fn new(name: String) -> Self {
        Self {
            name,
            limit: Decimal::ZERO,
            spent: Decimal::ZERO,
        }
    }
}

/// Spending limits per category for one time frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPlan {
    #[serde(default)]
    pub time_frame: TimeFrame,
    #[serde(default)]
    pub categories: Vec<BudgetCategory>,
}

impl Default for BudgetPlan {
    fn default() -> Self {
        let categories = ["Tuition", "Rent", "Groceries", "Transport", "Entertainment"]
            .iter()
            .map(|name| BudgetCategory::new(name.to_string()))
            .collect();
        Self {
            time_frame: TimeFrame::Week,
            categories,
        }
    }
}

impl BudgetPlan {
    pub fn find(&self, name: &str) -> Option<usize> {
        let lower = name.trim().to_lowercase();
        self.categories
            .iter()
            .position(|c| c.name.to_lowercase() == lower)
    }

    /// Apply a raw form value as the limit. Unparsable input becomes zero.
    pub fn set_limit_from_input(&mut self, index: usize, input: &str) -> Option<Decimal> {
        let cat = self.categories.get_mut(index)?;
        cat.limit = parse_number(input).unwrap_or(Decimal::ZERO);
        Some(cat.limit)
    }

    pub fn set_spent(&mut self, index: usize, spent: Decimal) -> bool {
        match self.categories.get_mut(index) {
            Some(cat) => {
                cat.spent = spent;
                true
            }
            None => false,
        }
    }

    pub fn add_category(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("Category name cannot be empty");
        }
        if self.find(name).is_some() {
            anyhow::bail!("Category '{name}' already exists");
        }
        self.categories.push(BudgetCategory::new(name.to_string()));
        Ok(())
    }

    pub fn remove_category(&mut self, index: usize) -> Option<BudgetCategory> {
        (index < self.categories.len()).then(|| self.categories.remove(index))
    }

    pub fn total_limit(&self) -> Decimal {
        saturating_sum(self.categories.iter().map(|c| c.limit))
    }
}
