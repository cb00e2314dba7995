use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub name: String,
    pub target: Decimal,
}

impl SavingsGoal {
    pub fn new(name: String, target: Decimal) -> Self {
        Self { name, target }
    }

    /// Find a goal by name (case-insensitive) in a slice.
    pub fn find_by_name<'a>(goals: &'a [SavingsGoal], name: &str) -> Option<&'a SavingsGoal> {
        let lower = name.to_lowercase();
        goals.iter().find(|g| g.name.to_lowercase() == lower)
    }
}
