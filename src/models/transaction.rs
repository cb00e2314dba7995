use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a transaction. Anything that is not "income" is spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TxnKind {
    Income,
    Expense,
}

impl TxnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("income") {
            Self::Income
        } else {
            Self::Expense
        }
    }
}

impl From<String> for TxnKind {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<TxnKind> for String {
    fn from(kind: TxnKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for TxnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TxnKind,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
    #[serde(default)]
    pub category: String,
}

impl Transaction {
    pub fn new(
        date: String,
        kind: TxnKind,
        description: String,
        amount: Decimal,
        category: String,
    ) -> Self {
        Self {
            date,
            kind,
            description,
            amount,
            category,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TxnKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxnKind::Expense
    }

    /// Calendar date of the transaction, if the stored string is recognizable.
    pub fn parsed_date(&self) -> Option<chrono::NaiveDate> {
        super::parse_date(&self.date)
    }
}
