//! Transaction and budget primitives.
//!
//! Records are immutable once created by the backend: they are listed and deleted, never
//! updated. Their `currency` is kept as stored; conversion to the display currency happens
//! at aggregation time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CurrencyCode, EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidKind(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub description: String,
    /// Positive amount expressed in `currency`.
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub currency: CurrencyCode,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// The single active monthly budget.
#[derive(Clone, Debug, PartialEq)]
pub struct Budget {
    pub amount: f64,
    pub currency: CurrencyCode,
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|err| EngineError::InvalidDate(format!("{input:?}: {err}")))
}
