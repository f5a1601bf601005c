//! JSON bodies exchanged between the dashboard, the backend and the rate provider.
//!
//! Field names follow the backend's wire format (`type`, `_id`), not Rust naming.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Currency assumed for records that carry none.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Accepts either a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp, keeping only the
/// calendar date.
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let day = raw.get(..10).unwrap_or(raw.as_str());
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    /// Query string of `GET /transactions`. Absent fields mean "all".
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct TransactionQuery {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        pub kind: Option<TransactionKind>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
    }

    /// Body of `POST /transactions`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionNew {
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub description: String,
        /// Positive amount in `currency`.
        pub amount: f64,
        pub category: String,
        pub date: NaiveDate,
        /// ISO 4217 code. `None` is stored as USD.
        #[serde(default)]
        pub currency: Option<String>,
    }

    /// A stored transaction as returned by the backend.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionView {
        #[serde(alias = "_id")]
        pub id: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        #[serde(default)]
        pub description: String,
        pub amount: f64,
        #[serde(default)]
        pub category: String,
        #[serde(deserialize_with = "deserialize_date")]
        pub date: NaiveDate,
        #[serde(default)]
        pub currency: Option<String>,
    }
}

pub mod budget {
    use super::*;

    /// The active budget, as returned by `GET /budget` (which answers `null` when unset).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Budget {
        pub amount: f64,
        #[serde(default)]
        pub currency: Option<String>,
    }

    /// Body of `POST /budget`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct BudgetSet {
        pub amount: f64,
        pub currency: String,
    }
}

pub mod rates {
    use std::collections::HashMap;

    use super::*;

    /// Payload of the exchange-rate provider: `1 base = rate units` of each currency.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct RatesResponse {
        #[serde(default)]
        pub base: Option<String>,
        pub rates: HashMap<String, f64>,
    }
}
