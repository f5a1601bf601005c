//! Currency normalization and budget aggregation.
//!
//! Raw records come from the backend each tagged with its own currency. A render pass
//! builds a [`ConversionContext`] (selected display currency + session [`RateTable`]) and
//! feeds the records through the aggregator:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use engine::{
//!     ConversionContext, CurrencyCode, RateTable, Transaction, TransactionKind, compute_totals,
//! };
//!
//! let (rates, _) = RateTable::from_entries([("EUR", 0.9)]);
//! let ctx = ConversionContext::new(CurrencyCode::usd(), rates);
//! let lunch = Transaction {
//!     id: "1".to_string(),
//!     kind: TransactionKind::Expense,
//!     description: "Lunch".to_string(),
//!     amount: 9.0,
//!     category: "Food".to_string(),
//!     date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
//!     currency: CurrencyCode::try_from("EUR").unwrap(),
//! };
//!
//! let totals = compute_totals(&ctx, &[lunch]);
//! assert!((totals.expenses - 10.0).abs() < 1e-9);
//! ```
//!
//! Everything in this crate is synchronous and side-effect free.

pub use aggregate::{
    BudgetLevel, BudgetStatus, BudgetUsage, CategoryBreakdown, Totals, budget_status,
    category_breakdown, compute_totals, unpriced_currencies,
};
pub use convert::{ConversionContext, Converted, convert};
pub use currency::{BASE_CURRENCY, CurrencyCode};
pub use error::EngineError;
pub use rates::RateTable;
pub use transactions::{Budget, Transaction, TransactionKind, parse_date};

pub mod aggregate;
mod convert;
mod currency;
mod error;
pub mod money;
mod rates;
mod transactions;

pub type ResultEngine<T> = Result<T, EngineError>;
