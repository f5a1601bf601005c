//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] thrown when an amount is missing, not a number or not positive.
//! - [`InvalidCurrency`] thrown when a currency code is not three ASCII letters.
//! - [`InvalidDate`] thrown when a calendar date cannot be parsed.
//! - [`InvalidKind`] thrown when a transaction type is neither income nor expense.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidCurrency`]: EngineError::InvalidCurrency
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`InvalidKind`]: EngineError::InvalidKind
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid transaction type: {0}")]
    InvalidKind(String),
}
