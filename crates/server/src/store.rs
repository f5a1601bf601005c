//! In-memory record store.
//!
//! Transactions are kept in insertion order and are never updated in place: they are
//! created, listed and deleted by id. At most one budget exists; setting a new one
//! replaces it.

use api_types::{
    DEFAULT_CURRENCY,
    budget::{Budget, BudgetSet},
    transaction::{TransactionNew, TransactionQuery, TransactionView},
};
use engine::{CurrencyCode, EngineError};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct Store {
    transactions: Vec<TransactionView>,
    budget: Option<Budget>,
}

fn validate_amount(amount: f64) -> Result<f64, EngineError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(EngineError::InvalidAmount(
            "amount must be a positive number".to_string(),
        ));
    }
    Ok(amount)
}

fn normalize_currency(currency: Option<&str>) -> Result<String, EngineError> {
    let code = CurrencyCode::try_from(currency.unwrap_or(DEFAULT_CURRENCY))?;
    Ok(code.into())
}

impl Store {
    /// Validates and stores a new transaction, assigning it a fresh id.
    pub fn insert(&mut self, new: TransactionNew) -> Result<TransactionView, EngineError> {
        let amount = validate_amount(new.amount)?;
        let currency = normalize_currency(new.currency.as_deref())?;

        let view = TransactionView {
            id: Uuid::new_v4().to_string(),
            kind: new.kind,
            description: new.description.trim().to_string(),
            amount,
            category: new.category.trim().to_string(),
            date: new.date,
            currency: Some(currency),
        };
        self.transactions.push(view.clone());
        Ok(view)
    }

    /// Transactions matching every filter present in `query`, in insertion order.
    pub fn list(&self, query: &TransactionQuery) -> Vec<TransactionView> {
        self.transactions
            .iter()
            .filter(|tx| query.kind.is_none_or(|kind| tx.kind == kind))
            .filter(|tx| {
                query
                    .category
                    .as_deref()
                    .is_none_or(|category| tx.category == category)
            })
            .cloned()
            .collect()
    }

    /// Removes the transaction with `id`. Returns `false` if it does not exist.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|tx| tx.id != id);
        self.transactions.len() != before
    }

    pub fn budget(&self) -> Option<&Budget> {
        self.budget.as_ref()
    }

    /// Replaces the active budget.
    pub fn set_budget(&mut self, set: BudgetSet) -> Result<Budget, EngineError> {
        let budget = Budget {
            amount: validate_amount(set.amount)?,
            currency: Some(normalize_currency(Some(&set.currency))?),
        };
        self.budget = Some(budget.clone());
        Ok(budget)
    }
}
