//! Wire records to engine values.

use api_types::{
    DEFAULT_CURRENCY,
    budget::Budget as BudgetWire,
    transaction::{TransactionKind as KindWire, TransactionView},
};
use engine::{Budget, CurrencyCode, EngineError, Transaction, TransactionKind};

fn currency_or_default(raw: Option<&str>) -> Result<CurrencyCode, EngineError> {
    CurrencyCode::try_from(raw.unwrap_or(DEFAULT_CURRENCY))
}

fn transaction_from_view(view: TransactionView) -> Result<Transaction, EngineError> {
    if !view.amount.is_finite() || view.amount < 0.0 {
        return Err(EngineError::InvalidAmount(format!(
            "transaction {} has amount {}",
            view.id, view.amount
        )));
    }
    let kind = match view.kind {
        KindWire::Income => TransactionKind::Income,
        KindWire::Expense => TransactionKind::Expense,
    };

    Ok(Transaction {
        currency: currency_or_default(view.currency.as_deref())?,
        id: view.id,
        kind,
        description: view.description,
        amount: view.amount,
        category: view.category,
        date: view.date,
    })
}

/// Converts listed records, dropping (and logging) the ones that cannot be aggregated.
pub fn transactions_from_views(views: Vec<TransactionView>) -> Vec<Transaction> {
    views
        .into_iter()
        .filter_map(|view| {
            let id = view.id.clone();
            transaction_from_view(view)
                .inspect_err(|err| tracing::warn!(%id, "dropping malformed transaction: {err}"))
                .ok()
        })
        .collect()
}

/// A budget with a malformed currency is treated as unset.
pub fn budget_from_wire(budget: Option<BudgetWire>) -> Option<Budget> {
    let budget = budget?;
    match currency_or_default(budget.currency.as_deref()) {
        Ok(currency) => Some(Budget {
            amount: budget.amount,
            currency,
        }),
        Err(err) => {
            tracing::warn!("ignoring budget: {err}");
            None
        }
    }
}
