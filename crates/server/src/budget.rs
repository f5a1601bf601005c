//! Budget API endpoints

use api_types::budget::{Budget, BudgetSet};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{ServerError, server::ServerState};

/// Answers `null` while no budget has been set.
pub async fn get(State(state): State<ServerState>) -> Json<Option<Budget>> {
    let store = state.store.read().await;
    Json(store.budget().cloned())
}

pub async fn set(
    State(state): State<ServerState>,
    payload: Result<Json<BudgetSet>, JsonRejection>,
) -> Result<Json<Budget>, ServerError> {
    let Json(payload) = payload?;
    let mut store = state.store.write().await;
    let budget = store.set_budget(payload)?;
    tracing::debug!(amount = budget.amount, "budget replaced");
    Ok(Json(budget))
}
