//! Transactions API endpoints

use api_types::transaction::{TransactionNew, TransactionQuery, TransactionView};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TransactionQuery>,
) -> Json<Vec<TransactionView>> {
    let store = state.store.read().await;
    Json(store.list(&query))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<TransactionNew>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let Json(payload) = payload?;
    let mut store = state.store.write().await;
    let created = store.insert(payload)?;
    tracing::debug!(id = %created.id, kind = ?created.kind, "transaction created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let mut store = state.store.write().await;
    if !store.delete(&id) {
        return Err(ServerError::NotFound(format!("transaction {id} not found")));
    }
    tracing::debug!(%id, "transaction deleted");
    Ok(StatusCode::NO_CONTENT)
}
