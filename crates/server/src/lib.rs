use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

use serde::Serialize;
pub use server::{run_with_listener, spawn_with_listener};

mod budget;
mod server;
mod store;
mod transactions;

pub enum ServerError {
    Engine(EngineError),
    NotFound(String),
    /// Request body that could not be read as the expected JSON.
    Rejected(StatusCode, String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidAmount(_)
        | EngineError::InvalidCurrency(_)
        | EngineError::InvalidDate(_)
        | EngineError::InvalidKind(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), err.to_string()),
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
            ServerError::Rejected(status, err) => (status, err),
        };

        if status.is_client_error() {
            tracing::debug!(%status, "request rejected: {error}");
        }
        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Rejected(value.status(), value.body_text())
    }
}
