use axum::{
    Router,
    routing::{delete, get},
};
use tokio::sync::RwLock;

use std::sync::Arc;

use crate::{budget, store::Store, transactions};

#[derive(Clone, Default)]
pub struct ServerState {
    pub store: Arc<RwLock<Store>>,
}

pub(crate) fn router(state: ServerState) -> Router {
    let api = Router::new()
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route("/transactions/{id}", delete(transactions::remove))
        .route("/budget", get(budget::get).post(budget::set));

    Router::new().nest("/api", api).with_state(state)
}

pub async fn run_with_listener(listener: tokio::net::TcpListener) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::default())).await
}

pub fn spawn_with_listener(
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
