use crate::config;
use crate::push as push_service;
use crate::state;

use axum::Router;
use axum::routing::get;
use axum::routing::post;
use serde::Serialize;
use std::sync::Arc;

mod push;
mod subscriptions;

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: &'static str,
}

pub fn build_state(config: config::AppConfig) -> Result<state::AppState, push_service::StoreError> {
    let store = match config.store_path.as_deref() {
        Some(path) => {
            let store = push_service::SubscriptionStore::open(path)?;
            tracing::info!(path = %path.display(), subscriptions = store.len(), "loaded subscription store");
            store
        }
        None => {
            tracing::warn!("no store path configured; subscriptions are kept in memory only");
            push_service::SubscriptionStore::in_memory()
        }
    };
    let sender = push_service::maybe_sender(&config);
    Ok(state::AppState {
        config,
        store: Arc::new(store),
        sender,
    })
}

pub fn app(state: state::AppState) -> Router {
    Router::new()
        .route("/subscribe", post(subscriptions::subscribe))
        .route("/unsubscribe", post(subscriptions::unsubscribe))
        .route("/api/push/public-key", get(push::push_public_key))
        .route("/api/push/broadcast", post(push::push_broadcast))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn serve(config: config::AppConfig) -> anyhow::Result<()> {
    let addr = config.bind;
    let state = build_state(config)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}

pub(crate) async fn health() -> &'static str {
    "ok"
}
