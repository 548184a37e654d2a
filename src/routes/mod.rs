//! Route definitions for the microlending API

mod loan;
mod session;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::middleware;
use crate::state::AppState;
use crate::websocket;

pub use loan::loan_routes;
pub use session::session_routes;

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    loans: usize,
    active_sessions: usize,
    ws_subscribers: usize,
    version: String,
}

async fn root() -> &'static str {
    "Microlend API Server"
}

/// Health check endpoint
async fn health_check(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        loans: app_state.loan_service.counts().await.all,
        active_sessions: app_state.session_store.active_sessions().await,
        ws_subscribers: app_state.ws_state.notifier.subscriber_count(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full application router with tracing and security layers
pub fn app(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/ws", get(websocket::ws_handler))
        .merge(session_routes())
        .merge(loan_routes())
        .with_state(app_state)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
}
