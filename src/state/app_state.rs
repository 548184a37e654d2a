//! Application state shared across handlers

use std::sync::Arc;
use std::time::Duration;

use crate::loan::LoanService;
use crate::session::SessionStore;
use crate::websocket::WsState;

use axum::extract::FromRef;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub loan_service: Arc<LoanService>,
    pub session_store: Arc<SessionStore>,
    pub ws_state: WsState,
    pub simulated_latency: Duration,
}

impl AppState {
    pub fn new(
        loan_service: Arc<LoanService>,
        session_store: Arc<SessionStore>,
        ws_state: WsState,
        simulated_latency: Duration,
    ) -> Self {
        Self {
            loan_service,
            session_store,
            ws_state,
            simulated_latency,
        }
    }
}

impl FromRef<AppState> for WsState {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.ws_state.clone()
    }
}

impl FromRef<AppState> for Arc<LoanService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.loan_service.clone()
    }
}

impl FromRef<AppState> for Arc<SessionStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.session_store.clone()
    }
}
