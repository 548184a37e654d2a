//! Session route definitions

use axum::{routing::post, Router};

use crate::handlers::session::{current_user, login, logout};
use crate::state::AppState;

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/api/session", post(login).get(current_user).delete(logout))
}
