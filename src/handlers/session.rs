//! Session API handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::middleware::AuthenticatedUser;
use crate::models::ApiResponse;
use crate::session::{LoginRequest, Session, SessionStore, User};

/// POST /api/session - Log in with a registered email
pub async fn login(
    State(sessions): State<Arc<SessionStore>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Session>>> {
    let Json(request) = payload?;
    let session = sessions.login(&request.email).await?;
    Ok(Json(ApiResponse::ok(session)))
}

/// GET /api/session - The logged-in user
pub async fn current_user(auth: AuthenticatedUser) -> ApiResult<Json<ApiResponse<User>>> {
    Ok(Json(ApiResponse::ok(auth.user)))
}

/// DELETE /api/session - Log out and drop the session
pub async fn logout(
    State(sessions): State<Arc<SessionStore>>,
    auth: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<()>>> {
    sessions.logout(&auth.token).await?;
    Ok(Json(ApiResponse {
        success: true,
        data: None,
        error: None,
    }))
}
