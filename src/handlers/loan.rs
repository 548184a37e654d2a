//! Loan-related API handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::error::ApiError;
use crate::latency;
use crate::loan::{LoanApplication, LoanFilter, LoanId, LoanRecord, LoanService, RepaymentRequest};
use crate::middleware::{AdminUser, AuthenticatedUser};
use crate::models::{ApiResponse, LoanDetailResponse, LoanSummaryResponse};
use crate::state::AppState;

/// Borrowers only see their own loans; admins see every loan
fn ensure_can_view(auth: &AuthenticatedUser, loan: &LoanRecord) -> Result<(), ApiError> {
    if auth.user.is_admin() || loan.borrower_id == auth.user.id {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "Loan {} belongs to another borrower",
            loan.id
        )))
    }
}

/// GET /api/loans - Filtered loan list for the admin view
pub async fn list_loans(
    _admin: AdminUser,
    State(service): State<Arc<LoanService>>,
    query: Result<Query<LoanFilter>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<LoanRecord>>>, ApiError> {
    let Query(filter) = query?;
    let loans = service.list(&filter).await;
    tracing::debug!(
        status = %filter.status,
        search = %filter.search,
        matched = loans.len(),
        "Listed loans"
    );
    Ok(Json(ApiResponse::ok(loans)))
}

/// GET /api/loans/summary - Status counts and portfolio totals
pub async fn loan_summary(
    _admin: AdminUser,
    State(service): State<Arc<LoanService>>,
) -> Result<Json<ApiResponse<LoanSummaryResponse>>, ApiError> {
    let summary = LoanSummaryResponse {
        counts: service.counts().await,
        portfolio: service.portfolio().await,
    };
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/loans/mine - The caller's own loans
pub async fn my_loans(
    auth: AuthenticatedUser,
    State(service): State<Arc<LoanService>>,
) -> Result<Json<ApiResponse<Vec<LoanRecord>>>, ApiError> {
    let loans = service.list(&LoanFilter::for_borrower(auth.user.id)).await;
    Ok(Json(ApiResponse::ok(loans)))
}

/// GET /api/loans/:id
pub async fn get_loan(
    auth: AuthenticatedUser,
    State(service): State<Arc<LoanService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LoanDetailResponse>>, ApiError> {
    let loan = service.get(&LoanId::from(id)).await?;
    ensure_can_view(&auth, &loan)?;
    Ok(Json(ApiResponse::ok(LoanDetailResponse::from(loan))))
}

/// POST /api/loans - Submit a loan application
pub async fn submit_loan(
    auth: AuthenticatedUser,
    State(app_state): State<AppState>,
    payload: Result<Json<LoanApplication>, JsonRejection>,
) -> Result<Json<ApiResponse<LoanRecord>>, ApiError> {
    let Json(mut application) = payload?;
    // Borrowers always apply for themselves
    if !auth.user.is_admin() {
        application.borrower_id = auth.user.id.clone();
        application.borrower_name = auth.user.name.clone();
        application.borrower_email = auth.user.email.clone();
    }
    application.validate()?;

    let service = app_state.loan_service.clone();
    let record = latency::simulate(app_state.simulated_latency, async move {
        service.submit(application).await
    })
    .await??;

    Ok(Json(ApiResponse::ok(record)))
}

/// POST /api/loans/:id/approve
pub async fn approve_loan(
    AdminUser(admin): AdminUser,
    State(service): State<Arc<LoanService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LoanRecord>>, ApiError> {
    tracing::info!(loan_id = %id, admin_id = %admin.user.id, "Approve requested");
    let loan = service.approve(&LoanId::from(id)).await?;
    Ok(Json(ApiResponse::ok(loan)))
}

/// POST /api/loans/:id/reject
pub async fn reject_loan(
    AdminUser(admin): AdminUser,
    State(service): State<Arc<LoanService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LoanRecord>>, ApiError> {
    tracing::info!(loan_id = %id, admin_id = %admin.user.id, "Reject requested");
    let loan = service.reject(&LoanId::from(id)).await?;
    Ok(Json(ApiResponse::ok(loan)))
}

/// POST /api/loans/:id/disburse
pub async fn disburse_loan(
    AdminUser(admin): AdminUser,
    State(service): State<Arc<LoanService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LoanRecord>>, ApiError> {
    tracing::info!(loan_id = %id, admin_id = %admin.user.id, "Disbursement requested");
    let loan = service.disburse(&LoanId::from(id)).await?;
    Ok(Json(ApiResponse::ok(loan)))
}

/// POST /api/loans/:id/repayments
pub async fn record_repayment(
    auth: AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RepaymentRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoanRecord>>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let id = LoanId::from(id);
    let loan = app_state.loan_service.get(&id).await?;
    ensure_can_view(&auth, &loan)?;

    let service = app_state.loan_service.clone();
    let record = latency::simulate(app_state.simulated_latency, async move {
        service.record_repayment(&id, request.amount).await
    })
    .await??;

    Ok(Json(ApiResponse::ok(record)))
}
