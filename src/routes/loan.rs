//! Loan route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::loan::{
    approve_loan, disburse_loan, get_loan, list_loans, loan_summary, my_loans, record_repayment,
    reject_loan, submit_loan,
};
use crate::state::AppState;

pub fn loan_routes() -> Router<AppState> {
    Router::new()
        .route("/api/loans", get(list_loans).post(submit_loan))
        .route("/api/loans/summary", get(loan_summary))
        .route("/api/loans/mine", get(my_loans))
        .route("/api/loans/:id", get(get_loan))
        .route("/api/loans/:id/approve", post(approve_loan))
        .route("/api/loans/:id/reject", post(reject_loan))
        .route("/api/loans/:id/disburse", post(disburse_loan))
        .route("/api/loans/:id/repayments", post(record_repayment))
}
