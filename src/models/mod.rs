//! Shared API payload types

use serde::{Deserialize, Serialize};

use crate::loan::{LoanRecord, LoanStatus, PortfolioSummary, StatusCounts};

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Dashboard summary: status counts and lending totals
#[derive(Debug, Serialize)]
pub struct LoanSummaryResponse {
    pub counts: StatusCounts,
    pub portfolio: PortfolioSummary,
}

/// Single loan with its repayment figures and next lifecycle steps
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetailResponse {
    #[serde(flatten)]
    pub loan: LoanRecord,
    pub total_due: f64,
    pub outstanding: f64,
    pub estimated_monthly_payment: f64,
    pub next_statuses: Vec<LoanStatus>,
}

impl From<LoanRecord> for LoanDetailResponse {
    fn from(loan: LoanRecord) -> Self {
        Self {
            total_due: loan.total_due(),
            outstanding: loan.outstanding(),
            estimated_monthly_payment: loan.estimated_monthly_payment(),
            next_statuses: loan.status.next_statuses(),
            loan,
        }
    }
}
