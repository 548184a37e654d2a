//! Per-status counts and portfolio figures for the dashboards

use serde::Serialize;

use super::filter::StatusFilter;
use super::model::{LoanRecord, LoanStatus};

/// Number of loans per status plus the overall total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub all: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub disbursed: usize,
    pub repaid: usize,
}

impl StatusCounts {
    pub fn get(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Only(LoanStatus::Pending) => self.pending,
            StatusFilter::Only(LoanStatus::Approved) => self.approved,
            StatusFilter::Only(LoanStatus::Rejected) => self.rejected,
            StatusFilter::Only(LoanStatus::Disbursed) => self.disbursed,
            StatusFilter::Only(LoanStatus::Repaid) => self.repaid,
        }
    }
}

/// Count records by status in a single pass
pub fn counts(records: &[LoanRecord]) -> StatusCounts {
    let mut counts = StatusCounts {
        all: records.len(),
        ..StatusCounts::default()
    };
    for record in records {
        match record.status {
            LoanStatus::Pending => counts.pending += 1,
            LoanStatus::Approved => counts.approved += 1,
            LoanStatus::Rejected => counts.rejected += 1,
            LoanStatus::Disbursed => counts.disbursed += 1,
            LoanStatus::Repaid => counts.repaid += 1,
        }
    }
    counts
}

/// Lending totals shown on the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_loans: usize,
    pub total_requested: f64,
    pub total_disbursed: f64,
    pub total_repaid: f64,
    pub active_loans: usize,
    pub avg_loan_amount: f64,
}

pub fn portfolio(records: &[LoanRecord]) -> PortfolioSummary {
    let mut summary = PortfolioSummary {
        total_loans: records.len(),
        ..PortfolioSummary::default()
    };

    for record in records {
        summary.total_requested += record.amount;
        summary.total_repaid += record.repaid_amount.unwrap_or(0.0);
        if matches!(record.status, LoanStatus::Disbursed | LoanStatus::Repaid) {
            summary.total_disbursed += record.amount;
        }
        if matches!(record.status, LoanStatus::Approved | LoanStatus::Disbursed) {
            summary.active_loans += 1;
        }
    }

    if !records.is_empty() {
        summary.avg_loan_amount = summary.total_requested / records.len() as f64;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::seed::demo_loans;

    #[test]
    fn test_counts_empty() {
        let counts = counts(&[]);
        assert_eq!(counts, StatusCounts::default());
        for status in LoanStatus::ALL {
            assert_eq!(counts.get(StatusFilter::Only(status)), 0);
        }
    }

    #[test]
    fn test_counts_demo_book() {
        let counts = counts(&demo_loans());
        assert_eq!(counts.all, 3);
        assert_eq!(counts.approved, 1);
        assert_eq!(counts.repaid, 1);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.rejected, 0);
        assert_eq!(counts.get(StatusFilter::All), 3);
    }

    #[test]
    fn test_per_status_counts_sum_to_all() {
        let counts = counts(&demo_loans());
        let sum: usize = LoanStatus::ALL
            .into_iter()
            .map(|status| counts.get(StatusFilter::Only(status)))
            .sum();
        assert_eq!(sum, counts.all);
    }

    #[test]
    fn test_portfolio() {
        let summary = portfolio(&demo_loans());
        assert_eq!(summary.total_loans, 3);
        assert_eq!(summary.total_requested, 10500.0);
        assert_eq!(summary.total_disbursed, 2000.0);
        assert_eq!(summary.total_repaid, 2150.0);
        assert_eq!(summary.active_loans, 1);
        assert_eq!(summary.avg_loan_amount, 3500.0);

        assert_eq!(portfolio(&[]), PortfolioSummary::default());
    }
}
