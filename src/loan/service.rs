//! Loan service layer - Business logic for loan management

use chrono::Utc;
use tokio::sync::RwLock;

use super::filter::{filter_loans, LoanFilter};
use super::model::{LoanApplication, LoanId, LoanRecord, LoanStatus};
use super::registry::LoanRegistry;
use super::summary::{counts, portfolio, PortfolioSummary, StatusCounts};
use crate::error::LoanError;
use crate::notifications::{Notification, Notifier};

/// Loan service for managing the loan lifecycle
pub struct LoanService {
    registry: RwLock<LoanRegistry>,
    notifier: Notifier,
    default_interest_rate: f64,
}

impl LoanService {
    /// Create a new loan service instance
    pub fn new(registry: LoanRegistry, notifier: Notifier, default_interest_rate: f64) -> Self {
        Self {
            registry: RwLock::new(registry),
            notifier,
            default_interest_rate,
        }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Approve a pending application
    pub async fn approve(&self, id: &LoanId) -> Result<LoanRecord, LoanError> {
        self.transition(id, LoanStatus::Approved, "Loan approved successfully!")
            .await
    }

    /// Reject a pending application
    pub async fn reject(&self, id: &LoanId) -> Result<LoanRecord, LoanError> {
        self.transition(id, LoanStatus::Rejected, "Loan application rejected.")
            .await
    }

    /// Mark an approved loan as paid out to the borrower
    pub async fn disburse(&self, id: &LoanId) -> Result<LoanRecord, LoanError> {
        self.transition(id, LoanStatus::Disbursed, "Loan disbursed to borrower.")
            .await
    }

    async fn transition(
        &self,
        id: &LoanId,
        status: LoanStatus,
        success_message: &str,
    ) -> Result<LoanRecord, LoanError> {
        let result = {
            let mut registry = self.registry.write().await;
            let from = registry.get(id).map(|record| record.status);
            registry.set_status(id, status).map(|record| (from, record))
        };

        match result {
            Ok((from, record)) => {
                tracing::info!(
                    loan_id = %id,
                    from = ?from,
                    to = %status,
                    "Loan status changed"
                );
                self.notifier
                    .publish(Notification::success(success_message, id));
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(
                    loan_id = %id,
                    to = %status,
                    error = %e,
                    "Loan status change failed"
                );
                self.notifier.publish(Notification::error(e.to_string(), id));
                Err(e)
            }
        }
    }

    /// Submit a new application on behalf of a borrower
    pub async fn submit(&self, application: LoanApplication) -> Result<LoanRecord, LoanError> {
        let record = {
            let mut registry = self.registry.write().await;
            registry.submit(
                application,
                self.default_interest_rate,
                Utc::now().date_naive(),
            )?
        };

        tracing::info!(
            loan_id = %record.id,
            borrower_id = %record.borrower_id,
            amount = record.amount,
            "Loan application submitted"
        );
        self.notifier.publish(Notification::info(
            format!(
                "Loan application for ${:.2} has been submitted successfully.",
                record.amount
            ),
            &record.id,
        ));

        Ok(record)
    }

    /// Apply a repayment to a disbursed loan
    pub async fn record_repayment(
        &self,
        id: &LoanId,
        amount: f64,
    ) -> Result<LoanRecord, LoanError> {
        let result = {
            let mut registry = self.registry.write().await;
            registry.record_repayment(id, amount)
        };

        match result {
            Ok(record) => {
                tracing::info!(
                    loan_id = %id,
                    amount,
                    outstanding = record.outstanding(),
                    status = %record.status,
                    "Repayment recorded"
                );
                let message = if record.status == LoanStatus::Repaid {
                    "Loan fully repaid. Thank you!".to_string()
                } else {
                    format!("Payment of ${:.2} received.", amount)
                };
                self.notifier.publish(Notification::success(message, id));
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(loan_id = %id, amount, error = %e, "Repayment rejected");
                self.notifier.publish(Notification::error(e.to_string(), id));
                Err(e)
            }
        }
    }

    /// Get loan by ID
    pub async fn get(&self, id: &LoanId) -> Result<LoanRecord, LoanError> {
        self.registry
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| LoanError::NotFound(id.clone()))
    }

    /// All loans in registry order
    pub async fn list_all(&self) -> Vec<LoanRecord> {
        self.registry.read().await.list().to_vec()
    }

    /// List loans with filters
    pub async fn list(&self, filter: &LoanFilter) -> Vec<LoanRecord> {
        let registry = self.registry.read().await;
        filter_loans(registry.list(), filter).cloned().collect()
    }

    pub async fn counts(&self) -> StatusCounts {
        counts(self.registry.read().await.list())
    }

    pub async fn portfolio(&self) -> PortfolioSummary {
        portfolio(self.registry.read().await.list())
    }
}
