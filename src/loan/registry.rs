//! In-memory loan registry
//!
//! Holds the ordered loan book. Records keep their insertion position for
//! their whole life and are never deleted; status changes replace a record
//! in place.

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use validator::Validate;

use super::model::{LoanApplication, LoanId, LoanRecord, LoanStatus};
use super::seed::demo_loans;
use super::transition::TransitionPolicy;
use crate::error::LoanError;

/// Balances below half a cent count as settled
const SETTLEMENT_TOLERANCE: f64 = 0.005;

/// Ordered collection of loan records
#[derive(Debug, Clone, Default)]
pub struct LoanRegistry {
    records: Vec<LoanRecord>,
    policy: TransitionPolicy,
}

impl LoanRegistry {
    /// Create an empty registry
    pub fn new(policy: TransitionPolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
        }
    }

    /// Create a registry from existing records, rejecting repeated ids
    pub fn with_records(
        policy: TransitionPolicy,
        records: Vec<LoanRecord>,
    ) -> Result<Self, LoanError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.clone()) {
                return Err(LoanError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records, policy })
    }

    /// Registry preloaded with the demo loan book
    pub fn seeded(policy: TransitionPolicy) -> Self {
        Self {
            records: demo_loans(),
            policy,
        }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// All records in insertion order
    pub fn list(&self) -> &[LoanRecord] {
        &self.records
    }

    pub fn get(&self, id: &LoanId) -> Option<&LoanRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: &LoanId) -> Result<usize, LoanError> {
        self.records
            .iter()
            .position(|record| &record.id == id)
            .ok_or_else(|| LoanError::NotFound(id.clone()))
    }

    /// Change a loan's status, stamping today's date on approval
    pub fn set_status(&mut self, id: &LoanId, status: LoanStatus) -> Result<LoanRecord, LoanError> {
        self.set_status_on(id, status, Utc::now().date_naive())
    }

    /// Change a loan's status using `today` as the approval date
    pub fn set_status_on(
        &mut self,
        id: &LoanId,
        status: LoanStatus,
        today: NaiveDate,
    ) -> Result<LoanRecord, LoanError> {
        let index = self.position(id)?;
        let current = &self.records[index];

        if !self.policy.allows(current.status, status) {
            return Err(LoanError::IllegalTransition {
                id: id.clone(),
                from: current.status,
                to: status,
            });
        }

        let mut updated = current.clone();
        updated.status = status;
        if status == LoanStatus::Approved {
            updated.approval_date = Some(today);
        }

        self.records[index] = updated.clone();
        Ok(updated)
    }

    /// Append a record at the end of the book
    pub fn insert(&mut self, record: LoanRecord) -> Result<(), LoanError> {
        if self.get(&record.id).is_some() {
            return Err(LoanError::DuplicateId(record.id));
        }
        self.records.push(record);
        Ok(())
    }

    /// Create a pending loan from a borrower's application
    pub fn submit(
        &mut self,
        application: LoanApplication,
        default_rate: f64,
        today: NaiveDate,
    ) -> Result<LoanRecord, LoanError> {
        application.validate()?;

        let record = LoanRecord {
            id: LoanId::generate(),
            borrower_id: application.borrower_id,
            borrower_name: application.borrower_name,
            borrower_email: application.borrower_email,
            amount: application.amount,
            purpose: application.purpose,
            interest_rate: application.interest_rate.unwrap_or(default_rate),
            duration: application.duration,
            status: LoanStatus::Pending,
            application_date: today,
            approval_date: None,
            repaid_amount: None,
            collateral: application.collateral,
        };
        if !record.total_due().is_finite() {
            return Err(LoanError::Validation(
                "Loan amount and interest produce an unbounded total".to_string(),
            ));
        }

        self.insert(record.clone())?;
        Ok(record)
    }

    /// Apply a repayment to a disbursed loan, closing it once fully paid
    pub fn record_repayment(&mut self, id: &LoanId, amount: f64) -> Result<LoanRecord, LoanError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LoanError::Validation(
                "Repayment amount must be a finite number greater than 0".to_string(),
            ));
        }

        let index = self.position(id)?;
        let record = &mut self.records[index];

        if record.status != LoanStatus::Disbursed {
            return Err(LoanError::InvalidState {
                id: id.clone(),
                status: record.status,
                reason: "only disbursed loans accept repayments".to_string(),
            });
        }

        let repaid = record.repaid_amount.unwrap_or(0.0) + amount;
        if !repaid.is_finite() {
            return Err(LoanError::Validation(
                "Repayment total is out of range".to_string(),
            ));
        }
        record.repaid_amount = Some(repaid);
        if record.outstanding() < SETTLEMENT_TOLERANCE {
            record.status = LoanStatus::Repaid;
        }

        Ok(record.clone())
    }
}
