//! Loan models and data structures for the microlending backend

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stable identifier of a loan record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanId(pub String);

impl LoanId {
    /// Mint a fresh identifier for a newly submitted application
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LoanId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for LoanId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Loan lifecycle status
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
    Disbursed,
    Repaid,
}

impl LoanStatus {
    pub const ALL: [LoanStatus; 5] = [
        LoanStatus::Pending,
        LoanStatus::Approved,
        LoanStatus::Rejected,
        LoanStatus::Disbursed,
        LoanStatus::Repaid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "pending",
            LoanStatus::Approved => "approved",
            LoanStatus::Rejected => "rejected",
            LoanStatus::Disbursed => "disbursed",
            LoanStatus::Repaid => "repaid",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(LoanStatus::Pending),
            "approved" => Ok(LoanStatus::Approved),
            "rejected" => Ok(LoanStatus::Rejected),
            "disbursed" => Ok(LoanStatus::Disbursed),
            "repaid" => Ok(LoanStatus::Repaid),
            _ => Err(format!(
                "Invalid loan status: '{}'. \
                 Expected: pending, approved, rejected, disbursed, or repaid",
                s
            )),
        }
    }
}

/// Loan record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    pub id: LoanId,
    pub borrower_id: String,
    pub borrower_name: String,
    pub borrower_email: String,
    pub amount: f64,
    pub purpose: String,
    pub interest_rate: f64, // percent
    pub duration: u32,      // months
    pub status: LoanStatus,
    pub application_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repaid_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collateral: Option<String>,
}

impl LoanRecord {
    /// Principal plus flat interest over the whole term
    pub fn total_due(&self) -> f64 {
        self.amount * (1.0 + self.interest_rate / 100.0)
    }

    pub fn estimated_monthly_payment(&self) -> f64 {
        if self.duration == 0 {
            return 0.0;
        }
        self.total_due() / self.duration as f64
    }

    /// Amount still owed; never negative
    pub fn outstanding(&self) -> f64 {
        (self.total_due() - self.repaid_amount.unwrap_or(0.0)).max(0.0)
    }
}

/// Request to submit a new loan application
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    #[validate(length(min = 1))]
    pub borrower_id: String,
    #[validate(length(min = 1, max = 120))]
    pub borrower_name: String,
    #[validate(email)]
    pub borrower_email: String,
    #[validate(range(min = 0.01, max = 1000000.0))]
    pub amount: f64,
    #[validate(length(min = 1, max = 500))]
    pub purpose: String,
    #[validate(range(min = 1, max = 60))]
    pub duration: u32,
    pub collateral: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub interest_rate: Option<f64>,
}

/// Request to record a repayment against a disbursed loan
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RepaymentRequest {
    #[validate(range(min = 0.01, max = 1000000.0))]
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(amount: f64, rate: f64, duration: u32) -> LoanRecord {
        LoanRecord {
            id: LoanId::from("1"),
            borrower_id: "1".to_string(),
            borrower_name: "Maria Santos".to_string(),
            borrower_email: "maria@example.com".to_string(),
            amount,
            purpose: "tools".to_string(),
            interest_rate: rate,
            duration,
            status: LoanStatus::Pending,
            application_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            approval_date: None,
            repaid_amount: None,
            collateral: None,
        }
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("pending".parse::<LoanStatus>().unwrap(), LoanStatus::Pending);
        assert_eq!("APPROVED".parse::<LoanStatus>().unwrap(), LoanStatus::Approved);
        assert_eq!("Repaid".parse::<LoanStatus>().unwrap(), LoanStatus::Repaid);
        assert!("defaulted".parse::<LoanStatus>().is_err());
        assert!("all".parse::<LoanStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        for status in LoanStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_record_uses_camel_case_keys() {
        let json = serde_json::to_value(record(5000.0, 8.5, 12)).unwrap();
        assert_eq!(json["borrowerName"], "Maria Santos");
        assert_eq!(json["interestRate"], 8.5);
        assert_eq!(json["applicationDate"], "2024-01-15");
        assert!(json.get("approvalDate").is_none());
    }

    #[test]
    fn test_derived_amounts() {
        let mut loan = record(1000.0, 5.5, 10);
        assert!((loan.total_due() - 1055.0).abs() < 1e-9);
        assert!((loan.estimated_monthly_payment() - 105.5).abs() < 1e-9);

        loan.repaid_amount = Some(55.0);
        assert!((loan.outstanding() - 1000.0).abs() < 1e-9);

        loan.repaid_amount = Some(2000.0);
        assert_eq!(loan.outstanding(), 0.0);

        assert_eq!(record(1000.0, 5.5, 0).estimated_monthly_payment(), 0.0);
    }

    #[test]
    fn test_application_validation() {
        let mut application = LoanApplication {
            borrower_id: "1".to_string(),
            borrower_name: "John Doe".to_string(),
            borrower_email: "user@example.com".to_string(),
            amount: 750.0,
            purpose: "agriculture".to_string(),
            duration: 6,
            collateral: None,
            interest_rate: None,
        };
        assert!(application.validate().is_ok());

        application.amount = 0.0;
        assert!(application.validate().is_err());
        application.amount = 750.0;

        application.duration = 0;
        assert!(application.validate().is_err());
        application.duration = 6;

        application.borrower_email = "not-an-email".to_string();
        assert!(application.validate().is_err());
        application.borrower_email = "user@example.com".to_string();

        application.interest_rate = Some(-1.0);
        assert!(application.validate().is_err());
        application.interest_rate = None;

        application.amount = 1.7e308;
        assert!(application.validate().is_err());
        application.amount = 1_000_000.0;
        assert!(application.validate().is_ok());
    }

    #[test]
    fn test_repayment_request_bounds() {
        assert!(RepaymentRequest { amount: 250.0 }.validate().is_ok());
        assert!(RepaymentRequest { amount: 0.0 }.validate().is_err());
        assert!(RepaymentRequest { amount: 1.7e308 }.validate().is_err());
    }
}
