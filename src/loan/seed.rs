//! Demo loan book loaded at startup

use chrono::NaiveDate;

use super::model::{LoanId, LoanRecord, LoanStatus};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// The three applications shown on a fresh admin dashboard
pub fn demo_loans() -> Vec<LoanRecord> {
    vec![
        LoanRecord {
            id: LoanId::from("1"),
            borrower_id: "1".to_string(),
            borrower_name: "Maria Santos".to_string(),
            borrower_email: "maria@example.com".to_string(),
            amount: 5000.0,
            purpose: "Small business expansion - fruit cart".to_string(),
            interest_rate: 8.5,
            duration: 12,
            status: LoanStatus::Approved,
            application_date: date(2024, 1, 15),
            approval_date: Some(date(2024, 1, 18)),
            repaid_amount: None,
            collateral: Some("Business equipment".to_string()),
        },
        LoanRecord {
            id: LoanId::from("2"),
            borrower_id: "1".to_string(),
            borrower_name: "Carlos Rodriguez".to_string(),
            borrower_email: "carlos@example.com".to_string(),
            amount: 2000.0,
            purpose: "Agricultural tools purchase".to_string(),
            interest_rate: 7.5,
            duration: 6,
            status: LoanStatus::Repaid,
            application_date: date(2023, 8, 20),
            approval_date: Some(date(2023, 8, 22)),
            repaid_amount: Some(2150.0),
            collateral: None,
        },
        LoanRecord {
            id: LoanId::from("3"),
            borrower_id: "2".to_string(),
            borrower_name: "Anna Johnson".to_string(),
            borrower_email: "anna@example.com".to_string(),
            amount: 3500.0,
            purpose: "Education expenses for children".to_string(),
            interest_rate: 6.0,
            duration: 18,
            status: LoanStatus::Pending,
            application_date: date(2024, 1, 20),
            approval_date: None,
            repaid_amount: None,
            collateral: None,
        },
    ]
}
