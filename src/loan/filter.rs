//! Filter and search over the loan book

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use super::model::{LoanRecord, LoanStatus};

/// Status criterion: every loan, or only one status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(LoanStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: LoanStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<LoanStatus>().map(StatusFilter::Only)
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Criteria for the loan list view
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoanFilter {
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub search: String,
    pub borrower_id: Option<String>,
}

impl LoanFilter {
    pub fn new(status: StatusFilter, search: impl Into<String>) -> Self {
        Self {
            status,
            search: search.into(),
            borrower_id: None,
        }
    }

    pub fn for_borrower(borrower_id: impl Into<String>) -> Self {
        Self {
            borrower_id: Some(borrower_id.into()),
            ..Self::default()
        }
    }

    /// Status matches AND (empty term OR name/purpose contains the term,
    /// ignoring case)
    pub fn matches(&self, record: &LoanRecord) -> bool {
        if !self.status.matches(record.status) {
            return false;
        }
        if let Some(borrower_id) = &self.borrower_id {
            if &record.borrower_id != borrower_id {
                return false;
            }
        }
        if self.search.is_empty() {
            return true;
        }

        let term = self.search.to_lowercase();
        record.borrower_name.to_lowercase().contains(&term)
            || record.purpose.to_lowercase().contains(&term)
    }
}

/// Lazily project the records matching `filter`, keeping registry order
pub fn filter_loans<'a>(
    records: &'a [LoanRecord],
    filter: &'a LoanFilter,
) -> impl Iterator<Item = &'a LoanRecord> + 'a {
    records.iter().filter(move |record| filter.matches(record))
}
