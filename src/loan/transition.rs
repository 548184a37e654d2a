//! Loan status transition rules

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::LoanStatus;

/// How strictly status changes are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Only the lifecycle edges pending -> approved|rejected,
    /// approved -> disbursed and disbursed -> repaid
    #[default]
    Strict,
    /// Any status may be set from any other
    Permissive,
}

impl TransitionPolicy {
    pub fn allows(&self, from: LoanStatus, to: LoanStatus) -> bool {
        match self {
            TransitionPolicy::Strict => from.can_transition_to(to),
            TransitionPolicy::Permissive => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPolicy::Strict => "strict",
            TransitionPolicy::Permissive => "permissive",
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(TransitionPolicy::Strict),
            "permissive" => Ok(TransitionPolicy::Permissive),
            _ => Err(format!(
                "Invalid transition policy: '{}'. Expected: strict or permissive",
                s
            )),
        }
    }
}

impl LoanStatus {
    /// Lifecycle edges; rejected and repaid are never re-opened
    pub fn can_transition_to(&self, next: LoanStatus) -> bool {
        matches!(
            (self, next),
            (LoanStatus::Pending, LoanStatus::Approved)
                | (LoanStatus::Pending, LoanStatus::Rejected)
                | (LoanStatus::Approved, LoanStatus::Disbursed)
                | (LoanStatus::Disbursed, LoanStatus::Repaid)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LoanStatus::Rejected | LoanStatus::Repaid)
    }

    /// Statuses reachable in one step under the strict table
    pub fn next_statuses(&self) -> Vec<LoanStatus> {
        LoanStatus::ALL
            .into_iter()
            .filter(|next| self.can_transition_to(*next))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_edges() {
        assert!(LoanStatus::Pending.can_transition_to(LoanStatus::Approved));
        assert!(LoanStatus::Pending.can_transition_to(LoanStatus::Rejected));
        assert!(LoanStatus::Approved.can_transition_to(LoanStatus::Disbursed));
        assert!(LoanStatus::Disbursed.can_transition_to(LoanStatus::Repaid));

        assert!(!LoanStatus::Pending.can_transition_to(LoanStatus::Pending));
        assert!(!LoanStatus::Approved.can_transition_to(LoanStatus::Approved));
        assert!(!LoanStatus::Rejected.can_transition_to(LoanStatus::Approved));
        assert!(!LoanStatus::Repaid.can_transition_to(LoanStatus::Pending));
        assert!(!LoanStatus::Pending.can_transition_to(LoanStatus::Disbursed));
        assert!(!LoanStatus::Approved.can_transition_to(LoanStatus::Rejected));
    }

    #[test]
    fn test_terminal_statuses_have_no_exits() {
        for status in LoanStatus::ALL {
            assert_eq!(status.is_terminal(), status.next_statuses().is_empty());
        }
    }

    #[test]
    fn test_permissive_allows_everything() {
        for from in LoanStatus::ALL {
            for to in LoanStatus::ALL {
                assert!(TransitionPolicy::Permissive.allows(from, to));
                assert_eq!(
                    TransitionPolicy::Strict.allows(from, to),
                    from.can_transition_to(to)
                );
            }
        }
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "STRICT".parse::<TransitionPolicy>().unwrap(),
            TransitionPolicy::Strict
        );
        assert_eq!(
            "permissive".parse::<TransitionPolicy>().unwrap(),
            TransitionPolicy::Permissive
        );
        assert!("lenient".parse::<TransitionPolicy>().is_err());
        assert_eq!(TransitionPolicy::default(), TransitionPolicy::Strict);
    }
}
