//! Review domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::proposal::ProposalStatus;

/// A reviewer's requested action on a pending proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    /// Approve the proposal and debit the ledger by its total.
    Approve,
    /// Decline the proposal; no ledger effect.
    Decline,
}

impl DecisionAction {
    /// Parses an action from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "approve" => Some(Self::Approve),
            "decline" => Some(Self::Decline),
            _ => None,
        }
    }

    /// Returns the string representation of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Decline => "decline",
        }
    }
}

impl fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated decision with its audit trail, ready to be persisted.
///
/// Producing one of these does not touch storage; the repository applies
/// it (together with the ledger debit, for approvals) in one transaction.
#[derive(Debug, Clone)]
pub enum ReviewOutcome {
    /// The proposal is approved.
    Approve {
        /// The new status (`Approved`).
        new_status: ProposalStatus,
        /// The deciding reviewer.
        decided_by: Uuid,
        /// When the decision was made.
        decided_at: DateTime<Utc>,
        /// Optional annotation from the reviewer.
        note: Option<String>,
    },
    /// The proposal is declined.
    Decline {
        /// The new status (`Declined`).
        new_status: ProposalStatus,
        /// The deciding reviewer.
        decided_by: Uuid,
        /// When the decision was made.
        decided_at: DateTime<Utc>,
        /// The mandatory reason for declining.
        reason: String,
    },
}

impl ReviewOutcome {
    /// Returns the status this outcome moves the proposal to.
    #[must_use]
    pub fn new_status(&self) -> ProposalStatus {
        match self {
            Self::Approve { new_status, .. } | Self::Decline { new_status, .. } => *new_status,
        }
    }

    /// Returns the stored decision reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Approve { note, .. } => note.as_deref(),
            Self::Decline { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parse() {
        assert_eq!(DecisionAction::parse("approve"), Some(DecisionAction::Approve));
        assert_eq!(DecisionAction::parse("DECLINE"), Some(DecisionAction::Decline));
        assert_eq!(DecisionAction::parse("reject"), None);
    }

    #[test]
    fn test_action_display() {
        assert_eq!(DecisionAction::Approve.to_string(), "approve");
        assert_eq!(DecisionAction::Decline.to_string(), "decline");
    }
}
