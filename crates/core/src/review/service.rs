//! Decision validation for the proposal state machine.
//!
//! A proposal moves `Pending → Approved` or `Pending → Declined`,
//! exactly once. This module validates the transition; the repository
//! layer serializes concurrent decisions on the same proposal and pairs
//! an approval with the ledger debit in one transaction.

use chrono::Utc;
use uuid::Uuid;

use crate::proposal::ProposalStatus;
use crate::review::error::ReviewError;
use crate::review::types::{DecisionAction, ReviewOutcome};

/// Stateless engine that validates a reviewer's decision.
pub struct ReviewEngine;

impl ReviewEngine {
    /// Validates a decision against the proposal's current status.
    ///
    /// The at-most-once guard runs first: a closed proposal rejects any
    /// decision regardless of the payload. A decline then requires a
    /// non-blank reason; on approval the reason is kept as an optional
    /// note.
    ///
    /// # Errors
    ///
    /// - `ReviewError::AlreadyDecided` if the proposal is not pending.
    /// - `ReviewError::ReasonRequired` for a decline with a blank reason.
    pub fn decide(
        current_status: ProposalStatus,
        action: DecisionAction,
        reason: Option<String>,
        decided_by: Uuid,
    ) -> Result<ReviewOutcome, ReviewError> {
        if current_status != ProposalStatus::Pending {
            return Err(ReviewError::AlreadyDecided {
                from: current_status,
            });
        }

        match action {
            DecisionAction::Approve => Ok(ReviewOutcome::Approve {
                new_status: ProposalStatus::Approved,
                decided_by,
                decided_at: Utc::now(),
                note: reason.filter(|r| !r.trim().is_empty()),
            }),
            DecisionAction::Decline => {
                let reason = reason
                    .filter(|r| !r.trim().is_empty())
                    .ok_or(ReviewError::ReasonRequired)?;
                Ok(ReviewOutcome::Decline {
                    new_status: ProposalStatus::Declined,
                    decided_by,
                    decided_at: Utc::now(),
                    reason,
                })
            }
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Pending → Approved (approve)
    /// - Pending → Declined (decline)
    #[must_use]
    pub fn is_valid_transition(from: ProposalStatus, to: ProposalStatus) -> bool {
        matches!(
            (from, to),
            (
                ProposalStatus::Pending,
                ProposalStatus::Approved | ProposalStatus::Declined
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approve_pending() {
        let reviewer = Uuid::new_v4();
        let outcome =
            ReviewEngine::decide(ProposalStatus::Pending, DecisionAction::Approve, None, reviewer)
                .unwrap();
        assert_eq!(outcome.new_status(), ProposalStatus::Approved);
        assert_eq!(outcome.reason(), None);
    }

    #[test]
    fn test_approve_keeps_note() {
        let outcome = ReviewEngine::decide(
            ProposalStatus::Pending,
            DecisionAction::Approve,
            Some("within allocation".into()),
            Uuid::new_v4(),
        )
        .unwrap();
        assert_eq!(outcome.reason(), Some("within allocation"));
    }

    #[test]
    fn test_decline_pending_with_reason() {
        let outcome = ReviewEngine::decide(
            ProposalStatus::Pending,
            DecisionAction::Decline,
            Some("over budget".into()),
            Uuid::new_v4(),
        )
        .unwrap();
        assert_eq!(outcome.new_status(), ProposalStatus::Declined);
        assert_eq!(outcome.reason(), Some("over budget"));
    }

    #[test]
    fn test_decline_without_reason_fails() {
        let result = ReviewEngine::decide(
            ProposalStatus::Pending,
            DecisionAction::Decline,
            None,
            Uuid::new_v4(),
        );
        assert_eq!(result.unwrap_err(), ReviewError::ReasonRequired);
    }

    #[test]
    fn test_decline_blank_reason_fails() {
        let result = ReviewEngine::decide(
            ProposalStatus::Pending,
            DecisionAction::Decline,
            Some("   ".into()),
            Uuid::new_v4(),
        );
        assert_eq!(result.unwrap_err(), ReviewError::ReasonRequired);
    }

    #[test]
    fn test_approved_proposal_rejects_any_decision() {
        for action in [DecisionAction::Approve, DecisionAction::Decline] {
            let result = ReviewEngine::decide(
                ProposalStatus::Approved,
                action,
                Some("again".into()),
                Uuid::new_v4(),
            );
            assert_eq!(
                result.unwrap_err(),
                ReviewError::AlreadyDecided {
                    from: ProposalStatus::Approved
                }
            );
        }
    }

    #[test]
    fn test_declined_proposal_rejects_any_decision() {
        let result = ReviewEngine::decide(
            ProposalStatus::Declined,
            DecisionAction::Approve,
            None,
            Uuid::new_v4(),
        );
        assert_eq!(
            result.unwrap_err(),
            ReviewError::AlreadyDecided {
                from: ProposalStatus::Declined
            }
        );
    }

    #[test]
    fn test_closed_guard_precedes_reason_check() {
        // A blank reason on a closed proposal still reports the state
        // error, matching the decide step order.
        let result = ReviewEngine::decide(
            ProposalStatus::Approved,
            DecisionAction::Decline,
            None,
            Uuid::new_v4(),
        );
        assert!(matches!(result, Err(ReviewError::AlreadyDecided { .. })));
    }

    #[test]
    fn test_is_valid_transition() {
        assert!(ReviewEngine::is_valid_transition(
            ProposalStatus::Pending,
            ProposalStatus::Approved
        ));
        assert!(ReviewEngine::is_valid_transition(
            ProposalStatus::Pending,
            ProposalStatus::Declined
        ));
        assert!(!ReviewEngine::is_valid_transition(
            ProposalStatus::Approved,
            ProposalStatus::Declined
        ));
        assert!(!ReviewEngine::is_valid_transition(
            ProposalStatus::Declined,
            ProposalStatus::Pending
        ));
    }
}
