//! Review error types.

use thiserror::Error;

use crate::proposal::ProposalStatus;

/// Errors raised while deciding a proposal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// The proposal has already left the pending state.
    #[error("proposal is already {from}; a decision is final")]
    AlreadyDecided {
        /// The proposal's current terminal status.
        from: ProposalStatus,
    },

    /// A decline was attempted without a reason.
    #[error("a reason is required to decline a proposal")]
    ReasonRequired,
}
