//! Proposal validation errors.

use thiserror::Error;

/// Errors raised while building or querying budget proposals.
///
/// Every variant is a validation failure: the input is rejected and
/// nothing is mutated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProposalError {
    /// The proposal category is empty.
    #[error("category is required")]
    CategoryRequired,

    /// The proposal carries no line items.
    #[error("at least one budget item is required")]
    NoItems,

    /// A line item has an empty reason.
    #[error("item {index}: reason is required")]
    ReasonRequired {
        /// Zero-based item index.
        index: usize,
    },

    /// A line item's cost per unit is negative.
    #[error("item {index}: cost per unit cannot be negative")]
    NegativeCost {
        /// Zero-based item index.
        index: usize,
    },

    /// A line item's quantity is below one.
    #[error("item {index}: quantity must be at least 1")]
    QuantityBelowOne {
        /// Zero-based item index.
        index: usize,
    },

    /// An item edit referenced an index past the end of the list.
    #[error("item index {index} is out of range")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
    },

    /// A date-range query had its bounds reversed.
    #[error("start date must not be after end date")]
    StartAfterEnd,
}
