//! Budget proposals and line-item arithmetic.

pub mod error;
pub mod items;
pub mod submit;
pub mod types;

pub use error::ProposalError;
pub use items::{ItemField, LineItems};
pub use submit::{LineItemInput, SubmitBudgetInput};
pub use types::{BudgetLineItem, BudgetProposal, DateRange, ProposalStatus};
