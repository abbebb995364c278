//! Repository abstractions for data access.

pub mod ledger;
pub mod payment;
pub mod proposal;
pub mod student;
pub mod user;

pub use ledger::{LedgerError, LedgerRepository};
pub use payment::{PaymentError, PaymentRepository};
pub use proposal::{ProposalRepoError, ProposalRepository};
pub use student::{StudentError, StudentRepository};
pub use user::{UserError, UserRepository};
