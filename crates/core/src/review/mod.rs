//! The proposal decision state machine.

pub mod error;
pub mod service;
pub mod types;

pub use error::ReviewError;
pub use service::ReviewEngine;
pub use types::{DecisionAction, ReviewOutcome};
