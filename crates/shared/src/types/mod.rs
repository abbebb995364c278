//! Shared value types.

pub mod money;

pub use money::to_minor_units;
