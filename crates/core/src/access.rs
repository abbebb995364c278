//! Role to capability mapping.
//!
//! Every mutating entry point consults [`AccessGate::authorize`] before
//! acting. The mapping is a fixed table: a role either holds a
//! capability or the call fails, there is no wildcard role.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Staff role in the finance office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Records student fee payments.
    Accountant,
    /// Raises budget proposals.
    Manager,
    /// Raises and adjudicates budget proposals, manages staff and students.
    Director,
}

impl Role {
    /// Parse a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "accountant" => Some(Self::Accountant),
            "manager" => Some(Self::Manager),
            "director" => Some(Self::Director),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accountant => "accountant",
            Self::Manager => "manager",
            Self::Director => "director",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An operation a caller may attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Create a budget proposal.
    SubmitBudget,
    /// Approve or decline a pending proposal.
    ReviewBudget,
    /// Record a student fee payment.
    RecordPayment,
    /// Read the operating account balance and fee balances.
    ReadBalances,
    /// Create a staff account.
    CreateUser,
    /// Create a student record.
    CreateStudent,
}

impl Operation {
    /// Returns the string representation of the operation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubmitBudget => "submit_budget",
            Self::ReviewBudget => "review_budget",
            Self::RecordPayment => "record_payment",
            Self::ReadBalances => "read_balances",
            Self::CreateUser => "create_user",
            Self::CreateStudent => "create_student",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a role lacks a capability.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    /// The role is not permitted to perform the operation.
    #[error("role '{role}' is not permitted to {operation}")]
    NotPermitted {
        /// The caller's role.
        role: Role,
        /// The attempted operation.
        operation: Operation,
    },
}

/// Stateless capability check.
pub struct AccessGate;

impl AccessGate {
    /// Returns the set of operations a role may invoke.
    #[must_use]
    pub const fn allowed_operations(role: Role) -> &'static [Operation] {
        match role {
            Role::Accountant => &[Operation::RecordPayment, Operation::ReadBalances],
            Role::Manager => &[
                Operation::SubmitBudget,
                Operation::RecordPayment,
                Operation::ReadBalances,
            ],
            Role::Director => &[
                Operation::SubmitBudget,
                Operation::ReviewBudget,
                Operation::ReadBalances,
                Operation::CreateUser,
                Operation::CreateStudent,
            ],
        }
    }

    /// Checks that `role` may invoke `operation`.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::NotPermitted` when the pair is not in the map.
    pub fn authorize(role: Role, operation: Operation) -> Result<(), AccessError> {
        if Self::allowed_operations(role).contains(&operation) {
            Ok(())
        } else {
            Err(AccessError::NotPermitted { role, operation })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("accountant"), Some(Role::Accountant));
        assert_eq!(Role::parse("MANAGER"), Some(Role::Manager));
        assert_eq!(Role::parse("Director"), Some(Role::Director));
        assert_eq!(Role::parse("viewer"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_role_as_str_round_trip() {
        for role in [Role::Accountant, Role::Manager, Role::Director] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[rstest]
    #[case(Role::Accountant, Operation::RecordPayment, true)]
    #[case(Role::Accountant, Operation::ReadBalances, true)]
    #[case(Role::Accountant, Operation::SubmitBudget, false)]
    #[case(Role::Accountant, Operation::ReviewBudget, false)]
    #[case(Role::Accountant, Operation::CreateStudent, false)]
    #[case(Role::Manager, Operation::SubmitBudget, true)]
    #[case(Role::Manager, Operation::RecordPayment, true)]
    #[case(Role::Manager, Operation::ReadBalances, true)]
    #[case(Role::Manager, Operation::ReviewBudget, false)]
    #[case(Role::Manager, Operation::CreateUser, false)]
    #[case(Role::Director, Operation::SubmitBudget, true)]
    #[case(Role::Director, Operation::ReviewBudget, true)]
    #[case(Role::Director, Operation::ReadBalances, true)]
    #[case(Role::Director, Operation::CreateUser, true)]
    #[case(Role::Director, Operation::CreateStudent, true)]
    #[case(Role::Director, Operation::RecordPayment, false)]
    fn test_capability_map(#[case] role: Role, #[case] op: Operation, #[case] allowed: bool) {
        assert_eq!(AccessGate::authorize(role, op).is_ok(), allowed);
    }

    #[test]
    fn test_denied_error_names_role_and_operation() {
        let err = AccessGate::authorize(Role::Manager, Operation::ReviewBudget).unwrap_err();
        assert_eq!(
            err.to_string(),
            "role 'manager' is not permitted to review_budget"
        );
    }
}
