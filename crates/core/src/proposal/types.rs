//! Proposal domain types.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use bursary_shared::types::to_minor_units;

use super::error::ProposalError;

/// Proposal status in the review lifecycle.
///
/// A proposal starts `Pending` and transitions at most once:
/// - Pending → Approved (decide, action = approve)
/// - Pending → Declined (decide, action = decline)
///
/// Both outcomes are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    /// Awaiting a reviewer's decision.
    Pending,
    /// Approved; the ledger was debited by the proposal total.
    Approved,
    /// Declined with a reason; no ledger effect.
    Declined,
}

impl ProposalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Declined => "declined",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }

    /// Returns true once no further transition is permitted.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Declined)
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single line of a budget proposal.
///
/// `total` is always `cost_per_unit * quantity`; it is recomputed on
/// every edit and never accepted from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLineItem {
    /// What the money is for.
    pub reason: String,
    /// Unit of purchase (e.g. "Pack", "Ream").
    pub unit: String,
    /// Cost of one unit, non-negative.
    pub cost_per_unit: Decimal,
    /// Number of units, at least 1.
    pub quantity: u32,
    /// Derived line total.
    pub total: Decimal,
}

impl BudgetLineItem {
    /// Creates a blank item with zero cost and a quantity of one.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            reason: String::new(),
            unit: String::new(),
            cost_per_unit: Decimal::ZERO,
            quantity: 1,
            total: Decimal::ZERO,
        }
    }

    /// Recomputes `total` from the current cost and quantity.
    pub(crate) fn recompute_total(&mut self) {
        self.total = self.cost_per_unit * Decimal::from(self.quantity);
    }
}

/// A budget proposal with its full decision trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProposal {
    /// Proposal ID.
    pub id: Uuid,
    /// User who raised the proposal.
    pub submitter_id: Uuid,
    /// Spending category (e.g. "Office Supplies").
    pub category: String,
    /// Line items, immutable after submission.
    pub items: Vec<BudgetLineItem>,
    /// Lifecycle status.
    pub status: ProposalStatus,
    /// Reviewer's reason; required when declined, optional note when approved.
    pub decision_reason: Option<String>,
    /// Reviewer who decided the proposal.
    pub decided_by: Option<Uuid>,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
    /// Decision timestamp.
    pub decided_at: Option<DateTime<Utc>>,
}

impl BudgetProposal {
    /// Sum of line totals, rounded to the currency's minor unit.
    ///
    /// This is the exact amount the ledger is debited on approval.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        to_minor_units(self.items.iter().map(|item| item.total).sum())
    }
}

/// An inclusive day range for historical proposal queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting reversed bounds.
    ///
    /// # Errors
    ///
    /// Returns `ProposalError::StartAfterEnd` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ProposalError> {
        if start > end {
            return Err(ProposalError::StartAfterEnd);
        }
        Ok(Self { start, end })
    }

    /// First instant covered by the range.
    #[must_use]
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// First instant past the range (exclusive upper bound).
    #[must_use]
    pub fn ends_before(&self) -> DateTime<Utc> {
        let next = self.end.succ_opt().unwrap_or(self.end);
        next.and_time(NaiveTime::MIN).and_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn proposal_with_totals(totals: &[Decimal]) -> BudgetProposal {
        let items = totals
            .iter()
            .map(|t| BudgetLineItem {
                reason: "x".into(),
                unit: String::new(),
                cost_per_unit: *t,
                quantity: 1,
                total: *t,
            })
            .collect();
        BudgetProposal {
            id: Uuid::new_v4(),
            submitter_id: Uuid::new_v4(),
            category: "General".into(),
            items,
            status: ProposalStatus::Pending,
            decision_reason: None,
            decided_by: None,
            created_at: Utc::now(),
            decided_at: None,
        }
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ProposalStatus::Pending,
            ProposalStatus::Approved,
            ProposalStatus::Declined,
        ] {
            assert_eq!(ProposalStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ProposalStatus::parse("draft"), None);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!ProposalStatus::Pending.is_terminal());
        assert!(ProposalStatus::Approved.is_terminal());
        assert!(ProposalStatus::Declined.is_terminal());
    }

    #[test]
    fn test_total_cost_sums_items() {
        let proposal = proposal_with_totals(&[dec!(2500), dec!(1500), dec!(450)]);
        assert_eq!(proposal.total_cost(), dec!(4450));
    }

    #[test]
    fn test_total_cost_rounds_half_up() {
        let proposal = proposal_with_totals(&[dec!(0.005), dec!(1)]);
        assert_eq!(proposal.total_cost(), dec!(1.01));
    }

    #[test]
    fn test_date_range_reversed_bounds_rejected() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(
            DateRange::new(start, end),
            Err(ProposalError::StartAfterEnd)
        );
    }

    #[test]
    fn test_date_range_single_day_covers_whole_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let range = DateRange::new(day, day).unwrap();

        let morning = day.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let night = day.and_hms_opt(23, 59, 59).unwrap().and_utc();
        let next_day = day.succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap().and_utc();

        assert!(range.starts_at() <= morning);
        assert!(night < range.ends_before());
        assert!(next_day >= range.ends_before());
    }
}
