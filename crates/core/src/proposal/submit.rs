//! Budget submission validation.
//!
//! Validates the client's payload and derives server-side totals; a
//! client-supplied total is never trusted.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::error::ProposalError;
use super::types::BudgetLineItem;

/// One line of a submission payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LineItemInput {
    /// What the money is for.
    pub reason: String,
    /// Unit of purchase.
    #[serde(default)]
    pub unit: String,
    /// Cost of one unit.
    #[serde(rename = "costPerUnit")]
    pub cost_per_unit: Decimal,
    /// Number of units.
    pub quantity: u32,
}

/// A budget submission payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitBudgetInput {
    /// Spending category.
    pub category: String,
    /// Requested line items.
    pub items: Vec<LineItemInput>,
}

impl SubmitBudgetInput {
    /// Validates the payload and builds the line items with computed totals.
    ///
    /// # Errors
    ///
    /// - `ProposalError::CategoryRequired` for an empty category.
    /// - `ProposalError::NoItems` for an empty item list.
    /// - `ProposalError::ReasonRequired` for an item with an empty reason.
    /// - `ProposalError::NegativeCost` for a negative cost per unit.
    /// - `ProposalError::QuantityBelowOne` for a zero quantity.
    pub fn validate(&self) -> Result<Vec<BudgetLineItem>, ProposalError> {
        if self.category.trim().is_empty() {
            return Err(ProposalError::CategoryRequired);
        }
        if self.items.is_empty() {
            return Err(ProposalError::NoItems);
        }

        let mut items = Vec::with_capacity(self.items.len());
        for (index, input) in self.items.iter().enumerate() {
            if input.reason.trim().is_empty() {
                return Err(ProposalError::ReasonRequired { index });
            }
            if input.cost_per_unit.is_sign_negative() {
                return Err(ProposalError::NegativeCost { index });
            }
            if input.quantity < 1 {
                return Err(ProposalError::QuantityBelowOne { index });
            }

            let mut item = BudgetLineItem {
                reason: input.reason.clone(),
                unit: input.unit.clone(),
                cost_per_unit: input.cost_per_unit,
                quantity: input.quantity,
                total: Decimal::ZERO,
            };
            item.recompute_total();
            items.push(item);
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn paper_item() -> LineItemInput {
        LineItemInput {
            reason: "Paper".into(),
            unit: "Pack".into(),
            cost_per_unit: dec!(500),
            quantity: 5,
        }
    }

    #[test]
    fn test_valid_submission_computes_totals() {
        let input = SubmitBudgetInput {
            category: "Office Supplies".into(),
            items: vec![paper_item()],
        };

        let items = input.validate().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].total, dec!(2500));
    }

    #[test]
    fn test_empty_category_rejected() {
        let input = SubmitBudgetInput {
            category: "   ".into(),
            items: vec![paper_item()],
        };
        assert_eq!(input.validate(), Err(ProposalError::CategoryRequired));
    }

    #[test]
    fn test_no_items_rejected() {
        let input = SubmitBudgetInput {
            category: "Office Supplies".into(),
            items: vec![],
        };
        assert_eq!(input.validate(), Err(ProposalError::NoItems));
    }

    #[test]
    fn test_missing_reason_rejected_with_index() {
        let mut second = paper_item();
        second.reason = String::new();
        let input = SubmitBudgetInput {
            category: "Office Supplies".into(),
            items: vec![paper_item(), second],
        };
        assert_eq!(
            input.validate(),
            Err(ProposalError::ReasonRequired { index: 1 })
        );
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut item = paper_item();
        item.quantity = 0;
        let input = SubmitBudgetInput {
            category: "Office Supplies".into(),
            items: vec![item],
        };
        assert_eq!(
            input.validate(),
            Err(ProposalError::QuantityBelowOne { index: 0 })
        );
    }

    #[test]
    fn test_negative_cost_rejected() {
        let mut item = paper_item();
        item.cost_per_unit = dec!(-5);
        let input = SubmitBudgetInput {
            category: "Office Supplies".into(),
            items: vec![item],
        };
        assert_eq!(
            input.validate(),
            Err(ProposalError::NegativeCost { index: 0 })
        );
    }
}
