//! Line-item editing and arithmetic.
//!
//! Mirrors the budget form: items are appended blank, fields are edited
//! one at a time, and any edit to cost or quantity recomputes that
//! item's derived total. A rejected edit leaves the item untouched.

use rust_decimal::Decimal;

use bursary_shared::types::to_minor_units;

use super::error::ProposalError;
use super::types::BudgetLineItem;

/// A single field edit on a line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemField {
    /// Set the reason text.
    Reason(String),
    /// Set the unit text.
    Unit(String),
    /// Set the cost per unit; rejected if negative.
    CostPerUnit(Decimal),
    /// Set the quantity; rejected below one.
    Quantity(u32),
}

/// An editable, ordered list of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItems {
    items: Vec<BudgetLineItem>,
}

impl LineItems {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a blank item and returns its index.
    pub fn add_item(&mut self) -> usize {
        self.items.push(BudgetLineItem::blank());
        self.items.len() - 1
    }

    /// Edits one field of the item at `index`.
    ///
    /// Editing cost or quantity recomputes the item's total. An invalid
    /// value is rejected and the item is left unchanged.
    ///
    /// # Errors
    ///
    /// - `ProposalError::IndexOutOfRange` if `index` is past the end.
    /// - `ProposalError::NegativeCost` for a negative cost per unit.
    /// - `ProposalError::QuantityBelowOne` for a zero quantity.
    pub fn set_field(&mut self, index: usize, field: ItemField) -> Result<(), ProposalError> {
        let item = self
            .items
            .get_mut(index)
            .ok_or(ProposalError::IndexOutOfRange { index })?;

        match field {
            ItemField::Reason(reason) => item.reason = reason,
            ItemField::Unit(unit) => item.unit = unit,
            ItemField::CostPerUnit(cost) => {
                if cost.is_sign_negative() {
                    return Err(ProposalError::NegativeCost { index });
                }
                item.cost_per_unit = cost;
                item.recompute_total();
            }
            ItemField::Quantity(quantity) => {
                if quantity < 1 {
                    return Err(ProposalError::QuantityBelowOne { index });
                }
                item.quantity = quantity;
                item.recompute_total();
            }
        }
        Ok(())
    }

    /// Sum of item totals, rounded to the currency's minor unit.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        to_minor_units(self.items.iter().map(|item| item.total).sum())
    }

    /// The items in submission order.
    #[must_use]
    pub fn as_slice(&self) -> &[BudgetLineItem] {
        &self.items
    }

    /// Consumes the list, yielding the items.
    #[must_use]
    pub fn into_vec(self) -> Vec<BudgetLineItem> {
        self.items
    }
}

impl From<Vec<BudgetLineItem>> for LineItems {
    fn from(items: Vec<BudgetLineItem>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_add_item_appends_blank() {
        let mut items = LineItems::new();
        let idx = items.add_item();
        assert_eq!(idx, 0);
        assert_eq!(items.as_slice()[0].total, Decimal::ZERO);
        assert_eq!(items.as_slice()[0].quantity, 1);
    }

    #[test]
    fn test_cost_edit_recomputes_total() {
        let mut items = LineItems::new();
        let idx = items.add_item();
        items.set_field(idx, ItemField::Quantity(5)).unwrap();
        items
            .set_field(idx, ItemField::CostPerUnit(dec!(500)))
            .unwrap();

        assert_eq!(items.as_slice()[idx].total, dec!(2500));
    }

    #[test]
    fn test_quantity_edit_recomputes_total() {
        let mut items = LineItems::new();
        let idx = items.add_item();
        items
            .set_field(idx, ItemField::CostPerUnit(dec!(150)))
            .unwrap();
        items.set_field(idx, ItemField::Quantity(3)).unwrap();

        assert_eq!(items.as_slice()[idx].total, dec!(450));
    }

    #[test]
    fn test_text_edit_leaves_total_alone() {
        let mut items = LineItems::new();
        let idx = items.add_item();
        items
            .set_field(idx, ItemField::CostPerUnit(dec!(100)))
            .unwrap();
        items
            .set_field(idx, ItemField::Reason("Paper".into()))
            .unwrap();
        items.set_field(idx, ItemField::Unit("Pack".into())).unwrap();

        assert_eq!(items.as_slice()[idx].total, dec!(100));
    }

    #[test]
    fn test_negative_cost_rejected_and_item_unchanged() {
        let mut items = LineItems::new();
        let idx = items.add_item();
        items
            .set_field(idx, ItemField::CostPerUnit(dec!(200)))
            .unwrap();

        let err = items
            .set_field(idx, ItemField::CostPerUnit(dec!(-1)))
            .unwrap_err();
        assert_eq!(err, ProposalError::NegativeCost { index: idx });
        assert_eq!(items.as_slice()[idx].cost_per_unit, dec!(200));
        assert_eq!(items.as_slice()[idx].total, dec!(200));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut items = LineItems::new();
        let idx = items.add_item();
        let err = items.set_field(idx, ItemField::Quantity(0)).unwrap_err();
        assert_eq!(err, ProposalError::QuantityBelowOne { index: idx });
        assert_eq!(items.as_slice()[idx].quantity, 1);
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let mut items = LineItems::new();
        let err = items.set_field(3, ItemField::Quantity(2)).unwrap_err();
        assert_eq!(err, ProposalError::IndexOutOfRange { index: 3 });
    }

    #[test]
    fn test_total_cost_spans_items() {
        let mut items = LineItems::new();
        let a = items.add_item();
        items.set_field(a, ItemField::CostPerUnit(dec!(500))).unwrap();
        items.set_field(a, ItemField::Quantity(5)).unwrap();
        let b = items.add_item();
        items.set_field(b, ItemField::CostPerUnit(dec!(150))).unwrap();
        items.set_field(b, ItemField::Quantity(3)).unwrap();

        assert_eq!(items.total_cost(), dec!(2950));
    }

    fn cost_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..10_000_000).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// After any sequence of cost/quantity edits, every item's total
        /// equals its cost times its quantity.
        #[test]
        fn prop_total_invariant_after_edit_sequence(
            edits in prop::collection::vec((cost_strategy(), 1u32..1000), 1..20),
        ) {
            let mut items = LineItems::new();
            let idx = items.add_item();
            for (cost, quantity) in &edits {
                items.set_field(idx, ItemField::CostPerUnit(*cost)).unwrap();
                items.set_field(idx, ItemField::Quantity(*quantity)).unwrap();
            }

            let item = &items.as_slice()[idx];
            prop_assert_eq!(item.total, item.cost_per_unit * Decimal::from(item.quantity));
        }

        /// The proposal total is order-independent: summing items in any
        /// permutation yields the same rounded figure.
        #[test]
        fn prop_total_cost_order_independent(
            lines in prop::collection::vec((cost_strategy(), 1u32..100), 1..10),
        ) {
            let build = |lines: &[(Decimal, u32)]| {
                let mut items = LineItems::new();
                for (cost, quantity) in lines {
                    let idx = items.add_item();
                    items.set_field(idx, ItemField::CostPerUnit(*cost)).unwrap();
                    items.set_field(idx, ItemField::Quantity(*quantity)).unwrap();
                }
                items.total_cost()
            };

            let forward = build(&lines);
            let mut reversed = lines.clone();
            reversed.reverse();
            prop_assert_eq!(forward, build(&reversed));
        }
    }
}
