use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::round_half_up;
use crate::modules::discounts::models::Discount;
use crate::modules::totals::models::LineItem;

/// Share of a cart-level discount applied to one line item
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DiscountAllocation {
    /// Discount across the whole line
    pub amount: Decimal,
    /// Discount per unit
    pub unit_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineAllocation {
    #[serde(default)]
    pub discount: Option<DiscountAllocation>,
}

/// Per-line-item discount allocations, keyed by line item id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationMap(HashMap<String, LineAllocation>);

impl AllocationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds allocations from the discount adjustments recorded on each item.
    ///
    /// Free-shipping discounts never allocate to items; without any other
    /// discount the map stays empty.
    pub fn from_adjustments(items: &[LineItem], discounts: &[Discount]) -> Self {
        let mut map = Self::new();

        if !discounts.iter().any(|d| !d.is_free_shipping()) {
            return map;
        }

        for item in items.iter().filter(|item| !item.adjustments.is_empty()) {
            let amount: Decimal = item.adjustments.iter().map(|adj| adj.amount).sum();
            let unit_amount = if item.quantity > 0 {
                round_half_up(amount / Decimal::from(item.quantity))
            } else {
                Decimal::ZERO
            };
            map.insert_discount(&item.id, DiscountAllocation { amount, unit_amount });
        }

        map
    }

    pub fn insert_discount(&mut self, item_id: impl Into<String>, allocation: DiscountAllocation) {
        self.0.entry(item_id.into()).or_default().discount = Some(allocation);
    }

    pub fn discount(&self, item_id: &str) -> Option<&DiscountAllocation> {
        self.0.get(item_id).and_then(|a| a.discount.as_ref())
    }

    /// Per-unit discount for an item, zero when unallocated
    pub fn discount_unit_amount(&self, item_id: &str) -> Decimal {
        self.discount(item_id)
            .map(|d| d.unit_amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Whole-line discount for an item, zero when unallocated
    pub fn discount_amount(&self, item_id: &str) -> Decimal {
        self.discount(item_id)
            .map(|d| d.amount)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
