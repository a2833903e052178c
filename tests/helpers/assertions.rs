// Totals Assertion Helpers
//
// Invariants every totals record must satisfy, shared across test targets.

use pricing_engine::totals::models::{LineItemTotals, ShippingMethodTotals};
use rust_decimal::Decimal;

/// Assert `total = subtotal - discount_total + tax_total` and
/// `original_total = subtotal + original_tax_total`
///
/// # Panics
/// If either identity does not hold
pub fn assert_line_totals_consistent(totals: &LineItemTotals) {
    assert_eq!(
        totals.total,
        totals.subtotal - totals.discount_total + totals.tax_total,
        "total must equal subtotal - discount + tax: {:?}",
        totals
    );
    assert_eq!(
        totals.original_total,
        totals.subtotal + totals.original_tax_total,
        "original total must equal subtotal + original tax: {:?}",
        totals
    );
}

/// Assert `original_total = original_subtotal + original_tax_total` for a
/// shipping method priced at `price`
///
/// # Panics
/// If the identity does not hold
pub fn assert_shipping_totals_consistent(
    totals: &ShippingMethodTotals,
    tax_inclusive: bool,
) {
    let original_subtotal = if tax_inclusive {
        totals.price - totals.original_tax_total
    } else {
        totals.price
    };
    assert_eq!(
        totals.original_total,
        original_subtotal + totals.original_tax_total,
        "original total must equal original subtotal + original tax: {:?}",
        totals
    );
}

/// Assert a shipping method was fully zeroed by free shipping
pub fn assert_free_shipping(totals: &ShippingMethodTotals) {
    assert_eq!(totals.total, Decimal::ZERO, "total: {:?}", totals);
    assert_eq!(totals.subtotal, Decimal::ZERO, "subtotal: {:?}", totals);
    assert_eq!(totals.tax_total, Decimal::ZERO, "tax_total: {:?}", totals);
}
