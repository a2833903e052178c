use rust_decimal::Decimal;
use tracing::warn;

use crate::core::money::{
    calculate_price_tax_amount, rate_fraction, round_half_up, validate_tax_rate,
};
use crate::core::{AppError, Result};
use crate::modules::totals::models::{CalculationContext, LineItem, TaxMode};
use crate::modules::totals::services::TotalsService;

impl TotalsService {
    /// Amount refundable for a returned or cancelled line item.
    ///
    /// A flat `tax_rate` selects the legacy computation. Otherwise each of
    /// the item's tax lines is applied and rounded on its own, so the
    /// result can differ by a cent from a single summed-rate computation.
    pub fn get_line_item_refund(
        &self,
        item: &LineItem,
        context: &CalculationContext,
        tax_rate: Option<Decimal>,
    ) -> Result<Decimal> {
        if let TaxMode::FlatRate(rate) = TaxMode::from(tax_rate) {
            return self.get_line_item_refund_legacy(item, context, rate);
        }

        let tax_inclusive = context.applies_tax_inclusive_pricing(item.includes_tax);

        let Some(tax_lines) = item.tax_lines.as_deref() else {
            warn!(item_id = %item.id, "Refund requested for line item without joined tax lines");
            return Err(AppError::missing_refund_tax_lines(&item.id));
        };
        for line in tax_lines {
            validate_tax_rate(line.rate)?;
        }

        let summed_rate: Decimal = tax_lines.iter().map(|line| rate_fraction(line.rate)).sum();
        let embedded_tax = if tax_inclusive {
            calculate_price_tax_amount(item.unit_price, summed_rate, true)
        } else {
            Decimal::ZERO
        };

        let quantity = Decimal::from(item.quantity);
        let discount = context.allocation_map.discount_unit_amount(&item.id) * quantity;
        let line_subtotal = (item.unit_price - embedded_tax) * quantity - discount;

        let tax: Decimal = tax_lines
            .iter()
            .map(|line| round_half_up(line_subtotal * rate_fraction(line.rate)))
            .sum();

        Ok(line_subtotal + tax)
    }

    /// Refund under a flat legacy tax rate percentage, rounded once
    pub fn get_line_item_refund_legacy(
        &self,
        item: &LineItem,
        context: &CalculationContext,
        tax_rate: Decimal,
    ) -> Result<Decimal> {
        validate_tax_rate(tax_rate)?;
        let rate = rate_fraction(tax_rate);
        let embedded_tax = if context.applies_tax_inclusive_pricing(item.includes_tax) {
            calculate_price_tax_amount(item.unit_price, rate, true)
        } else {
            Decimal::ZERO
        };

        let quantity = Decimal::from(item.quantity);
        let line_subtotal = (item.unit_price - embedded_tax) * quantity;
        let discount = context.allocation_map.discount_unit_amount(&item.id) * quantity;

        Ok(round_half_up((line_subtotal - discount) * (Decimal::ONE + rate)))
    }
}
