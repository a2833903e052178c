use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::error::EntityKind;
use crate::core::money::{rate_fraction, round_half_up, validate_tax_rate};
use crate::core::{AppError, Result};
use crate::modules::discounts::models::Discount;
use crate::modules::taxes::models::TaxLine;
use crate::modules::totals::models::{CalculationContext, ShippingMethod, ShippingMethodTotals};
use crate::modules::totals::services::TotalsService;

fn has_free_shipping(discounts: &[Discount]) -> bool {
    discounts.iter().any(Discount::is_free_shipping)
}

impl TotalsService {
    /// Totals for one shipping method using itemized tax lines.
    ///
    /// `tax_lines` overrides the lines joined on the method. Tax is computed
    /// whenever lines are available; `include_tax` additionally requires
    /// them.
    pub async fn get_shipping_method_totals(
        &self,
        shipping_method: &ShippingMethod,
        context: &CalculationContext,
        include_tax: bool,
        tax_lines: Option<&[TaxLine]>,
        discounts: &[Discount],
    ) -> Result<ShippingMethodTotals> {
        let mut totals = ShippingMethodTotals::from_price(shipping_method.price);

        let tax_lines = tax_lines.or(shipping_method.tax_lines.as_deref());
        if include_tax && tax_lines.is_none() {
            warn!(
                shipping_method_id = %shipping_method.id,
                "Tax requested for shipping method without tax lines"
            );
            return Err(AppError::missing_tax_lines(
                EntityKind::ShippingMethod,
                &shipping_method.id,
            ));
        }

        if let Some(tax_lines) = tax_lines {
            totals.tax_lines = tax_lines.to_vec();
            let tax_inclusive = context.applies_tax_inclusive_pricing(shipping_method.includes_tax);

            totals.original_tax_total = self
                .tax_strategy
                .calculate(&[], &totals.tax_lines, &context.for_shipping_method(shipping_method))
                .await?;
            totals.tax_total = totals.original_tax_total;

            if tax_inclusive {
                totals.subtotal -= totals.tax_total;
            } else {
                totals.original_total += totals.original_tax_total;
                totals.total += totals.tax_total;
            }
        }

        if has_free_shipping(discounts) {
            debug!(shipping_method_id = %shipping_method.id, "Free shipping applied");
            totals.zero_out();
        }

        Ok(totals)
    }

    /// Totals for one shipping method under a flat legacy tax rate percentage.
    ///
    /// The tax is rounded and discounts other than free shipping are ignored.
    pub fn get_shipping_method_totals_legacy(
        &self,
        shipping_method: &ShippingMethod,
        tax_rate: Decimal,
        discounts: &[Discount],
    ) -> Result<ShippingMethodTotals> {
        validate_tax_rate(tax_rate)?;
        let mut totals = ShippingMethodTotals::from_price(shipping_method.price);

        let tax = round_half_up(totals.price * rate_fraction(tax_rate));
        totals.original_tax_total = tax;
        totals.tax_total = tax;

        if has_free_shipping(discounts) {
            totals.zero_out();
        }

        totals.original_total += totals.original_tax_total;
        totals.total += totals.tax_total;

        Ok(totals)
    }
}
