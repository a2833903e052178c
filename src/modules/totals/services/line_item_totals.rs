use std::slice;

use rust_decimal::Decimal;
use tracing::warn;

use crate::core::error::EntityKind;
use crate::core::money::{calculate_price_tax_amount, rate_fraction, validate_tax_rate};
use crate::core::{AppError, Result};
use crate::modules::taxes::models::TaxLine;
use crate::modules::totals::models::{CalculationContext, LineItem, LineItemTotals};
use crate::modules::totals::services::TotalsService;

impl TotalsService {
    /// Totals for one line item using itemized tax lines.
    ///
    /// `tax_lines` overrides the lines joined on the item. Tax is computed
    /// whenever lines are available; `include_tax` additionally requires
    /// them.
    pub async fn get_line_item_totals(
        &self,
        item: &LineItem,
        context: &CalculationContext,
        include_tax: bool,
        tax_lines: Option<&[TaxLine]>,
    ) -> Result<LineItemTotals> {
        let tax_inclusive = context.applies_tax_inclusive_pricing(item.includes_tax);
        let quantity = Decimal::from(item.quantity);

        // Inclusive prices need the tax rate before the subtotal is known
        let subtotal = if tax_inclusive {
            Decimal::ZERO
        } else {
            item.gross_amount()
        };
        let discount_total = context.allocation_map.discount_unit_amount(&item.id) * quantity;

        let tax_lines = tax_lines.or(item.tax_lines.as_deref());

        let mut totals = LineItemTotals {
            unit_price: item.unit_price,
            quantity: item.quantity,
            subtotal,
            discount_total,
            tax_total: Decimal::ZERO,
            total: subtotal - discount_total,
            original_total: subtotal,
            original_tax_total: Decimal::ZERO,
            tax_lines: tax_lines.map(<[TaxLine]>::to_vec).unwrap_or_default(),
        };

        let Some(tax_lines) = tax_lines else {
            if include_tax {
                warn!(item_id = %item.id, "Tax requested for line item without tax lines");
                return Err(AppError::missing_tax_lines(EntityKind::LineItem, &item.id));
            }
            return Ok(totals);
        };

        let items = slice::from_ref(item);
        totals.tax_total = self.tax_strategy.calculate(items, tax_lines, context).await?;
        totals.original_tax_total = self
            .tax_strategy
            .calculate(items, tax_lines, &context.without_discounts())
            .await?;

        if tax_inclusive {
            totals.subtotal += item.gross_amount() - totals.original_tax_total;
            totals.total += totals.subtotal;
            totals.original_total += totals.subtotal;
        }

        totals.total += totals.tax_total;
        totals.original_total += totals.original_tax_total;

        Ok(totals)
    }

    /// Totals for one line item under a flat legacy tax rate percentage.
    ///
    /// Neither tax figure is rounded here.
    pub fn get_line_item_totals_legacy(
        &self,
        item: &LineItem,
        context: &CalculationContext,
        tax_rate: Decimal,
    ) -> Result<LineItemTotals> {
        validate_tax_rate(tax_rate)?;
        let rate = rate_fraction(tax_rate);
        let quantity = Decimal::from(item.quantity);

        let embedded_tax = if item.includes_tax {
            calculate_price_tax_amount(item.unit_price, rate, true)
        } else {
            Decimal::ZERO
        };
        let subtotal = (item.unit_price - embedded_tax) * quantity;
        let discount_total = context.allocation_map.discount_unit_amount(&item.id) * quantity;

        let original_tax_total = subtotal * rate;
        let tax_total = (subtotal - discount_total) * rate;

        Ok(LineItemTotals {
            unit_price: item.unit_price,
            quantity: item.quantity,
            subtotal,
            discount_total,
            tax_total,
            total: subtotal - discount_total + tax_total,
            original_total: subtotal + original_tax_total,
            original_tax_total,
            tax_lines: item.tax_lines.clone().unwrap_or_default(),
        })
    }
}
