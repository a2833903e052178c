use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

use crate::core::money::{
    calculate_price_tax_amount, rate_fraction, round_half_up, validate_tax_rate,
};
use crate::core::Result;
use crate::modules::taxes::models::TaxLine;
use crate::modules::totals::models::{CalculationContext, LineItem, ShippingMethod};

/// Sums the tax owed by a set of items and the context's shipping methods.
///
/// Implementations may call out to external tax engines; the totals service
/// awaits them and propagates their failures unchanged.
#[async_trait]
pub trait TaxCalculationStrategy: Send + Sync {
    async fn calculate(
        &self,
        items: &[LineItem],
        tax_lines: &[TaxLine],
        context: &CalculationContext,
    ) -> Result<Decimal>;
}

/// Per-line tax computation with independent rounding of every tax line
pub struct DefaultTaxCalculationStrategy;

impl DefaultTaxCalculationStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Validate tax rate is a percentage within 0-100 with max 4 decimal places
    pub fn validate_tax_rate(&self, tax_rate: Decimal) -> Result<()> {
        validate_tax_rate(tax_rate)
    }

    fn line_items_tax(
        &self,
        items: &[LineItem],
        tax_lines: &[&TaxLine],
        context: &CalculationContext,
    ) -> Decimal {
        let mut tax_total = Decimal::ZERO;

        for item in items {
            let item_lines: Vec<&TaxLine> = tax_lines
                .iter()
                .copied()
                .filter(|line| line.item_id() == Some(item.id.as_str()))
                .collect();

            let quantity = Decimal::from(item.quantity);
            let mut taxable_amount = if context.applies_tax_inclusive_pricing(item.includes_tax) {
                let summed_rate: Decimal = item_lines.iter().map(|l| rate_fraction(l.rate)).sum();
                let embedded = calculate_price_tax_amount(item.unit_price, summed_rate, true);
                (item.unit_price - embedded) * quantity
            } else {
                item.unit_price * quantity
            };
            taxable_amount -= context.allocation_map.discount_amount(&item.id);

            for line in item_lines {
                tax_total += calculate_price_tax_amount(taxable_amount, rate_fraction(line.rate), false);
            }
        }

        tax_total
    }

    fn shipping_methods_tax(
        &self,
        shipping_methods: &[ShippingMethod],
        tax_lines: &[&TaxLine],
        context: &CalculationContext,
    ) -> Decimal {
        let mut tax_total = Decimal::ZERO;

        for method in shipping_methods {
            let includes_tax = context.applies_tax_inclusive_pricing(method.includes_tax);
            for line in tax_lines
                .iter()
                .filter(|line| line.shipping_method_id() == Some(method.id.as_str()))
            {
                tax_total +=
                    calculate_price_tax_amount(method.price, rate_fraction(line.rate), includes_tax);
            }
        }

        tax_total
    }
}

impl Default for DefaultTaxCalculationStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaxCalculationStrategy for DefaultTaxCalculationStrategy {
    async fn calculate(
        &self,
        items: &[LineItem],
        tax_lines: &[TaxLine],
        context: &CalculationContext,
    ) -> Result<Decimal> {
        for line in tax_lines {
            self.validate_tax_rate(line.rate)?;
        }

        let (item_lines, shipping_lines): (Vec<&TaxLine>, Vec<&TaxLine>) =
            tax_lines.iter().partition(|line| line.item_id().is_some());

        let items_tax = self.line_items_tax(items, &item_lines, context);
        let shipping_tax = self.shipping_methods_tax(&context.shipping_methods, &shipping_lines, context);

        debug!(
            items = items.len(),
            tax_lines = tax_lines.len(),
            %items_tax,
            %shipping_tax,
            "Calculated tax"
        );

        Ok(round_half_up(items_tax + shipping_tax))
    }
}
