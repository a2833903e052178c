use std::sync::Arc;

use futures_util::future::try_join_all;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::core::money::{round_half_up, validate_tax_rate};
use crate::core::{AppError, Result};
use crate::modules::discounts::models::Discount;
use crate::modules::gift_cards::models::{GiftCard, GiftCardTotals, GiftCardTransaction};
use crate::modules::gift_cards::services::{GiftCardCalculator, GiftCardTotalsOptions};
use crate::modules::taxes::models::TaxLine;
use crate::modules::taxes::services::{TaxCalculationStrategy, TaxLineProvider};
use crate::modules::totals::models::{
    CalculationContext, CartTotals, LineItem, LineItemTotals, Region, ShippingMethod,
    ShippingMethodTotals, TaxMode, TotalsMap, TotalsOptions,
};

/// Entities priced together by [`TotalsService::summarize`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CartPricingInput<'a> {
    pub items: &'a [LineItem],
    pub shipping_methods: &'a [ShippingMethod],
    pub discounts: &'a [Discount],
    pub gift_cards: Option<&'a [GiftCard]>,
    pub gift_card_transactions: Option<&'a [GiftCardTransaction]>,
}

/// Service computing line item, shipping, gift card and refund totals.
///
/// Holds no state between calls; tax lines and tax amounts come from the
/// injected capabilities.
pub struct TotalsService {
    pub(super) tax_strategy: Arc<dyn TaxCalculationStrategy>,
    pub(super) tax_line_provider: Arc<dyn TaxLineProvider>,
}

impl TotalsService {
    pub fn new(
        tax_strategy: Arc<dyn TaxCalculationStrategy>,
        tax_line_provider: Arc<dyn TaxLineProvider>,
    ) -> Self {
        Self {
            tax_strategy,
            tax_line_provider,
        }
    }

    /// Totals for every item in a batch, keyed by item id.
    ///
    /// Tax lines are fetched at most once per batch. Fails fast on the first
    /// item error.
    pub async fn get_line_items_totals(
        &self,
        items: &[LineItem],
        context: &CalculationContext,
        options: TotalsOptions,
    ) -> Result<TotalsMap<LineItemTotals>> {
        let tax_rate = match options.tax_mode() {
            TaxMode::FlatRate(rate) => rate,
            TaxMode::PerLine => return self.line_items_totals_per_line(items, context, options).await,
        };

        validate_tax_rate(tax_rate)?;
        debug!(items = items.len(), %tax_rate, "Calculating legacy line item totals");

        items
            .iter()
            .map(|item| {
                let totals = self.get_line_item_totals_legacy(item, context, tax_rate)?;
                Ok::<_, AppError>((item.id.clone(), totals))
            })
            .collect()
    }

    async fn line_items_totals_per_line(
        &self,
        items: &[LineItem],
        context: &CalculationContext,
        options: TotalsOptions,
    ) -> Result<TotalsMap<LineItemTotals>> {
        let mut tax_lines_map = TotalsMap::<Vec<TaxLine>>::new();

        if options.include_tax {
            if options.use_existing_tax_lines {
                for item in items {
                    tax_lines_map.insert(item.id.clone(), item.tax_lines.clone().unwrap_or_default());
                }
            } else if !items.is_empty() {
                let fetched = self.tax_line_provider.get_tax_lines_map(items, context).await?;
                tax_lines_map.extend(fetched.line_items_tax_lines);
            }
        }

        debug!(
            items = items.len(),
            resolved_tax_lines = tax_lines_map.len(),
            "Calculating line item totals"
        );

        let totals = try_join_all(items.iter().map(|item| {
            let tax_lines = tax_lines_map.get(&item.id).map(Vec::as_slice);
            async move {
                let totals = self
                    .get_line_item_totals(item, context, options.include_tax, tax_lines)
                    .await?;
                Ok::<_, AppError>((item.id.clone(), totals))
            }
        }))
        .await?;

        Ok(totals.into_iter().collect())
    }

    /// Totals for every shipping method in a batch, keyed by method id
    pub async fn get_shipping_methods_totals(
        &self,
        shipping_methods: &[ShippingMethod],
        context: &CalculationContext,
        discounts: &[Discount],
        options: TotalsOptions,
    ) -> Result<TotalsMap<ShippingMethodTotals>> {
        let tax_rate = match options.tax_mode() {
            TaxMode::FlatRate(rate) => rate,
            TaxMode::PerLine => {
                return self
                    .shipping_methods_totals_per_line(shipping_methods, context, discounts, options)
                    .await
            }
        };

        validate_tax_rate(tax_rate)?;
        debug!(
            shipping_methods = shipping_methods.len(),
            %tax_rate,
            "Calculating legacy shipping totals"
        );

        shipping_methods
            .iter()
            .map(|method| {
                let totals = self.get_shipping_method_totals_legacy(method, tax_rate, discounts)?;
                Ok::<_, AppError>((method.id.clone(), totals))
            })
            .collect()
    }

    async fn shipping_methods_totals_per_line(
        &self,
        shipping_methods: &[ShippingMethod],
        context: &CalculationContext,
        discounts: &[Discount],
        options: TotalsOptions,
    ) -> Result<TotalsMap<ShippingMethodTotals>> {
        let mut tax_lines_map = TotalsMap::<Vec<TaxLine>>::new();

        if options.include_tax {
            if options.use_existing_tax_lines {
                for method in shipping_methods {
                    tax_lines_map.insert(method.id.clone(), method.tax_lines.clone().unwrap_or_default());
                }
            } else if !shipping_methods.is_empty() {
                // Only shipping lines are needed, so no items are sent
                let fetched = self.tax_line_provider.get_tax_lines_map(&[], context).await?;
                tax_lines_map.extend(fetched.shipping_methods_tax_lines);
            }
        }

        let totals = try_join_all(shipping_methods.iter().map(|method| {
            let tax_lines = tax_lines_map.get(&method.id).map(Vec::as_slice);
            async move {
                let totals = self
                    .get_shipping_method_totals(method, context, options.include_tax, tax_lines, discounts)
                    .await?;
                Ok::<_, AppError>((method.id.clone(), totals))
            }
        }))
        .await?;

        Ok(totals.into_iter().collect())
    }

    /// Gift card totals, from transaction history when supplied
    pub fn get_gift_card_totals(
        &self,
        gift_cardable_amount: Decimal,
        options: GiftCardTotalsOptions<'_>,
    ) -> GiftCardTotals {
        GiftCardCalculator::totals(gift_cardable_amount, options)
    }

    pub fn get_gift_card_transactions_totals(
        &self,
        transactions: &[GiftCardTransaction],
        region: Option<&Region>,
    ) -> GiftCardTotals {
        GiftCardCalculator::transactions_totals(transactions, region)
    }

    /// Aggregates item, shipping and gift card totals for a whole cart
    pub async fn summarize(
        &self,
        input: CartPricingInput<'_>,
        context: &CalculationContext,
        options: TotalsOptions,
    ) -> Result<CartTotals> {
        let items = self.get_line_items_totals(input.items, context, options).await?;
        let shipping_methods = self
            .get_shipping_methods_totals(input.shipping_methods, context, input.discounts, options)
            .await?;

        let subtotal: Decimal = items.values().map(|t| t.subtotal).sum();
        let discount_total = round_half_up(items.values().map(|t| t.discount_total).sum());
        let item_tax_total: Decimal = items.values().map(|t| t.tax_total).sum();
        let shipping_total: Decimal = shipping_methods.values().map(|t| t.subtotal).sum();
        let shipping_tax_total: Decimal = shipping_methods.values().map(|t| t.tax_total).sum();

        let region = context.region.as_ref();
        let gift_cardable_amount = GiftCardCalculator::gift_cardable_amount(
            region.is_some_and(|r| r.gift_cards_taxable),
            subtotal,
            shipping_total,
            discount_total,
            item_tax_total + shipping_tax_total,
        );
        let gift_cards = self.get_gift_card_totals(
            gift_cardable_amount,
            GiftCardTotalsOptions {
                region,
                gift_cards: input.gift_cards,
                gift_card_transactions: input.gift_card_transactions,
            },
        );

        let tax_total = item_tax_total + shipping_tax_total - gift_cards.tax_total;
        let total = subtotal + shipping_total + tax_total - (gift_cards.total + discount_total);

        info!(
            items = items.len(),
            shipping_methods = shipping_methods.len(),
            %subtotal,
            %discount_total,
            %tax_total,
            %total,
            "Summarized cart totals"
        );

        Ok(CartTotals {
            subtotal,
            discount_total,
            item_tax_total,
            shipping_total,
            shipping_tax_total,
            gift_card_total: gift_cards.total,
            gift_card_tax_total: gift_cards.tax_total,
            tax_total,
            total,
            items,
            shipping_methods,
        })
    }
}
