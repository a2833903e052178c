use rust_decimal::Decimal;
use tracing::debug;

use crate::core::money::{rate_fraction, round_half_up};
use crate::modules::gift_cards::models::{GiftCard, GiftCardTotals, GiftCardTransaction, Taxability};
use crate::modules::totals::models::Region;

/// Inputs for gift card totals
#[derive(Debug, Clone, Copy, Default)]
pub struct GiftCardTotalsOptions<'a> {
    pub region: Option<&'a Region>,
    pub gift_cards: Option<&'a [GiftCard]>,
    /// Transaction history; takes precedence over card balances when present
    pub gift_card_transactions: Option<&'a [GiftCardTransaction]>,
}

/// Calculator for gift card redemption and gift card tax
pub struct GiftCardCalculator;

impl GiftCardCalculator {
    /// Amount gift cards may cover.
    ///
    /// Taxable gift cards pay for the pre-tax amount only; otherwise they may
    /// also cover tax.
    pub fn gift_cardable_amount(
        gift_cards_taxable: bool,
        subtotal: Decimal,
        shipping_total: Decimal,
        discount_total: Decimal,
        tax_total: Decimal,
    ) -> Decimal {
        if gift_cards_taxable {
            subtotal + shipping_total - discount_total
        } else {
            subtotal + shipping_total + tax_total - discount_total
        }
    }

    /// Gift card totals for an amount, from transactions or card balances
    pub fn totals(gift_cardable_amount: Decimal, options: GiftCardTotalsOptions<'_>) -> GiftCardTotals {
        if let Some(transactions) = options.gift_card_transactions {
            return Self::transactions_totals(transactions, options.region);
        }

        let Some(gift_cards) = options.gift_cards else {
            return GiftCardTotals::default();
        };

        let balance: Decimal = gift_cards.iter().map(|card| card.balance).sum();
        let total = gift_cardable_amount.min(balance);

        let tax_total = match options.region {
            Some(region) if region.gift_cards_taxable => {
                round_half_up(total * rate_fraction(region.tax_rate))
            }
            _ => Decimal::ZERO,
        };

        debug!(
            cards = gift_cards.len(),
            %balance,
            %total,
            %tax_total,
            "Calculated gift card totals from balances"
        );

        GiftCardTotals { total, tax_total }
    }

    /// Sums redeemed amounts and their tax.
    ///
    /// Per-transaction tax is not rounded.
    pub fn transactions_totals(
        transactions: &[GiftCardTransaction],
        region: Option<&Region>,
    ) -> GiftCardTotals {
        transactions
            .iter()
            .fold(GiftCardTotals::default(), |acc, transaction| {
                let multiplier = Self::tax_multiplier(transaction, region);
                GiftCardTotals {
                    total: acc.total + transaction.amount,
                    tax_total: acc.tax_total + transaction.amount * multiplier,
                }
            })
    }

    fn tax_multiplier(transaction: &GiftCardTransaction, region: Option<&Region>) -> Decimal {
        let recorded = transaction
            .tax_rate
            .map(rate_fraction)
            .unwrap_or(Decimal::ZERO);

        match transaction.is_taxable {
            Taxability::Taxable => recorded,
            Taxability::NotTaxable => Decimal::ZERO,
            // Recorded before taxability was tracked
            Taxability::Unspecified => match region {
                Some(region) if region.gift_cards_taxable => rate_fraction(region.tax_rate),
                _ => recorded,
            },
        }
    }
}
