use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::taxes::models::TaxLine;

/// Totals keyed by entity id
pub type TotalsMap<T> = BTreeMap<String, T>;

/// How tax is computed for a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxMode {
    /// Legacy orders: one flat percentage for everything
    FlatRate(Decimal),
    /// Itemized tax lines through the tax calculation strategy
    PerLine,
}

impl From<Option<Decimal>> for TaxMode {
    fn from(tax_rate: Option<Decimal>) -> Self {
        match tax_rate {
            Some(rate) => TaxMode::FlatRate(rate),
            None => TaxMode::PerLine,
        }
    }
}

/// Options for the batch totals operations
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TotalsOptions {
    /// Compute tax; tax lines must be available
    pub include_tax: bool,
    /// Use the tax lines already joined on each entity instead of the provider
    pub use_existing_tax_lines: bool,
    /// Flat legacy tax rate percentage
    pub tax_rate: Option<Decimal>,
}

impl TotalsOptions {
    pub fn with_tax() -> Self {
        Self {
            include_tax: true,
            ..Default::default()
        }
    }

    pub fn legacy(tax_rate: Decimal) -> Self {
        Self {
            include_tax: true,
            use_existing_tax_lines: false,
            tax_rate: Some(tax_rate),
        }
    }

    pub fn tax_mode(&self) -> TaxMode {
        TaxMode::from(self.tax_rate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemTotals {
    pub unit_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
    pub discount_total: Decimal,
    pub tax_total: Decimal,
    pub total: Decimal,
    pub original_total: Decimal,
    pub original_tax_total: Decimal,
    pub tax_lines: Vec<TaxLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethodTotals {
    pub price: Decimal,
    pub subtotal: Decimal,
    pub tax_total: Decimal,
    pub total: Decimal,
    pub original_total: Decimal,
    pub original_tax_total: Decimal,
    pub tax_lines: Vec<TaxLine>,
}

impl ShippingMethodTotals {
    pub(crate) fn from_price(price: Decimal) -> Self {
        Self {
            price,
            subtotal: price,
            tax_total: Decimal::ZERO,
            total: price,
            original_total: price,
            original_tax_total: Decimal::ZERO,
            tax_lines: Vec::new(),
        }
    }

    /// Free shipping overrides everything computed before it
    pub(crate) fn zero_out(&mut self) {
        self.total = Decimal::ZERO;
        self.subtotal = Decimal::ZERO;
        self.tax_total = Decimal::ZERO;
    }
}

/// Aggregated cart or order totals
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub discount_total: Decimal,
    pub item_tax_total: Decimal,
    pub shipping_total: Decimal,
    pub shipping_tax_total: Decimal,
    pub gift_card_total: Decimal,
    pub gift_card_tax_total: Decimal,
    pub tax_total: Decimal,
    pub total: Decimal,
    pub items: TotalsMap<LineItemTotals>,
    pub shipping_methods: TotalsMap<ShippingMethodTotals>,
}
