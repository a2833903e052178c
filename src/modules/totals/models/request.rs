use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::validate_tax_rate;
use crate::core::Result;
use crate::modules::discounts::models::{AllocationMap, Discount};
use crate::modules::gift_cards::models::{GiftCard, GiftCardTransaction};
use crate::modules::taxes::models::TaxLine;
use crate::modules::totals::models::{CalculationContext, CartTotals, LineItem, Region, ShippingMethod};

/// Cart or order to price, as read by the command line tool
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingRequest {
    #[serde(default)]
    pub items: Vec<LineItem>,

    #[serde(default)]
    pub shipping_methods: Vec<ShippingMethod>,

    #[serde(default)]
    pub discounts: Vec<Discount>,

    #[serde(default)]
    pub region: Option<Region>,

    #[serde(default)]
    pub gift_cards: Option<Vec<GiftCard>>,

    #[serde(default)]
    pub gift_card_transactions: Option<Vec<GiftCardTransaction>>,

    /// Flat legacy tax rate percentage
    #[serde(default)]
    pub tax_rate: Option<Decimal>,

    /// Require tax lines and compute tax
    #[serde(default = "default_include_tax")]
    pub include_tax: bool,

    /// Tax lines resolved ahead of time, served through the tax line provider
    #[serde(default)]
    pub tax_lines: Vec<TaxLine>,

    /// Use the tax lines already joined on items and shipping methods
    #[serde(default)]
    pub use_existing_tax_lines: bool,

    /// Explicit allocations; built from item adjustments when absent
    #[serde(default)]
    pub allocation_map: Option<AllocationMap>,

    /// Items to compute refund amounts for
    #[serde(default)]
    pub refund_item_ids: Vec<String>,
}

fn default_include_tax() -> bool {
    true
}

impl PricingRequest {
    /// Reads a JSON request and validates it
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;

        let request: PricingRequest = serde_json::from_str(&input)?;
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(tax_rate) = self.tax_rate {
            validate_tax_rate(tax_rate)?;
        }
        for line in &self.tax_lines {
            validate_tax_rate(line.rate)?;
        }
        for item in &self.items {
            item.validate()?;
        }
        for method in &self.shipping_methods {
            method.validate()?;
        }
        Ok(())
    }

    /// Calculation context for this request
    pub fn context(&self, tax_inclusive_pricing: bool) -> CalculationContext {
        let allocation_map = self
            .allocation_map
            .clone()
            .unwrap_or_else(|| AllocationMap::from_adjustments(&self.items, &self.discounts));

        CalculationContext::new(allocation_map, self.region.clone())
            .with_shipping_methods(self.shipping_methods.clone())
            .with_tax_inclusive_pricing(tax_inclusive_pricing)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PricingResponse {
    pub totals: CartTotals,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub refunds: BTreeMap<String, Decimal>,
}
