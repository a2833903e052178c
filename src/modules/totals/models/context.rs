use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::discounts::models::AllocationMap;
use crate::modules::totals::models::ShippingMethod;

/// Region pricing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,

    /// Default tax rate percentage (0-100)
    pub tax_rate: Decimal,

    #[serde(default)]
    pub gift_cards_taxable: bool,
}

impl Region {
    pub fn new(id: impl Into<String>, tax_rate: Decimal, gift_cards_taxable: bool) -> Self {
        Self {
            id: id.into(),
            tax_rate,
            gift_cards_taxable,
        }
    }
}

/// Inputs shared by every entity priced in one calculation.
///
/// Built fresh by the caller for each call and treated as read-only;
/// derived contexts are new values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationContext {
    #[serde(default)]
    pub allocation_map: AllocationMap,

    #[serde(default)]
    pub region: Option<Region>,

    #[serde(default)]
    pub shipping_methods: Vec<ShippingMethod>,

    /// Tax-inclusive pricing feature switch, resolved by the caller
    #[serde(default)]
    pub tax_inclusive_pricing: bool,
}

impl CalculationContext {
    pub fn new(allocation_map: AllocationMap, region: Option<Region>) -> Self {
        Self {
            allocation_map,
            region,
            shipping_methods: Vec::new(),
            tax_inclusive_pricing: false,
        }
    }

    pub fn with_shipping_methods(mut self, shipping_methods: Vec<ShippingMethod>) -> Self {
        self.shipping_methods = shipping_methods;
        self
    }

    pub fn with_tax_inclusive_pricing(mut self, enabled: bool) -> Self {
        self.tax_inclusive_pricing = enabled;
        self
    }

    /// Whether an entity's price is treated as tax-inclusive
    pub fn applies_tax_inclusive_pricing(&self, includes_tax: bool) -> bool {
        self.tax_inclusive_pricing && includes_tax
    }

    /// Copy of this context with no discount allocations
    pub fn without_discounts(&self) -> Self {
        Self {
            allocation_map: AllocationMap::new(),
            ..self.clone()
        }
    }

    /// Copy of this context narrowed to a single shipping method
    pub fn for_shipping_method(&self, shipping_method: &ShippingMethod) -> Self {
        Self {
            shipping_methods: vec![shipping_method.clone()],
            ..self.clone()
        }
    }
}
