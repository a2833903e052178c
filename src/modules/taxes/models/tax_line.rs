use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Entity a tax line applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxLineTarget {
    Item(String),
    ShippingMethod(String),
}

/// A single tax rate tied to a rule or jurisdiction.
///
/// An entity may carry several tax lines; their rates are independent
/// percentages on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxLine {
    /// Percentage rate (0-100)
    pub rate: Decimal,

    /// Display name, e.g. "VAT"
    #[serde(default)]
    pub name: String,

    /// Optional jurisdiction/rule code
    #[serde(default)]
    pub code: Option<String>,

    /// Line item or shipping method this line belongs to
    pub target: TaxLineTarget,
}

impl TaxLine {
    pub fn for_item(item_id: impl Into<String>, rate: Decimal, name: impl Into<String>) -> Self {
        Self {
            rate,
            name: name.into(),
            code: None,
            target: TaxLineTarget::Item(item_id.into()),
        }
    }

    pub fn for_shipping_method(
        shipping_method_id: impl Into<String>,
        rate: Decimal,
        name: impl Into<String>,
    ) -> Self {
        Self {
            rate,
            name: name.into(),
            code: None,
            target: TaxLineTarget::ShippingMethod(shipping_method_id.into()),
        }
    }

    pub fn item_id(&self) -> Option<&str> {
        match &self.target {
            TaxLineTarget::Item(id) => Some(id),
            TaxLineTarget::ShippingMethod(_) => None,
        }
    }

    pub fn shipping_method_id(&self) -> Option<&str> {
        match &self.target {
            TaxLineTarget::ShippingMethod(id) => Some(id),
            TaxLineTarget::Item(_) => None,
        }
    }
}
