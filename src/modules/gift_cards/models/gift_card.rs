use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Gift card applied to a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCard {
    pub id: String,

    #[serde(default)]
    pub code: Option<String>,

    /// Remaining redeemable amount
    pub balance: Decimal,
}

impl GiftCard {
    pub fn new(id: impl Into<String>, balance: Decimal) -> Self {
        Self {
            id: id.into(),
            code: None,
            balance,
        }
    }
}

/// Recorded taxability of a gift card transaction.
///
/// Transactions written before taxability was tracked carry no value and
/// fall back to the region's settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Taxability {
    Taxable,
    NotTaxable,
    #[default]
    Unspecified,
}

impl From<Option<bool>> for Taxability {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Taxability::Taxable,
            Some(false) => Taxability::NotTaxable,
            None => Taxability::Unspecified,
        }
    }
}

impl From<Taxability> for Option<bool> {
    fn from(value: Taxability) -> Self {
        match value {
            Taxability::Taxable => Some(true),
            Taxability::NotTaxable => Some(false),
            Taxability::Unspecified => None,
        }
    }
}

/// Amount redeemed from a gift card on an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCardTransaction {
    #[serde(default)]
    pub id: Option<String>,

    pub amount: Decimal,

    /// Tax rate percentage recorded with the transaction
    #[serde(default)]
    pub tax_rate: Option<Decimal>,

    #[serde(default)]
    pub is_taxable: Taxability,
}

impl GiftCardTransaction {
    pub fn new(amount: Decimal, tax_rate: Option<Decimal>, is_taxable: Taxability) -> Self {
        Self {
            id: None,
            amount,
            tax_rate,
            is_taxable,
        }
    }
}

/// Redeemed gift card amount and the tax it carries
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GiftCardTotals {
    pub total: Decimal,
    pub tax_total: Decimal,
}
