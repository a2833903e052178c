use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discount rule type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountRuleType {
    Fixed,
    Percentage,
    /// Zeroes shipping totals
    FreeShipping,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRule {
    #[serde(rename = "type")]
    pub rule_type: DiscountRuleType,

    /// Fixed amount or percentage, depending on the rule type
    #[serde(default)]
    pub value: Decimal,
}

/// A discount applied to a cart or order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub id: String,

    #[serde(default)]
    pub code: Option<String>,

    pub rule: DiscountRule,
}

impl Discount {
    pub fn new(id: impl Into<String>, rule_type: DiscountRuleType, value: Decimal) -> Self {
        Self {
            id: id.into(),
            code: None,
            rule: DiscountRule { rule_type, value },
        }
    }

    pub fn free_shipping(id: impl Into<String>) -> Self {
        Self::new(id, DiscountRuleType::FreeShipping, Decimal::ZERO)
    }

    pub fn is_free_shipping(&self) -> bool {
        self.rule.rule_type == DiscountRuleType::FreeShipping
    }
}
