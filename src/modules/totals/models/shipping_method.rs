use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};
use crate::modules::taxes::models::TaxLine;

/// Shipping method selected on a cart or order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub id: String,

    pub price: Decimal,

    /// Whether `price` already contains tax
    #[serde(default)]
    pub includes_tax: bool,

    #[serde(default)]
    pub tax_lines: Option<Vec<TaxLine>>,
}

impl ShippingMethod {
    pub fn new(id: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            price,
            includes_tax: false,
            tax_lines: None,
        }
    }

    pub fn including_tax(mut self) -> Self {
        self.includes_tax = true;
        self
    }

    pub fn with_tax_lines(mut self, tax_lines: Vec<TaxLine>) -> Self {
        self.tax_lines = Some(tax_lines);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Shipping price must be non-negative, got: {} (method {})",
                self.price, self.id
            )));
        }

        Ok(())
    }
}
