// A line item is a single product entry in a cart or order. The totals
// service reads it and never mutates it; all amounts are minor units.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};
use crate::modules::taxes::models::TaxLine;

/// Discount adjustment recorded against a line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemAdjustment {
    #[serde(default)]
    pub discount_id: Option<String>,
    pub amount: Decimal,
}

/// Represents a single line item in a cart or order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier for the line item
    pub id: String,

    /// Product or variant title
    #[serde(default)]
    pub title: Option<String>,

    /// Price per unit
    pub unit_price: Decimal,

    /// Quantity of items
    pub quantity: i32,

    /// Whether `unit_price` already contains tax
    #[serde(default)]
    pub includes_tax: bool,

    /// Tax lines joined on the item.
    ///
    /// `None` means the lines were never loaded, which is different from an
    /// empty list of lines.
    #[serde(default)]
    pub tax_lines: Option<Vec<TaxLine>>,

    /// Discount adjustments used to build the allocation map
    #[serde(default)]
    pub adjustments: Vec<LineItemAdjustment>,
}

impl LineItem {
    pub fn new(id: impl Into<String>, unit_price: Decimal, quantity: i32) -> Self {
        Self {
            id: id.into(),
            title: None,
            unit_price,
            quantity,
            includes_tax: false,
            tax_lines: None,
            adjustments: Vec::new(),
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

    /// `unit_price * quantity`
    pub fn gross_amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// Validate line item data
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::validation("Line item id cannot be empty"));
        }

        if self.quantity <= 0 {
            return Err(AppError::validation(format!(
                "Quantity must be positive, got: {} (item {})",
                self.quantity, self.id
            )));
        }

        if self.unit_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Unit price must be non-negative, got: {} (item {})",
                self.unit_price, self.id
            )));
        }

        Ok(())
    }
}
