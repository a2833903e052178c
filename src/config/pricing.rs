use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

/// Pricing feature switches, resolved once per process
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingConfig {
    /// Treat prices flagged `includes_tax` as tax-inclusive
    pub tax_inclusive_pricing: bool,
}

impl PricingConfig {
    pub fn from_env() -> Result<Self> {
        Ok(PricingConfig {
            tax_inclusive_pricing: parse_flag(
                "TAX_INCLUSIVE_PRICING",
                env::var("TAX_INCLUSIVE_PRICING").ok().as_deref(),
            )?,
        })
    }
}

fn parse_flag(name: &str, value: Option<&str>) -> Result<bool> {
    match value.map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("") => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(AppError::Configuration(format!(
            "Invalid {}: {}",
            name, other
        ))),
    }
}
