//! Minor-unit rounding and tax back-calculation helpers.
//!
//! Amounts are carried as `Decimal` values in the smallest currency unit
//! (cents). Intermediate results may be fractional; callers decide when to
//! round.

use rust_decimal::Decimal;

use crate::core::{AppError, Result};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rounds to the nearest whole minor unit, halves going toward positive infinity.
///
/// `2.5 -> 3`, `-2.5 -> -2`.
pub fn round_half_up(amount: Decimal) -> Decimal {
    (amount + Decimal::new(5, 1)).floor()
}

/// Converts a 0-100 percentage into a fraction
pub fn rate_fraction(percent: Decimal) -> Decimal {
    percent / ONE_HUNDRED
}

/// Checks a tax rate percentage: 0 to 100 with at most 4 decimal places
pub fn validate_tax_rate(tax_rate: Decimal) -> Result<()> {
    if tax_rate < Decimal::ZERO {
        return Err(AppError::validation("Tax rate cannot be negative"));
    }

    if tax_rate > ONE_HUNDRED {
        return Err(AppError::validation("Tax rate cannot exceed 100"));
    }

    if tax_rate.normalize().scale() > 4 {
        return Err(AppError::validation(
            "Tax rate cannot have more than 4 decimal places",
        ));
    }

    Ok(())
}

/// Tax amount carried by a price.
///
/// `tax_rate` is a fraction (0.10 for 10%). When `includes_tax` is set the
/// price already contains the tax and the embedded portion is backed out;
/// otherwise the tax is computed on top of the price.
pub fn calculate_price_tax_amount(price: Decimal, tax_rate: Decimal, includes_tax: bool) -> Decimal {
    if includes_tax {
        round_half_up((tax_rate * price) / (Decimal::ONE + tax_rate))
    } else {
        round_half_up(price * tax_rate)
    }
}
