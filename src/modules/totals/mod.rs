pub mod models;
pub mod services;

pub use models::{
    CalculationContext, CartTotals, LineItem, LineItemTotals, Region, ShippingMethod,
    ShippingMethodTotals, TaxMode, TotalsOptions,
};
pub use services::{CartPricingInput, TotalsService};
