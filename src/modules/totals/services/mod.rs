pub mod line_item_totals;
pub mod refund;
pub mod shipping_totals;
pub mod totals_service;

pub use totals_service::{CartPricingInput, TotalsService};
