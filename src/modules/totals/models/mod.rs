pub mod context;
pub mod line_item;
pub mod request;
pub mod shipping_method;
pub mod totals;

pub use context::{CalculationContext, Region};
pub use line_item::{LineItem, LineItemAdjustment};
pub use request::{PricingRequest, PricingResponse};
pub use shipping_method::ShippingMethod;
pub use totals::{
    CartTotals, LineItemTotals, ShippingMethodTotals, TaxMode, TotalsMap, TotalsOptions,
};
