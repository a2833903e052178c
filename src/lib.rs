//! Order pricing engine
//!
//! Computes line item, shipping, gift card and refund totals for carts and
//! orders, with itemized tax lines or a flat legacy tax rate.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::discounts;
pub use modules::gift_cards;
pub use modules::taxes;
pub use modules::totals;
