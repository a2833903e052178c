pub mod models;
pub mod services;

pub use models::{GiftCard, GiftCardTotals, GiftCardTransaction, Taxability};
pub use services::{GiftCardCalculator, GiftCardTotalsOptions};
