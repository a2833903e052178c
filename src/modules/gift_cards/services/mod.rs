pub mod gift_card_calculator;

pub use gift_card_calculator::{GiftCardCalculator, GiftCardTotalsOptions};
