pub mod gift_card;

pub use gift_card::{GiftCard, GiftCardTotals, GiftCardTransaction, Taxability};
