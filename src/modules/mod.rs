pub mod discounts;
pub mod gift_cards;
pub mod taxes;
pub mod totals;
