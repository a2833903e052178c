pub mod models;

pub use models::{AllocationMap, Discount, DiscountAllocation, DiscountRuleType};
