pub mod allocation;
pub mod discount;

pub use allocation::{AllocationMap, DiscountAllocation, LineAllocation};
pub use discount::{Discount, DiscountRule, DiscountRuleType};
