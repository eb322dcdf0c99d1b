//! Membership price tiers.

use crate::age::AgeGroup;

/// Default monthly price for adults.
pub const DEFAULT_BASE_PRICE: u32 = 5000;

/// Fraction of the base price charged to teenagers.
pub const TEENAGER_PRICE_FACTOR: f64 = 0.75;

/// Price for a member of the given age.
///
/// Teenagers pay 75% of the base price. The discounted amount is truncated
/// toward zero, never rounded.
#[must_use]
pub fn compute_price(age: i32, base_price: u32) -> u32 {
    match AgeGroup::for_age(age) {
        AgeGroup::Adult => base_price,
        AgeGroup::Teenager => (f64::from(base_price) * TEENAGER_PRICE_FACTOR) as u32,
    }
}
