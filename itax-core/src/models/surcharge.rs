use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One surcharge tier: income strictly above `lower_bound` attracts
/// `rate` on the tax (not on the income).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeTier {
    pub lower_bound: Decimal,
    pub rate: Decimal,
}

const fn tier(
    lower_bound: Decimal,
    rate: Decimal,
) -> SurchargeTier {
    SurchargeTier { lower_bound, rate }
}

/// Old regime: 10% above 50L, 15% above 1Cr, 25% above 2Cr, 37% above 5Cr.
pub static OLD_REGIME_SURCHARGE: [SurchargeTier; 5] = [
    tier(dec!(0), dec!(0)),
    tier(dec!(5000000), dec!(0.10)),
    tier(dec!(10000000), dec!(0.15)),
    tier(dec!(20000000), dec!(0.25)),
    tier(dec!(50000000), dec!(0.37)),
];

/// New regime: same as old up to 2Cr, capped at 25%.
pub static NEW_REGIME_SURCHARGE: [SurchargeTier; 4] = [
    tier(dec!(0), dec!(0)),
    tier(dec!(5000000), dec!(0.10)),
    tier(dec!(10000000), dec!(0.15)),
    tier(dec!(20000000), dec!(0.25)),
];

/// Index of the highest tier whose lower bound is strictly below `income`.
///
/// Returns `None` for an empty table or when no tier qualifies (income at or
/// below zero).
pub fn applicable_tier(
    tiers: &[SurchargeTier],
    income: Decimal,
) -> Option<usize> {
    tiers.iter().rposition(|t| t.lower_bound < income)
}
