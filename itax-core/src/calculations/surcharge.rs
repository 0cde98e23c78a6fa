//! Surcharge with marginal relief.
//!
//! Surcharge is levied on tax, not income, once total income crosses a tier
//! threshold. Marginal relief caps the extra liability so that crossing a
//! threshold by `x` rupees never costs more than `x` rupees over the tax
//! payable exactly at the threshold.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{max, min, round_rupee};
use crate::calculations::slab::bracket_tax;
use crate::models::RegimeRules;
use crate::models::surcharge::applicable_tier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeOutcome {
    /// Tier rate that applied (0 below the first threshold).
    pub rate: Decimal,
    /// Surcharge payable after relief, whole rupees.
    pub surcharge: Decimal,
    /// Relief granted against the naive surcharge, whole rupees.
    pub marginal_relief: Decimal,
}

impl SurchargeOutcome {
    fn none() -> Self {
        Self {
            rate: Decimal::ZERO,
            surcharge: Decimal::ZERO,
            marginal_relief: Decimal::ZERO,
        }
    }
}

/// Resolves surcharge and marginal relief for one regime.
///
/// * `income` - taxable income under the regime
/// * `base_tax` - tax after rebate, including flat-rate capital-gains tax
/// * `rules` - the regime descriptor; its bracket set prices the tax payable
///   at the threshold and its tier table supplies the rates
///
/// Relief is measured against the nearest threshold below `income` only. The
/// tax payable at that threshold is the slab tax on the threshold plus the
/// surcharge of the tier that applies there (the next lower tier).
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::resolve_surcharge;
/// use itax_core::{AgeBand, FiscalYear, FiscalYearConfig, Regime};
///
/// let rules = FiscalYearConfig::for_year(FiscalYear::Fy2024_25)
///     .rules(Regime::Old, AgeBand::Below60);
///
/// // 60L: slab tax 16.125L, plain 10% surcharge with no relief.
/// let outcome = resolve_surcharge(dec!(6000000), dec!(1612500), &rules);
/// assert_eq!(outcome.surcharge, dec!(161250));
/// assert_eq!(outcome.marginal_relief, dec!(0));
/// ```
pub fn resolve_surcharge(
    income: Decimal,
    base_tax: Decimal,
    rules: &RegimeRules<'_>,
) -> SurchargeOutcome {
    let tiers = rules.surcharge_tiers;
    let Some(index) = applicable_tier(tiers, income) else {
        return SurchargeOutcome::none();
    };

    let rate = tiers[index].rate;
    if rate.is_zero() {
        return SurchargeOutcome::none();
    }

    let naive_surcharge = base_tax * rate;

    // Highest threshold strictly below income; that is the tier just found.
    let threshold = tiers[index].lower_bound;
    let rate_at_threshold = applicable_tier(tiers, threshold)
        .map(|i| tiers[i].rate)
        .unwrap_or(Decimal::ZERO);
    let tax_at_threshold = bracket_tax(threshold, rules.brackets);
    let payable_at_threshold = tax_at_threshold * (Decimal::ONE + rate_at_threshold);

    let ceiling = payable_at_threshold + (income - threshold);
    let excess = max(Decimal::ZERO, base_tax + naive_surcharge - ceiling);
    let relief = min(excess, naive_surcharge);

    if relief > Decimal::ZERO {
        debug!(
            regime = rules.regime.as_str(),
            %income,
            %threshold,
            %naive_surcharge,
            %relief,
            "marginal relief applied"
        );
    }

    SurchargeOutcome {
        rate,
        surcharge: round_rupee(max(Decimal::ZERO, naive_surcharge - relief)),
        marginal_relief: round_rupee(relief),
    }
}
