//! Old vs new regime comparison.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::round_rupee;
use crate::calculations::income::{
    chapter_via_deductions, house_property_income, presumptive_income, profile_hra_exemption,
    taxable_ltcg,
};
use crate::calculations::regime_tax::RegimeCalculator;
use crate::models::{FiscalYearConfig, Recommendation, Regime, RegimeTax, TaxProfile, TaxResult};

/// Computes both regimes for `profile` under its fiscal year and recommends
/// the cheaper one.
///
/// `savings` is the absolute difference of the two final taxes. When they are
/// equal the recommendation is [`Recommendation::Equal`].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::compute_tax;
/// use itax_core::{Recommendation, TaxProfile};
///
/// let profile = TaxProfile {
///     basic_salary: dec!(600000),
///     hra_received: dec!(240000),
///     rent_paid: dec!(180000),
///     sec80c: dec!(150000),
///     ..Default::default()
/// };
///
/// let result = compute_tax(&profile);
///
/// assert_eq!(result.hra_exemption, dec!(120000));
/// assert_eq!(result.recommended, Recommendation::Old);
/// assert_eq!(result.savings, dec!(13000));
/// ```
pub fn compute_tax(profile: &TaxProfile) -> TaxResult {
    let profile = &profile.capped();
    let config = FiscalYearConfig::for_year(profile.fiscal_year);

    let old = regime_tax(profile, config, Regime::Old);
    let new = regime_tax(profile, config, Regime::New);

    let recommended = recommend(&old, &new);
    let savings = (old.final_tax - new.final_tax).abs();

    debug!(
        fiscal_year = profile.fiscal_year.as_str(),
        old_tax = %old.final_tax,
        new_tax = %new.final_tax,
        %recommended,
        "compared regimes"
    );

    let ltcg = taxable_ltcg(profile, config);

    TaxResult {
        fiscal_year: profile.fiscal_year,
        gross_total_income: old.gross_total_income,
        total_deductions: round_rupee(chapter_via_deductions(profile)),
        hra_exemption: round_rupee(profile_hra_exemption(profile)),
        house_property_income: round_rupee(house_property_income(profile)),
        presumptive_income: presumptive_income(profile),
        taxable_ltcg: round_rupee(ltcg),
        capital_gains_tax: old.capital_gains_tax,
        old,
        new,
        savings,
        recommended,
    }
}

fn regime_tax(
    profile: &TaxProfile,
    config: &FiscalYearConfig,
    regime: Regime,
) -> RegimeTax {
    RegimeCalculator::new(config.rules(regime, profile.age), config).calculate(profile)
}

fn recommend(
    old: &RegimeTax,
    new: &RegimeTax,
) -> Recommendation {
    match old.final_tax.cmp(&new.final_tax) {
        std::cmp::Ordering::Less => Recommendation::Old,
        std::cmp::Ordering::Greater => Recommendation::New,
        std::cmp::Ordering::Equal => Recommendation::Equal,
    }
}
