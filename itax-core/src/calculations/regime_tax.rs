//! Tax liability under a single regime.
//!
//! One calculator serves both regimes; everything that differs between them
//! comes from the [`RegimeRules`] descriptor it is built with.
//!
//! # Computation
//!
//! | Step | Description |
//! |------|-------------|
//! | 1 | Net salary: gross salary − HRA exemption (when deductions apply) − standard deduction |
//! | 2 | Gross total income: net salary + house property + business (or presumptive) + STCG + taxable LTCG + interest + other sources |
//! | 3 | Chapter VI-A deductions (when deductions apply) |
//! | 4 | Taxable income: GTI − deductions, minimum 0 |
//! | 5 | Slab tax, less the 87A rebate when taxable income is within the threshold |
//! | 6 | Base tax: step 5 + 15% of STCG + 10% of taxable LTCG |
//! | 7 | Surcharge with marginal relief on the base tax |
//! | 8 | Cess: 4% of base tax + surcharge |
//! | 9 | Final tax: base tax + surcharge + cess |
//!
//! Net salary and GTI are not floored, so a house-property loss can push
//! them below zero; only taxable income is clamped.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use itax_core::calculations::compute_regime;
//! use itax_core::{AgeBand, FiscalYear, FiscalYearConfig, Regime, TaxProfile};
//!
//! let profile = TaxProfile {
//!     basic_salary: dec!(600000),
//!     hra_received: dec!(240000),
//!     rent_paid: dec!(180000),
//!     sec80c: dec!(150000),
//!     ..Default::default()
//! };
//! let config = FiscalYearConfig::for_year(FiscalYear::Fy2024_25);
//!
//! let old = compute_regime(&profile, &config.rules(Regime::Old, AgeBand::Below60), config);
//!
//! assert_eq!(old.gross_total_income, dec!(670000));
//! assert_eq!(old.taxable_income, dec!(520000));
//! assert_eq!(old.final_tax, dec!(17160));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::{max, min, round_half_up, round_rupee};
use crate::calculations::income::{
    business_income, chapter_via_deductions, house_property_income, profile_hra_exemption,
    taxable_ltcg,
};
use crate::calculations::slab::bracket_tax;
use crate::calculations::surcharge::resolve_surcharge;
use crate::models::{FiscalYearConfig, RegimeRules, RegimeTax, TaxProfile};

/// Flat STCG rate applied alongside slab tax.
const STCG_RATE: Decimal = dec!(0.15);
/// Flat LTCG rate on gains above the exemption limit.
const LTCG_RATE: Decimal = dec!(0.10);
const CESS_RATE: Decimal = dec!(0.04);

/// Calculator for one regime of one fiscal year.
#[derive(Debug, Clone, Copy)]
pub struct RegimeCalculator<'a> {
    rules: RegimeRules<'a>,
    config: &'a FiscalYearConfig,
}

impl<'a> RegimeCalculator<'a> {
    pub fn new(
        rules: RegimeRules<'a>,
        config: &'a FiscalYearConfig,
    ) -> Self {
        Self { rules, config }
    }

    /// Runs the full computation for `profile`.
    ///
    /// Amounts above [`AMOUNT_CEILING`](crate::models::AMOUNT_CEILING) are
    /// clamped; anything else is used as given, so callers accepting raw
    /// input should normalise it first.
    pub fn calculate(
        &self,
        profile: &TaxProfile,
    ) -> RegimeTax {
        let profile = &profile.capped();
        let gross_total_income = self.gross_total_income(profile);
        let deductions = self.deductions(profile);
        let taxable_income = max(Decimal::ZERO, gross_total_income - deductions);

        let slab_tax = bracket_tax(taxable_income, self.rules.brackets);
        let rebate = self.rebate(taxable_income, slab_tax);
        let capital_gains_tax = self.capital_gains_tax(profile);
        let base_tax = slab_tax - rebate + capital_gains_tax;

        let surcharge = resolve_surcharge(taxable_income, base_tax, &self.rules);
        let cess = round_rupee(CESS_RATE * (base_tax + surcharge.surcharge));
        let final_tax = round_rupee(base_tax + surcharge.surcharge + cess);

        RegimeTax {
            regime: self.rules.regime,
            gross_total_income: round_rupee(gross_total_income),
            standard_deduction: self.rules.standard_deduction,
            deductions: round_rupee(deductions),
            taxable_income: round_rupee(taxable_income),
            slab_tax: round_rupee(slab_tax),
            rebate: round_rupee(rebate),
            capital_gains_tax: round_rupee(capital_gains_tax),
            base_tax: round_rupee(base_tax),
            surcharge: surcharge.surcharge,
            marginal_relief: surcharge.marginal_relief,
            cess,
            final_tax,
            effective_rate: self.effective_rate(final_tax, taxable_income),
        }
    }

    /// Salary after exemptions and standard deduction. Not floored.
    fn net_salary(
        &self,
        profile: &TaxProfile,
    ) -> Decimal {
        let exemption = if self.rules.allows_deductions {
            profile_hra_exemption(profile)
        } else {
            Decimal::ZERO
        };
        profile.gross_salary() - exemption - self.rules.standard_deduction
    }

    fn gross_total_income(
        &self,
        profile: &TaxProfile,
    ) -> Decimal {
        self.net_salary(profile)
            + house_property_income(profile)
            + business_income(profile)
            + profile.stcg
            + taxable_ltcg(profile, self.config)
            + profile.interest_income
            + profile.other_sources
    }

    fn deductions(
        &self,
        profile: &TaxProfile,
    ) -> Decimal {
        if self.rules.allows_deductions {
            chapter_via_deductions(profile)
        } else {
            Decimal::ZERO
        }
    }

    /// 87A rebate; never larger than the slab tax itself.
    fn rebate(
        &self,
        taxable_income: Decimal,
        slab_tax: Decimal,
    ) -> Decimal {
        if taxable_income <= self.rules.rebate.threshold {
            min(slab_tax, self.rules.rebate.amount)
        } else {
            Decimal::ZERO
        }
    }

    fn capital_gains_tax(
        &self,
        profile: &TaxProfile,
    ) -> Decimal {
        STCG_RATE * profile.stcg + LTCG_RATE * taxable_ltcg(profile, self.config)
    }

    /// Final tax as a percentage of taxable income, two decimals.
    fn effective_rate(
        &self,
        final_tax: Decimal,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        round_half_up(final_tax / taxable_income * Decimal::ONE_HUNDRED)
    }
}

/// Computes one regime's liability for `profile`.
pub fn compute_regime(
    profile: &TaxProfile,
    rules: &RegimeRules<'_>,
    config: &FiscalYearConfig,
) -> RegimeTax {
    RegimeCalculator::new(*rules, config).calculate(profile)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{AgeBand, CityType, FiscalYear, Regime};

    fn run(
        profile: &TaxProfile,
        regime: Regime,
    ) -> RegimeTax {
        let config = FiscalYearConfig::for_year(profile.fiscal_year);
        compute_regime(profile, &config.rules(regime, profile.age), config)
    }

    fn salaried(basic: Decimal) -> TaxProfile {
        TaxProfile {
            basic_salary: basic,
            ..Default::default()
        }
    }

    // =========================================================================
    // Salary and HRA
    // =========================================================================

    #[test]
    fn old_regime_applies_hra_exemption_and_deductions() {
        let profile = TaxProfile {
            basic_salary: dec!(600000),
            hra_received: dec!(240000),
            rent_paid: dec!(180000),
            city: CityType::Metro,
            sec80c: dec!(150000),
            ..Default::default()
        };

        let old = run(&profile, Regime::Old);

        // 840000 − 120000 HRA − 50000 standard
        assert_eq!(old.gross_total_income, dec!(670000));
        assert_eq!(old.deductions, dec!(150000));
        assert_eq!(old.taxable_income, dec!(520000));
        // 12500 + 20% × 20000
        assert_eq!(old.slab_tax, dec!(16500));
        assert_eq!(old.rebate, dec!(0));
        assert_eq!(old.cess, dec!(660));
        assert_eq!(old.final_tax, dec!(17160));
        assert_eq!(old.effective_rate, dec!(3.30));
    }

    #[test]
    fn new_regime_ignores_hra_and_deductions() {
        let profile = TaxProfile {
            basic_salary: dec!(600000),
            hra_received: dec!(240000),
            rent_paid: dec!(180000),
            sec80c: dec!(150000),
            ..Default::default()
        };

        let new = run(&profile, Regime::New);

        // 840000 − 50000 standard, no HRA exemption
        assert_eq!(new.gross_total_income, dec!(790000));
        assert_eq!(new.standard_deduction, dec!(50000));
        assert_eq!(new.deductions, dec!(0));
        assert_eq!(new.taxable_income, dec!(790000));
        // 5% × 4L + 10% × 90000
        assert_eq!(new.slab_tax, dec!(29000));
        assert_eq!(new.cess, dec!(1160));
        assert_eq!(new.final_tax, dec!(30160));
        assert_eq!(new.effective_rate, dec!(3.82));
    }

    // =========================================================================
    // Rebate
    // =========================================================================

    #[test]
    fn new_regime_2025_26_rebate_zeroes_tax_at_threshold() {
        let profile = TaxProfile {
            fiscal_year: FiscalYear::Fy2025_26,
            ..salaried(dec!(1250000))
        };

        let new = run(&profile, Regime::New);

        assert_eq!(new.taxable_income, dec!(1200000));
        assert_eq!(new.slab_tax, dec!(60000));
        assert_eq!(new.rebate, dec!(60000));
        assert_eq!(new.final_tax, dec!(0));
        assert_eq!(new.effective_rate, dec!(0));
    }

    #[test]
    fn new_regime_2025_26_rebate_lost_one_rupee_over_threshold() {
        let profile = TaxProfile {
            fiscal_year: FiscalYear::Fy2025_26,
            ..salaried(dec!(1250001))
        };

        let new = run(&profile, Regime::New);

        assert_eq!(new.taxable_income, dec!(1200001));
        assert_eq!(new.rebate, dec!(0));
        assert_eq!(new.cess, dec!(2400));
        assert_eq!(new.final_tax, dec!(62400));
    }

    #[test]
    fn old_regime_rebate_is_capped_by_slab_tax() {
        let old = run(&salaried(dec!(400000)), Regime::Old);

        // 350000 taxable: slab tax 5000 < 12500 cap
        assert_eq!(old.slab_tax, dec!(5000));
        assert_eq!(old.rebate, dec!(5000));
        assert_eq!(old.final_tax, dec!(0));
    }

    #[test]
    fn old_regime_rebate_stops_one_rupee_over_threshold() {
        let at = run(&salaried(dec!(550000)), Regime::Old);
        let over = run(&salaried(dec!(550001)), Regime::Old);

        assert_eq!(at.taxable_income, dec!(500000));
        assert_eq!(at.slab_tax, dec!(12500));
        assert_eq!(at.rebate, dec!(12500));
        assert_eq!(at.final_tax, dec!(0));

        assert_eq!(over.taxable_income, dec!(500001));
        assert_eq!(over.rebate, dec!(0));
        // 12500.20 + 500 cess
        assert_eq!(over.final_tax, dec!(13000));
    }

    #[test]
    fn senior_slabs_apply_only_to_old_regime() {
        let profile = TaxProfile {
            age: AgeBand::Above80,
            ..salaried(dec!(1050000))
        };

        let old = run(&profile, Regime::Old);

        // 10L taxable: 20% × 5L, no nil-rate 5% band
        assert_eq!(old.slab_tax, dec!(100000));
        assert_eq!(old.final_tax, dec!(104000));
    }

    // =========================================================================
    // Other income heads
    // =========================================================================

    #[test]
    fn house_property_loss_reduces_gross_total_income_below_zero() {
        let profile = TaxProfile {
            basic_salary: dec!(100000),
            home_loan_interest: dec!(250000),
            ..Default::default()
        };

        let old = run(&profile, Regime::Old);

        // 100000 − 50000 − 200000
        assert_eq!(old.gross_total_income, dec!(-150000));
        assert_eq!(old.taxable_income, dec!(0));
        assert_eq!(old.final_tax, dec!(0));
    }

    #[test]
    fn capital_gains_taxed_at_flat_rates_on_top_of_slabs() {
        let profile = TaxProfile {
            stcg: dec!(100000),
            ltcg: dec!(300000),
            ..salaried(dec!(1050000))
        };

        let old = run(&profile, Regime::Old);

        // GTI 1000000 + 100000 + 200000; CG tax 15000 + 20000
        assert_eq!(old.gross_total_income, dec!(1300000));
        assert_eq!(old.capital_gains_tax, dec!(35000));
        assert_eq!(old.slab_tax, dec!(202500));
        assert_eq!(old.base_tax, dec!(237500));
        assert_eq!(old.final_tax, dec!(247000));
    }

    #[test]
    fn presumptive_income_replaces_business_income() {
        let profile = TaxProfile {
            business_income: dec!(5000000),
            presumptive: true,
            presumptive_professional: true,
            gross_receipts: dec!(2000000),
            ..Default::default()
        };

        let new = run(&profile, Regime::New);

        // 10L deemed income, minus 50000 standard deduction
        assert_eq!(new.gross_total_income, dec!(950000));
    }

    // =========================================================================
    // Surcharge and cess
    // =========================================================================

    #[test]
    fn surcharge_and_cess_stack_above_fifty_lakh() {
        let old = run(&salaried(dec!(6050000)), Regime::Old);

        assert_eq!(old.taxable_income, dec!(6000000));
        assert_eq!(old.base_tax, dec!(1612500));
        assert_eq!(old.surcharge, dec!(161250));
        assert_eq!(old.marginal_relief, dec!(0));
        // 4% × 1773750
        assert_eq!(old.cess, dec!(70950));
        assert_eq!(old.final_tax, dec!(1844700));
    }

    #[test]
    fn marginal_relief_just_above_fifty_lakh() {
        let old = run(&salaried(dec!(5050001)), Regime::Old);

        assert_eq!(old.taxable_income, dec!(5000001));
        assert_eq!(old.surcharge, dec!(1));
        assert_eq!(old.marginal_relief, dec!(131249));
    }

    #[test]
    fn amounts_beyond_ceiling_are_clamped() {
        let profile = TaxProfile {
            other_sources: Decimal::MAX,
            ..salaried(Decimal::MAX)
        };

        let old = run(&profile, Regime::Old);
        let new = run(&profile, Regime::New);

        // Two fields at 10^15 each, less the standard deduction
        assert_eq!(old.gross_total_income, dec!(1999999999950000));
        assert_eq!(new.gross_total_income, old.gross_total_income);
        assert!(old.surcharge > Decimal::ZERO);
        assert!(new.final_tax > new.base_tax);
    }

    #[test]
    fn identical_profiles_give_identical_results() {
        let profile = TaxProfile {
            interest_income: dec!(42000),
            rental_income: dec!(180000),
            sec80d: dec!(25000),
            ..salaried(dec!(1800000))
        };

        assert_eq!(run(&profile, Regime::Old), run(&profile.clone(), Regime::Old));
        assert_eq!(run(&profile, Regime::New), run(&profile.clone(), Regime::New));
    }
}
