//! Income heads and Chapter VI-A deductions shared by both regimes.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::{max, min, round_rupee};
use crate::calculations::hra::hra_exemption;
use crate::models::{FiscalYearConfig, TaxProfile};

/// Share of net annual value left after the 30% standard deduction on rent.
const HOUSE_PROPERTY_NAV_SHARE: Decimal = dec!(0.7);
/// Loss cap on a self-occupied property.
const SELF_OCCUPIED_LOSS_CAP: Decimal = dec!(200000);

const PRESUMPTIVE_PROFESSIONAL_RATE: Decimal = dec!(0.50);
const PRESUMPTIVE_DIGITAL_RATE: Decimal = dec!(0.06);
const PRESUMPTIVE_CASH_RATE: Decimal = dec!(0.08);

const SEC_80C_CAP: Decimal = dec!(150000);
const SEC_80CCD1B_CAP: Decimal = dec!(50000);

/// HRA exemption for the profile, unrounded.
pub fn profile_hra_exemption(profile: &TaxProfile) -> Decimal {
    hra_exemption(
        profile.basic_salary,
        profile.hra_received,
        profile.rent_paid,
        profile.city.is_metro(),
    )
}

/// Income from house property; negative when it is a loss.
///
/// Let-out: 70% of (rent − property tax) less home-loan interest.
/// Self-occupied (no rent but interest paid): the interest as a loss,
/// capped at ₹2,00,000.
pub fn house_property_income(profile: &TaxProfile) -> Decimal {
    if profile.rental_income.is_zero() && profile.home_loan_interest > Decimal::ZERO {
        return max(-SELF_OCCUPIED_LOSS_CAP, -profile.home_loan_interest);
    }
    let net_annual_value = profile.rental_income - profile.property_tax;
    HOUSE_PROPERTY_NAV_SHARE * net_annual_value - profile.home_loan_interest
}

/// Deemed income under 44ADA (professional) or 44AD (business), or `None`
/// when presumptive taxation is off.
pub fn presumptive_income(profile: &TaxProfile) -> Option<Decimal> {
    if !profile.presumptive {
        return None;
    }
    let income = if profile.presumptive_professional {
        round_rupee(PRESUMPTIVE_PROFESSIONAL_RATE * profile.gross_receipts)
    } else {
        round_rupee(PRESUMPTIVE_DIGITAL_RATE * profile.digital_receipts)
            + round_rupee(PRESUMPTIVE_CASH_RATE * profile.cash_receipts)
    };
    Some(income)
}

/// Business income as it enters gross total income.
pub fn business_income(profile: &TaxProfile) -> Decimal {
    presumptive_income(profile).unwrap_or(profile.business_income)
}

/// LTCG above the year's exemption limit.
pub fn taxable_ltcg(
    profile: &TaxProfile,
    config: &FiscalYearConfig,
) -> Decimal {
    max(Decimal::ZERO, profile.ltcg - config.ltcg_exemption)
}

/// Chapter VI-A total: 80C and 80CCD(1B) are capped, the rest pass through.
pub fn chapter_via_deductions(profile: &TaxProfile) -> Decimal {
    min(profile.sec80c, SEC_80C_CAP)
        + min(profile.sec80ccd1b, SEC_80CCD1B_CAP)
        + profile.sec80d
        + profile.sec80e
        + profile.sec80g
        + profile.sec80tta
}
