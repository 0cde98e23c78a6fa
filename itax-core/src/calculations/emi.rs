//! Home-loan EMI and yearly amortization with deduction splits.
//!
//! The schedule is simulated month by month on the unrounded balance and
//! reported per year. Each year also shows how much of the principal repaid
//! is deductible under 80C (up to ₹1,50,000) and how much of the interest
//! under 24(b) (up to ₹2,00,000). Both caps apply to that year alone.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, min, round_rupee};
use crate::models::AMOUNT_CEILING;

/// Longest schedule simulated, in years.
const MAX_SCHEDULE_YEARS: u32 = 30;
/// Annual rates above this percentage are treated as this percentage.
const MAX_ANNUAL_RATE: Decimal = dec!(1000);
const SEC_80C_PRINCIPAL_CAP: Decimal = dec!(150000);
const SEC_24B_INTEREST_CAP: Decimal = dec!(200000);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmiYear {
    /// 1-based loan year.
    pub year: u32,
    pub interest: Decimal,
    pub principal: Decimal,
    /// Outstanding principal at the end of the year.
    pub balance: Decimal,
    pub sec80c: Decimal,
    pub sec24b: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmiSchedule {
    pub emi: Decimal,
    pub total_interest: Decimal,
    pub total_payment: Decimal,
    pub years: Vec<EmiYear>,
}

/// Builds the amortization schedule for a loan.
///
/// `annual_rate` is a percentage (`8.5` for 8.5%). Any input that is zero or
/// negative yields an empty schedule with a zero EMI. The principal is clamped
/// to [`AMOUNT_CEILING`] and the rate to 1000%.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::calc_emi_schedule;
///
/// let schedule = calc_emi_schedule(dec!(1000000), dec!(12), 1);
///
/// assert_eq!(schedule.emi, dec!(88849));
/// assert_eq!(schedule.years.len(), 1);
/// assert_eq!(schedule.years[0].balance, dec!(0));
/// ```
pub fn calc_emi_schedule(
    principal: Decimal,
    annual_rate: Decimal,
    years: u32,
) -> EmiSchedule {
    if principal <= Decimal::ZERO || annual_rate <= Decimal::ZERO || years == 0 {
        return EmiSchedule::default();
    }

    let principal = min(principal, AMOUNT_CEILING);
    let monthly_rate = min(annual_rate, MAX_ANNUAL_RATE) / dec!(12) / Decimal::ONE_HUNDRED;
    let emi = round_rupee(monthly_emi(principal, monthly_rate, i64::from(years) * 12));

    let mut balance = principal;
    let mut schedule = Vec::new();
    let mut total_interest = Decimal::ZERO;
    let mut total_payment = Decimal::ZERO;

    for year in 1..=years.min(MAX_SCHEDULE_YEARS) {
        let mut year_interest = Decimal::ZERO;
        let mut year_principal = Decimal::ZERO;

        for _ in 0..12 {
            if balance <= Decimal::ZERO {
                break;
            }
            let interest = balance * monthly_rate;
            let repaid = min(max(Decimal::ZERO, emi - interest), balance);
            balance -= repaid;
            year_interest += interest;
            year_principal += repaid;
        }

        total_interest += year_interest;
        total_payment += year_interest + year_principal;
        schedule.push(EmiYear {
            year,
            interest: round_rupee(year_interest),
            principal: round_rupee(year_principal),
            balance: round_rupee(balance),
            sec80c: round_rupee(min(year_principal, SEC_80C_PRINCIPAL_CAP)),
            sec24b: round_rupee(min(year_interest, SEC_24B_INTEREST_CAP)),
        });

        if balance <= Decimal::ZERO {
            break;
        }
    }

    EmiSchedule {
        emi,
        total_interest: round_rupee(total_interest),
        total_payment: round_rupee(total_payment),
        years: schedule,
    }
}

/// `P·r·(1+r)^n / ((1+r)^n − 1)`, unrounded.
///
/// When `(1+r)^n`, or the EMI built from it, does not fit in a `Decimal` the
/// ratio has converged to 1 and the EMI is the interest-only limit `P·r`.
fn monthly_emi(
    principal: Decimal,
    monthly_rate: Decimal,
    months: i64,
) -> Decimal {
    let interest_only = principal * monthly_rate;
    match (Decimal::ONE + monthly_rate).checked_powi(months) {
        Some(growth) if growth > Decimal::ONE => interest_only
            .checked_mul(growth)
            .and_then(|scaled| scaled.checked_div(growth - Decimal::ONE))
            .unwrap_or(interest_only),
        Some(_) => principal / Decimal::from(months),
        None => interest_only,
    }
}
