//! House Rent Allowance exemption (section 10(13A)).
//!
//! The exempt portion is the least of three amounts:
//!
//! | Component | Amount |
//! |-----------|--------|
//! | 1 | Actual HRA received |
//! | 2 | Rent paid minus 10% of basic salary |
//! | 3 | 50% of basic (metro) or 40% of basic (non-metro) |
//!
//! floored at zero. Whatever is not exempt is taxable as salary.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, min, round_rupee};

const RENT_OFFSET_RATE: Decimal = dec!(0.10);
const METRO_RATE: Decimal = dec!(0.50);
const NON_METRO_RATE: Decimal = dec!(0.40);

/// One of the three amounts the exemption is the minimum of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HraComponent {
    pub label: String,
    /// May be negative when rent is below 10% of basic.
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HraBreakdown {
    pub components: Vec<HraComponent>,
    pub exemption: Decimal,
    pub taxable: Decimal,
}

/// Exempt HRA, unrounded. Shared with the regime calculator.
pub fn hra_exemption(
    basic: Decimal,
    hra: Decimal,
    rent: Decimal,
    is_metro: bool,
) -> Decimal {
    let [actual, rent_excess, basic_share] = components(basic, hra, rent, is_metro);
    max(Decimal::ZERO, min(actual, min(rent_excess, basic_share)))
}

/// Labelled HRA breakdown, amounts rounded to whole rupees.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::calc_hra;
///
/// let hra = calc_hra(dec!(600000), dec!(240000), dec!(180000), true);
///
/// assert_eq!(hra.exemption, dec!(120000));
/// assert_eq!(hra.taxable, dec!(120000));
/// ```
pub fn calc_hra(
    basic: Decimal,
    hra: Decimal,
    rent: Decimal,
    is_metro: bool,
) -> HraBreakdown {
    let amounts = components(basic, hra, rent, is_metro);
    let exemption = round_rupee(hra_exemption(basic, hra, rent, is_metro));
    let basic_label = if is_metro {
        "50% of basic (metro)"
    } else {
        "40% of basic (non-metro)"
    };

    let components = ["Actual HRA received", "Rent paid minus 10% of basic", basic_label]
        .into_iter()
        .zip(amounts)
        .map(|(label, amount)| HraComponent {
            label: label.to_string(),
            amount: round_rupee(amount),
        })
        .collect();

    HraBreakdown {
        components,
        exemption,
        taxable: round_rupee(hra) - exemption,
    }
}

fn components(
    basic: Decimal,
    hra: Decimal,
    rent: Decimal,
    is_metro: bool,
) -> [Decimal; 3] {
    let rate = if is_metro { METRO_RATE } else { NON_METRO_RATE };
    [hra, rent - RENT_OFFSET_RATE * basic, rate * basic]
}
