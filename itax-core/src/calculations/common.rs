//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used across the regime, capital
//! gains and amortization calculators, including rupee rounding and Indian
//! digit grouping for display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a value to whole rupees, with halves rounded towards positive
/// infinity.
///
/// This is `floor(value + 0.5)`, so `2.5` becomes `3` and `-2.5` becomes `-2`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::round_rupee;
///
/// assert_eq!(round_rupee(dec!(123.4)), dec!(123));
/// assert_eq!(round_rupee(dec!(123.5)), dec!(124));
/// assert_eq!(round_rupee(dec!(-123.5)), dec!(-123));
/// assert_eq!(round_rupee(dec!(-123.6)), dec!(-124));
/// ```
pub fn round_rupee(value: Decimal) -> Decimal {
    (value + Decimal::new(5, 1)).floor()
}

/// Rounds a value to exactly two decimal places using half-up rounding.
///
/// Used for percentages such as effective tax rates.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(12.344)), dec!(12.34));
/// assert_eq!(round_half_up(dec!(12.345)), dec!(12.35));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100), dec!(200)), dec!(200));
/// assert_eq!(max(dec!(-100), dec!(-200)), dec!(-100));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the minimum of two decimal values.
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}

/// Formats an amount in whole rupees using Indian digit grouping
/// (thousands, then lakhs and crores in groups of two).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::format_inr;
///
/// assert_eq!(format_inr(dec!(150000)), "1,50,000");
/// assert_eq!(format_inr(dec!(12345678.4)), "1,23,45,678");
/// assert_eq!(format_inr(dec!(-2500)), "-2,500");
/// ```
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_rupee(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}
