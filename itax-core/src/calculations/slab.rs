//! Stepped-rate tax over an ordered bracket set.

use rust_decimal::Decimal;

use crate::calculations::common::min;
use crate::models::TaxBracket;

/// Calculates tax on `income` by consuming it bracket by bracket from the
/// lowest slab.
///
/// Each bracket contributes `rate × min(remaining, width)`; the unbounded top
/// bracket absorbs whatever remains. Brackets above the income are never
/// visited, and zero or negative income yields zero. The result is not
/// rounded.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::bracket_tax;
/// use itax_core::{AgeBand, FiscalYear, FiscalYearConfig};
///
/// let config = FiscalYearConfig::for_year(FiscalYear::Fy2024_25);
/// let brackets = config.old_brackets(AgeBand::Below60);
///
/// // 5% of 2.5L + 20% of 1L
/// assert_eq!(bracket_tax(dec!(600000), brackets), dec!(32500));
/// ```
pub fn bracket_tax(
    income: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut remaining = income;

    for bracket in brackets {
        if remaining <= Decimal::ZERO {
            break;
        }
        let taxable = match bracket.width() {
            Some(width) => min(remaining, width),
            None => remaining,
        };
        tax += taxable * bracket.rate;
        remaining -= taxable;
    }

    tax
}
