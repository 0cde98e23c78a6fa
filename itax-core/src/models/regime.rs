use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{SurchargeTier, TaxBracket};

/// The two statutory computation schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Old,
    New,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Old => write!(f, "Old Regime"),
            Self::New => write!(f, "New Regime"),
        }
    }
}

/// Section 87A rebate: tax is reduced by up to `amount` when taxable income
/// does not exceed `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebate {
    pub threshold: Decimal,
    pub amount: Decimal,
}

/// Everything that differs between the two regimes for one fiscal year.
///
/// The regime calculator is written once against this descriptor and is run
/// twice, once per regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegimeRules<'a> {
    pub regime: Regime,
    pub brackets: &'a [TaxBracket],
    pub rebate: Rebate,
    pub standard_deduction: Decimal,
    pub surcharge_tiers: &'a [SurchargeTier],
    /// HRA exemption and Chapter VI-A deductions reduce income.
    pub allows_deductions: bool,
}
