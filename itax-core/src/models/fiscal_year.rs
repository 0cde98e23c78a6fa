//! Static law tables, one record per fiscal year.
//!
//! Supporting another year means adding a [`FiscalYear`] variant and a
//! [`FiscalYearConfig`] record; the calculators never branch on the year.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::surcharge::{NEW_REGIME_SURCHARGE, OLD_REGIME_SURCHARGE};
use super::{AgeBand, Rebate, Regime, RegimeRules, TaxBracket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum FiscalYear {
    #[default]
    #[serde(rename = "2024-25")]
    Fy2024_25,
    #[serde(rename = "2025-26")]
    Fy2025_26,
}

impl FiscalYear {
    pub const ALL: [FiscalYear; 2] = [FiscalYear::Fy2024_25, FiscalYear::Fy2025_26];

    /// Label in `YYYY-YY` form, as used by the cost inflation index table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fy2024_25 => "2024-25",
            Self::Fy2025_26 => "2025-26",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|fy| fy.as_str() == s.trim())
    }

    /// Assessment year label (the fiscal year that follows).
    pub fn assessment_year(&self) -> &'static str {
        match self {
            Self::Fy2024_25 => "2025-26",
            Self::Fy2025_26 => "2026-27",
        }
    }

    /// Calendar year in which the fiscal year ends (31 March).
    pub fn end_year(&self) -> i32 {
        match self {
            Self::Fy2024_25 => 2025,
            Self::Fy2025_26 => 2026,
        }
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "FY {}", self.as_str())
    }
}

/// Immutable law table for one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FiscalYearConfig {
    pub year: FiscalYear,
    pub old_brackets_below_60: &'static [TaxBracket],
    pub old_brackets_60_to_80: &'static [TaxBracket],
    pub old_brackets_above_80: &'static [TaxBracket],
    pub new_brackets: &'static [TaxBracket],
    /// Salary standard deduction, the same amount under both regimes.
    pub standard_deduction: Decimal,
    pub old_rebate: Rebate,
    pub new_rebate: Rebate,
    /// Long-term capital gains exempt from tax each year (section 112A).
    pub ltcg_exemption: Decimal,
}

impl FiscalYearConfig {
    pub fn for_year(year: FiscalYear) -> &'static FiscalYearConfig {
        match year {
            FiscalYear::Fy2024_25 => &FY_2024_25,
            FiscalYear::Fy2025_26 => &FY_2025_26,
        }
    }

    pub fn old_brackets(
        &self,
        age: AgeBand,
    ) -> &'static [TaxBracket] {
        match age {
            AgeBand::Below60 => self.old_brackets_below_60,
            AgeBand::SixtyToEighty => self.old_brackets_60_to_80,
            AgeBand::Above80 => self.old_brackets_above_80,
        }
    }

    /// Builds the regime descriptor for `regime`, selecting the old-regime
    /// slab set by `age`.
    pub fn rules(
        &self,
        regime: Regime,
        age: AgeBand,
    ) -> RegimeRules<'static> {
        match regime {
            Regime::Old => RegimeRules {
                regime,
                brackets: self.old_brackets(age),
                rebate: self.old_rebate,
                standard_deduction: self.standard_deduction,
                surcharge_tiers: &OLD_REGIME_SURCHARGE,
                allows_deductions: true,
            },
            Regime::New => RegimeRules {
                regime,
                brackets: self.new_brackets,
                rebate: self.new_rebate,
                standard_deduction: self.standard_deduction,
                surcharge_tiers: &NEW_REGIME_SURCHARGE,
                allows_deductions: false,
            },
        }
    }
}

const fn slab(
    min_income: Decimal,
    max_income: Option<Decimal>,
    rate: Decimal,
) -> TaxBracket {
    TaxBracket {
        min_income,
        max_income,
        rate,
    }
}

static OLD_BELOW_60: [TaxBracket; 4] = [
    slab(dec!(0), Some(dec!(250000)), dec!(0)),
    slab(dec!(250000), Some(dec!(500000)), dec!(0.05)),
    slab(dec!(500000), Some(dec!(1000000)), dec!(0.20)),
    slab(dec!(1000000), None, dec!(0.30)),
];

static OLD_60_TO_80: [TaxBracket; 4] = [
    slab(dec!(0), Some(dec!(300000)), dec!(0)),
    slab(dec!(300000), Some(dec!(500000)), dec!(0.05)),
    slab(dec!(500000), Some(dec!(1000000)), dec!(0.20)),
    slab(dec!(1000000), None, dec!(0.30)),
];

static OLD_ABOVE_80: [TaxBracket; 3] = [
    slab(dec!(0), Some(dec!(500000)), dec!(0)),
    slab(dec!(500000), Some(dec!(1000000)), dec!(0.20)),
    slab(dec!(1000000), None, dec!(0.30)),
];

static NEW_2024_25: [TaxBracket; 6] = [
    slab(dec!(0), Some(dec!(300000)), dec!(0)),
    slab(dec!(300000), Some(dec!(700000)), dec!(0.05)),
    slab(dec!(700000), Some(dec!(1000000)), dec!(0.10)),
    slab(dec!(1000000), Some(dec!(1200000)), dec!(0.15)),
    slab(dec!(1200000), Some(dec!(1500000)), dec!(0.20)),
    slab(dec!(1500000), None, dec!(0.30)),
];

static NEW_2025_26: [TaxBracket; 7] = [
    slab(dec!(0), Some(dec!(400000)), dec!(0)),
    slab(dec!(400000), Some(dec!(800000)), dec!(0.05)),
    slab(dec!(800000), Some(dec!(1200000)), dec!(0.10)),
    slab(dec!(1200000), Some(dec!(1600000)), dec!(0.15)),
    slab(dec!(1600000), Some(dec!(2000000)), dec!(0.20)),
    slab(dec!(2000000), Some(dec!(2400000)), dec!(0.25)),
    slab(dec!(2400000), None, dec!(0.30)),
];

static FY_2024_25: FiscalYearConfig = FiscalYearConfig {
    year: FiscalYear::Fy2024_25,
    old_brackets_below_60: &OLD_BELOW_60,
    old_brackets_60_to_80: &OLD_60_TO_80,
    old_brackets_above_80: &OLD_ABOVE_80,
    new_brackets: &NEW_2024_25,
    standard_deduction: dec!(50000),
    old_rebate: Rebate {
        threshold: dec!(500000),
        amount: dec!(12500),
    },
    new_rebate: Rebate {
        threshold: dec!(700000),
        amount: dec!(25000),
    },
    ltcg_exemption: dec!(100000),
};

static FY_2025_26: FiscalYearConfig = FiscalYearConfig {
    year: FiscalYear::Fy2025_26,
    old_brackets_below_60: &OLD_BELOW_60,
    old_brackets_60_to_80: &OLD_60_TO_80,
    old_brackets_above_80: &OLD_ABOVE_80,
    new_brackets: &NEW_2025_26,
    standard_deduction: dec!(50000),
    old_rebate: Rebate {
        threshold: dec!(500000),
        amount: dec!(12500),
    },
    new_rebate: Rebate {
        threshold: dec!(1200000),
        amount: dec!(60000),
    },
    ltcg_exemption: dec!(125000),
};
