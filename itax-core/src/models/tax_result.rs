use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FiscalYear, Regime};

/// Which regime yields the lower final tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Old,
    New,
    Equal,
}

impl Recommendation {
    /// The regime to file under; `Equal` resolves to the new regime, which
    /// is the statutory default.
    pub fn regime(&self) -> Regime {
        match self {
            Self::Old => Regime::Old,
            Self::New | Self::Equal => Regime::New,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Old => write!(f, "old"),
            Self::New => write!(f, "new"),
            Self::Equal => write!(f, "equal"),
        }
    }
}

/// Itemized liability under one regime. All amounts are whole rupees except
/// `effective_rate`, which is a percentage with two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeTax {
    pub regime: Regime,
    pub gross_total_income: Decimal,
    pub standard_deduction: Decimal,
    pub deductions: Decimal,
    pub taxable_income: Decimal,
    /// Slab tax before the 87A rebate.
    pub slab_tax: Decimal,
    pub rebate: Decimal,
    /// Flat tax on STCG and taxable LTCG.
    pub capital_gains_tax: Decimal,
    /// Slab tax after rebate plus capital-gains tax; surcharge is levied on this.
    pub base_tax: Decimal,
    pub surcharge: Decimal,
    pub marginal_relief: Decimal,
    pub cess: Decimal,
    pub final_tax: Decimal,
    pub effective_rate: Decimal,
}

/// Both regimes side by side plus the shared income heads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub fiscal_year: FiscalYear,
    /// Gross total income as computed under the old regime (after HRA exemption).
    pub gross_total_income: Decimal,
    /// Chapter VI-A deductions (old regime only).
    pub total_deductions: Decimal,
    pub hra_exemption: Decimal,
    pub house_property_income: Decimal,
    pub presumptive_income: Option<Decimal>,
    pub taxable_ltcg: Decimal,
    pub capital_gains_tax: Decimal,
    pub old: RegimeTax,
    pub new: RegimeTax,
    pub savings: Decimal,
    pub recommended: Recommendation,
}

impl TaxResult {
    pub fn regime(
        &self,
        regime: Regime,
    ) -> &RegimeTax {
        match regime {
            Regime::Old => &self.old,
            Regime::New => &self.new,
        }
    }

    /// Final tax under the recommended regime; this is what advance tax and
    /// TDS reconciliation are measured against.
    pub fn recommended_tax(&self) -> Decimal {
        self.regime(self.recommended.regime()).final_tax
    }
}
