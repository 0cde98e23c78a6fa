use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::FiscalYear;

/// Largest amount, in rupees, any profile field carries into a computation
/// (10^15). Larger inputs are clamped to it.
pub const AMOUNT_CEILING: Decimal = dec!(1000000000000000);

/// Age band of the assessee; selects the old-regime slab set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgeBand {
    #[default]
    #[serde(rename = "below60")]
    Below60,
    #[serde(rename = "60to80")]
    SixtyToEighty,
    #[serde(rename = "above80")]
    Above80,
}

impl AgeBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Below60 => "below60",
            Self::SixtyToEighty => "60to80",
            Self::Above80 => "above80",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "below60" => Some(Self::Below60),
            "60to80" => Some(Self::SixtyToEighty),
            "above80" => Some(Self::Above80),
            _ => None,
        }
    }

    /// Age band for an age in completed years.
    pub fn from_age(age: i32) -> Self {
        if age >= 80 {
            Self::Above80
        } else if age >= 60 {
            Self::SixtyToEighty
        } else {
            Self::Below60
        }
    }

    pub fn is_senior(&self) -> bool {
        !matches!(self, Self::Below60)
    }
}

/// City classification used by the HRA exemption (50% vs 40% of basic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CityType {
    #[default]
    Metro,
    NonMetro,
}

impl CityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metro => "metro",
            Self::NonMetro => "non-metro",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "metro" => Some(Self::Metro),
            "non-metro" | "nonmetro" | "non_metro" => Some(Self::NonMetro),
            _ => None,
        }
    }

    pub fn is_metro(&self) -> bool {
        matches!(self, Self::Metro)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResidentialStatus {
    #[default]
    Resident,
    NonResident,
}

impl ResidentialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resident => "resident",
            Self::NonResident => "non-resident",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "resident" => Some(Self::Resident),
            "non-resident" | "nri" => Some(Self::NonResident),
            _ => None,
        }
    }
}

/// A complete snapshot of one taxpayer's inputs.
///
/// Every amount defaults to zero. Amounts are expected to be non-negative;
/// callers that accept user input should pass the profile through
/// [`TaxProfile::normalized`] before computing. The calculators clamp every
/// amount to [`AMOUNT_CEILING`] themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxProfile {
    // Categorical inputs
    pub fiscal_year: FiscalYear,
    pub age: AgeBand,
    pub city: CityType,
    pub residential: ResidentialStatus,

    // Salary
    pub basic_salary: Decimal,
    pub hra_received: Decimal,
    pub rent_paid: Decimal,
    pub other_allowances: Decimal,
    pub perquisites: Decimal,

    // House property
    pub rental_income: Decimal,
    pub home_loan_interest: Decimal,
    pub property_tax: Decimal,

    // Business and presumptive taxation (44AD / 44ADA)
    pub business_income: Decimal,
    pub presumptive: bool,
    pub presumptive_professional: bool,
    pub gross_receipts: Decimal,
    pub digital_receipts: Decimal,
    pub cash_receipts: Decimal,

    // Capital gains and other sources
    pub stcg: Decimal,
    pub ltcg: Decimal,
    pub interest_income: Decimal,
    pub other_sources: Decimal,

    // Chapter VI-A deductions
    pub sec80c: Decimal,
    pub sec80ccd1b: Decimal,
    pub sec80d: Decimal,
    pub sec80e: Decimal,
    pub sec80g: Decimal,
    pub sec80tta: Decimal,
}

impl TaxProfile {
    /// Returns a copy with every amount clamped to `0..=AMOUNT_CEILING`.
    pub fn normalized(mut self) -> Self {
        for field in self.amounts_mut() {
            if field.is_sign_negative() {
                *field = Decimal::ZERO;
            }
        }
        self.capped()
    }

    /// Returns a copy with every amount above [`AMOUNT_CEILING`] lowered to it.
    /// Negative amounts are left alone.
    pub fn capped(&self) -> Self {
        let mut profile = self.clone();
        for field in profile.amounts_mut() {
            if *field > AMOUNT_CEILING {
                *field = AMOUNT_CEILING;
            }
        }
        profile
    }

    /// Gross salary before any exemption: basic + HRA + allowances + perquisites.
    pub fn gross_salary(&self) -> Decimal {
        self.basic_salary + self.hra_received + self.other_allowances + self.perquisites
    }

    fn amounts_mut(&mut self) -> [&mut Decimal; 22] {
        [
            &mut self.basic_salary,
            &mut self.hra_received,
            &mut self.rent_paid,
            &mut self.other_allowances,
            &mut self.perquisites,
            &mut self.rental_income,
            &mut self.home_loan_interest,
            &mut self.property_tax,
            &mut self.business_income,
            &mut self.gross_receipts,
            &mut self.digital_receipts,
            &mut self.cash_receipts,
            &mut self.stcg,
            &mut self.ltcg,
            &mut self.interest_income,
            &mut self.other_sources,
            &mut self.sec80c,
            &mut self.sec80ccd1b,
            &mut self.sec80d,
            &mut self.sec80e,
            &mut self.sec80g,
            &mut self.sec80tta,
        ]
    }
}
