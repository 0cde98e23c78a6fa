//! Best-effort extraction of profile fields from pasted Form 16 text.
//!
//! Each field has one or more case-insensitive patterns, tried in order. A
//! pattern wins when its first match yields a positive amount; otherwise the
//! next pattern is tried. Fields with no winning pattern keep their default.
//! A date of birth, when present, sets the age band.
//!
//! Parsing never fails: text with nothing recognisable yields a default
//! profile.

use std::sync::OnceLock;

use itax_core::{AgeBand, FiscalYear, TaxProfile};
use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    BasicSalary,
    HraReceived,
    OtherAllowances,
    Perquisites,
    Sec80c,
    Sec80ccd1b,
    Sec80d,
    Sec80e,
    Sec80g,
    Sec80tta,
    InterestIncome,
    HomeLoanInterest,
    RentalIncome,
    PropertyTax,
}

impl Field {
    fn slot<'a>(
        &self,
        profile: &'a mut TaxProfile,
    ) -> &'a mut Decimal {
        match self {
            Self::BasicSalary => &mut profile.basic_salary,
            Self::HraReceived => &mut profile.hra_received,
            Self::OtherAllowances => &mut profile.other_allowances,
            Self::Perquisites => &mut profile.perquisites,
            Self::Sec80c => &mut profile.sec80c,
            Self::Sec80ccd1b => &mut profile.sec80ccd1b,
            Self::Sec80d => &mut profile.sec80d,
            Self::Sec80e => &mut profile.sec80e,
            Self::Sec80g => &mut profile.sec80g,
            Self::Sec80tta => &mut profile.sec80tta,
            Self::InterestIncome => &mut profile.interest_income,
            Self::HomeLoanInterest => &mut profile.home_loan_interest,
            Self::RentalIncome => &mut profile.rental_income,
            Self::PropertyTax => &mut profile.property_tax,
        }
    }
}

// `[\s:₹]*` between label and amount; the amount may carry Indian grouping.
const FIELD_PATTERNS: &[(Field, &[&str])] = &[
    (
        Field::BasicSalary,
        &[
            r"(?i)basic\s*(?:salary|pay)[\s:₹]*([0-9,]+)",
            r"(?i)salary\s*(?:as per|under).*?([0-9,]+)",
        ],
    ),
    (
        Field::HraReceived,
        &[r"(?i)(?:house\s+rent|hra)\s*(?:allowance|received)?[\s:₹]*([0-9,]+)"],
    ),
    (
        Field::OtherAllowances,
        &[r"(?i)(?:other|special)\s*allowances?[\s:₹]*([0-9,]+)"],
    ),
    (
        Field::Perquisites,
        &[
            r"(?i)perquisites?[\s:₹]*([0-9,]+)",
            r"(?i)value\s+of\s+perquisites.*?([0-9,]+)",
        ],
    ),
    // A letter or bracket after "80C" (80CCC, 80CCD(...)) cannot match the
    // separator class, so those sections never land in 80C.
    (
        Field::Sec80c,
        &[
            r"(?i)80\s*C[\s:₹]*([0-9,]+)",
            r"(?i)deduction.*?80C.*?([0-9,]+)",
        ],
    ),
    (
        Field::Sec80ccd1b,
        &[r"(?i)80\s*CCD\s*\(?1B\)?[\s:₹]*([0-9,]+)"],
    ),
    (Field::Sec80d, &[r"(?i)80\s*D[\s:₹]*([0-9,]+)"]),
    (Field::Sec80e, &[r"(?i)80\s*E[\s:₹]*([0-9,]+)"]),
    (Field::Sec80g, &[r"(?i)80\s*G[\s:₹]*([0-9,]+)"]),
    (Field::Sec80tta, &[r"(?i)80\s*TTA[\s:₹]*([0-9,]+)"]),
    (
        Field::InterestIncome,
        &[r"(?i)interest\s*(?:income|on\s*(?:savings|deposits))[\s:₹]*([0-9,]+)"],
    ),
    (
        Field::HomeLoanInterest,
        &[r"(?i)(?:interest.*?(?:house|home)\s*(?:property|loan)|24\(b\))[\s:₹]*([0-9,]+)"],
    ),
    (
        Field::RentalIncome,
        &[r"(?i)(?:income|rent).*?(?:house|property|let\s*out)[\s:₹]*([0-9,]+)"],
    ),
    (
        Field::PropertyTax,
        &[r"(?i)(?:property|municipal)\s*tax[\s:₹]*([0-9,]+)"],
    ),
];

const DOB_PATTERN: &str = r"(?i)(?:date\s*of\s*birth|dob)[\s:]*(\d{1,2})[/-](\d{1,2})[/-](\d{2,4})";

struct CompiledPatterns {
    fields: Vec<(Field, Vec<Regex>)>,
    dob: Regex,
}

fn patterns() -> &'static CompiledPatterns {
    static PATTERNS: OnceLock<CompiledPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| CompiledPatterns {
        fields: FIELD_PATTERNS
            .iter()
            .map(|(field, sources)| {
                let compiled = sources
                    .iter()
                    .map(|src| Regex::new(src).expect("form 16 pattern is valid"))
                    .collect();
                (*field, compiled)
            })
            .collect(),
        dob: Regex::new(DOB_PATTERN).expect("date of birth pattern is valid"),
    })
}

fn positive_amount(digits: &str) -> Option<Decimal> {
    let cleaned: String = digits.chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<Decimal>()
        .ok()
        .filter(|d| *d > Decimal::ZERO)
}

/// Expands a two-digit year: above 50 is the 1900s, otherwise the 2000s.
fn full_year(year: i32) -> i32 {
    match year {
        y if y >= 100 => y,
        y if y > 50 => 1900 + y,
        y => 2000 + y,
    }
}

/// Parses Form 16 text into a profile for FY 2024-25.
pub fn parse_form16_text(text: &str) -> TaxProfile {
    parse_form16_text_for_year(text, FiscalYear::default())
}

/// Parses Form 16 text; a date of birth is aged against the calendar year in
/// which `fiscal_year` ends.
pub fn parse_form16_text_for_year(
    text: &str,
    fiscal_year: FiscalYear,
) -> TaxProfile {
    let full = text.replace(['\r', '\n'], " ");
    let compiled = patterns();
    let mut profile = TaxProfile {
        fiscal_year,
        ..Default::default()
    };

    for (field, regexes) in &compiled.fields {
        let found = regexes.iter().find_map(|re| {
            re.captures(&full)
                .and_then(|caps| caps.get(1))
                .and_then(|m| positive_amount(m.as_str()))
        });
        if let Some(value) = found {
            debug!(?field, %value, "form 16 field matched");
            *field.slot(&mut profile) = value;
        }
    }

    if let Some(caps) = compiled.dob.captures(&full) {
        if let Some(year) = caps.get(3).and_then(|m| m.as_str().parse::<i32>().ok()) {
            let age = fiscal_year.end_year() - full_year(year);
            profile.age = AgeBand::from_age(age);
            debug!(age, band = profile.age.as_str(), "form 16 date of birth matched");
        }
    }

    profile
}
