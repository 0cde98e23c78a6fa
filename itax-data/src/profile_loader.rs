//! Reads [`TaxProfile`]s from CSV or TOML.
//!
//! Both formats name fields exactly as [`TaxProfile`] does (`basic_salary`,
//! `sec80c`, `fiscal_year`, ...). Any subset of fields may be given; the rest
//! keep their defaults.
//!
//! Numbers are forgiving: an empty, non-numeric or negative amount is read as
//! zero. Categories are strict: an unknown `age`, `city`, `fiscal_year`,
//! `residential` or boolean value is an error that names the field and row.
//!
//! ```
//! use itax_data::ProfileLoader;
//!
//! let csv = "basic_salary,age,city\n900000,60to80,non-metro\n";
//! let profiles = ProfileLoader::parse_csv(csv.as_bytes()).unwrap();
//! assert_eq!(profiles.len(), 1);
//! assert!(profiles[0].age.is_senior());
//! ```

use std::io::Read;
use std::path::Path;

use itax_core::{AMOUNT_CEILING, AgeBand, CityType, FiscalYear, ResidentialStatus, TaxProfile};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid value '{value}' for '{field}' (row {row})")]
    InvalidCategory {
        field: String,
        value: String,
        row: usize,
    },

    #[error("Unsupported profile format: {0} (expected .csv or .toml)")]
    UnsupportedFormat(String),
}

impl From<csv::Error> for ProfileLoadError {
    fn from(err: csv::Error) -> Self {
        ProfileLoadError::CsvParse(err.to_string())
    }
}

impl From<toml::de::Error> for ProfileLoadError {
    fn from(err: toml::de::Error) -> Self {
        ProfileLoadError::TomlParse(err.to_string())
    }
}

pub struct ProfileLoader;

impl ProfileLoader {
    /// Loads every profile in `path`, choosing the format by extension.
    pub fn load_path(path: &Path) -> Result<Vec<TaxProfile>, ProfileLoadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Self::parse_csv(std::fs::File::open(path)?),
            "toml" => Ok(vec![Self::parse_toml(&std::fs::read_to_string(path)?)?]),
            other => Err(ProfileLoadError::UnsupportedFormat(other.to_string())),
        }
    }

    /// One profile per CSV row. Headers are matched by name, so column order
    /// is free and unknown columns are ignored.
    pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<TaxProfile>, ProfileLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut profiles = Vec::new();

        for (index, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row = index + 1;
            let mut profile = TaxProfile::default();
            for (header, value) in headers.iter().zip(record.iter()) {
                apply_field(&mut profile, header, value, row)?;
            }
            profiles.push(profile);
        }

        debug!(count = profiles.len(), "parsed profiles from CSV");
        Ok(profiles)
    }

    /// A single profile from a flat TOML table.
    pub fn parse_toml(input: &str) -> Result<TaxProfile, ProfileLoadError> {
        let table: toml::Table = input.parse()?;
        let mut profile = TaxProfile::default();

        for (key, value) in &table {
            let text = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    warn!(field = %key, kind = other.type_str(), "ignoring non-scalar profile value");
                    continue;
                }
            };
            apply_field(&mut profile, key, &text, 1)?;
        }

        Ok(profile)
    }
}

/// Parses a rupee amount; negative or unparseable values become zero and
/// values above [`AMOUNT_CEILING`] are clamped to it.
fn amount(value: &str) -> Decimal {
    let cleaned: String = value.chars().filter(|c| *c != ',' && *c != '_').collect();
    match cleaned.trim().parse::<Decimal>() {
        Ok(d) if d.is_sign_negative() => Decimal::ZERO,
        Ok(d) if d > AMOUNT_CEILING => AMOUNT_CEILING,
        Ok(d) => d,
        Err(_) => Decimal::ZERO,
    }
}

fn flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "0" => Some(false),
        "true" | "yes" | "1" => Some(true),
        _ => None,
    }
}

fn apply_field(
    profile: &mut TaxProfile,
    field: &str,
    value: &str,
    row: usize,
) -> Result<(), ProfileLoadError> {
    let invalid = || ProfileLoadError::InvalidCategory {
        field: field.to_string(),
        value: value.to_string(),
        row,
    };

    match field.trim() {
        "fiscal_year" => profile.fiscal_year = FiscalYear::parse(value).ok_or_else(invalid)?,
        "age" => profile.age = AgeBand::parse(value).ok_or_else(invalid)?,
        "city" => profile.city = CityType::parse(value).ok_or_else(invalid)?,
        "residential" => {
            profile.residential = ResidentialStatus::parse(value).ok_or_else(invalid)?
        }
        "presumptive" => profile.presumptive = flag(value).ok_or_else(invalid)?,
        "presumptive_professional" => {
            profile.presumptive_professional = flag(value).ok_or_else(invalid)?
        }

        "basic_salary" => profile.basic_salary = amount(value),
        "hra_received" => profile.hra_received = amount(value),
        "rent_paid" => profile.rent_paid = amount(value),
        "other_allowances" => profile.other_allowances = amount(value),
        "perquisites" => profile.perquisites = amount(value),
        "rental_income" => profile.rental_income = amount(value),
        "home_loan_interest" => profile.home_loan_interest = amount(value),
        "property_tax" => profile.property_tax = amount(value),
        "business_income" => profile.business_income = amount(value),
        "gross_receipts" => profile.gross_receipts = amount(value),
        "digital_receipts" => profile.digital_receipts = amount(value),
        "cash_receipts" => profile.cash_receipts = amount(value),
        "stcg" => profile.stcg = amount(value),
        "ltcg" => profile.ltcg = amount(value),
        "interest_income" => profile.interest_income = amount(value),
        "other_sources" => profile.other_sources = amount(value),
        "sec80c" => profile.sec80c = amount(value),
        "sec80ccd1b" => profile.sec80ccd1b = amount(value),
        "sec80d" => profile.sec80d = amount(value),
        "sec80e" => profile.sec80e = amount(value),
        "sec80g" => profile.sec80g = amount(value),
        "sec80tta" => profile.sec80tta = amount(value),

        unknown => debug!(field = unknown, row, "ignoring unknown profile field"),
    }

    Ok(())
}
