mod cost_inflation_index;
mod fiscal_year;
mod profile_snapshot;
mod regime;
mod suggestion;
pub mod surcharge;
mod tax_bracket;
mod tax_profile;
mod tax_result;

pub use cost_inflation_index::CostInflationIndex;
pub use fiscal_year::{FiscalYear, FiscalYearConfig};
pub use profile_snapshot::ProfileSnapshot;
pub use regime::{Rebate, Regime, RegimeRules};
pub use suggestion::{Priority, Suggestion, SuggestionCategory};
pub use surcharge::SurchargeTier;
pub use tax_bracket::{BracketSetError, TaxBracket, validate_brackets};
pub use tax_profile::{AMOUNT_CEILING, AgeBand, CityType, ResidentialStatus, TaxProfile};
pub use tax_result::{Recommendation, RegimeTax, TaxResult};
