//! Income-tax calculators for Indian individuals.
//!
//! The regime calculator and comparison orchestrator form the main pipeline;
//! capital gains, EMI, advance tax, TDS and HRA are independent calculators.
//! Every function here is pure and total.

pub mod advance_tax;
pub mod capital_gains;
pub mod common;
pub mod comparison;
pub mod emi;
pub mod hra;
pub mod income;
pub mod regime_tax;
pub mod slab;
pub mod suggestions;
pub mod surcharge;

pub use advance_tax::{
    AdvanceTaxPlan, Installment, TdsEntry, TdsReconciliation, TdsStatus, calc_advance_tax,
    calc_tds_reconciliation,
};
pub use capital_gains::{
    AssetCategory, CapitalGainsInput, CapitalGainsResult, calc_capital_gains, fiscal_year_label,
};
pub use comparison::compute_tax;
pub use emi::{EmiSchedule, EmiYear, calc_emi_schedule};
pub use hra::{HraBreakdown, HraComponent, calc_hra};
pub use regime_tax::{RegimeCalculator, compute_regime};
pub use slab::bracket_tax;
pub use suggestions::generate_suggestions;
pub use surcharge::{SurchargeOutcome, resolve_surcharge};
