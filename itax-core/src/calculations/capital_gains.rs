//! Capital gains on a single asset sale.
//!
//! Classifies the holding as short or long term, adjusts the cost basis by
//! indexation or equity grandfathering where the law allows, and applies the
//! asset's flat rate.
//!
//! | Asset | Long term after | Indexed | LT rate | ST rate |
//! |-------|-----------------|---------|---------|---------|
//! | Listed equity, equity MF | 12 months | never | 10% (above ₹1L exemption) | 15% |
//! | Property, gold | 24 months | sales before 23 Jul 2024 | 20% before 23 Jul 2024, then 12.5% | slab |
//! | Debt MF | 36 months | sales before 23 Jul 2024 | 20% before 23 Jul 2024, then 12.5% | slab |
//!
//! Short-term gains on non-equity assets are taxed at the slab rate, which
//! this calculator cannot know; it reports no rate and no tax for them.
//!
//! These asset-aware rates are independent of the fixed 15% / 10% split the
//! regime calculator applies to the profile's STCG and LTCG totals.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::{max, min, round_rupee};
use crate::models::CostInflationIndex;

const DAYS_PER_MONTH: Decimal = dec!(30.44);

/// Finance Act 2024 cutover: indexation and the 20% rate end for sales on or
/// after this date.
const INDEXATION_CUTOVER: (i32, u32, u32) = (2024, 7, 23);
/// Equity bought before this date may use its 31 Jan 2018 value as cost.
const GRANDFATHERING_CUTOFF: (i32, u32, u32) = (2018, 2, 1);

const EQUITY_LTCG_EXEMPTION: Decimal = dec!(100000);
const EQUITY_LT_RATE: Decimal = dec!(0.10);
const EQUITY_ST_RATE: Decimal = dec!(0.15);
const OTHER_LT_RATE_INDEXED: Decimal = dec!(0.20);
const OTHER_LT_RATE: Decimal = dec!(0.125);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetCategory {
    ListedEquity,
    EquityMutualFund,
    DebtMutualFund,
    Property,
    Gold,
}

impl AssetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListedEquity => "listed-equity",
            Self::EquityMutualFund => "equity-mf",
            Self::DebtMutualFund => "debt-mf",
            Self::Property => "property",
            Self::Gold => "gold",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "listed-equity" | "equity" => Some(Self::ListedEquity),
            "equity-mf" | "equity-mutual-fund" => Some(Self::EquityMutualFund),
            "debt-mf" | "debt-mutual-fund" => Some(Self::DebtMutualFund),
            "property" => Some(Self::Property),
            "gold" => Some(Self::Gold),
            _ => None,
        }
    }

    pub fn is_equity(&self) -> bool {
        matches!(self, Self::ListedEquity | Self::EquityMutualFund)
    }

    /// Months after which a holding becomes long term.
    pub fn long_term_months(&self) -> i64 {
        match self {
            Self::ListedEquity | Self::EquityMutualFund => 12,
            Self::Property | Self::Gold => 24,
            Self::DebtMutualFund => 36,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalGainsInput {
    pub asset: AssetCategory,
    /// Listed on a recognised exchange; unlisted shares are not grandfathered.
    pub listed: bool,
    pub purchase_date: NaiveDate,
    pub sale_date: NaiveDate,
    pub purchase_price: Decimal,
    pub sale_price: Decimal,
    /// Fiscal-year labels for the cost inflation index, e.g. `"2019-20"`.
    pub purchase_fy: String,
    pub sale_fy: String,
    /// Fair market value on 31 Jan 2018, for grandfathered equity.
    pub fmv_2018: Option<Decimal>,
}

impl CapitalGainsInput {
    /// Builds an input with fiscal-year labels derived from the dates.
    pub fn new(
        asset: AssetCategory,
        purchase_date: NaiveDate,
        sale_date: NaiveDate,
        purchase_price: Decimal,
        sale_price: Decimal,
    ) -> Self {
        Self {
            asset,
            listed: true,
            purchase_date,
            sale_date,
            purchase_price,
            sale_price,
            purchase_fy: fiscal_year_label(purchase_date),
            sale_fy: fiscal_year_label(sale_date),
            fmv_2018: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalGainsResult {
    pub holding_months: i64,
    pub long_term: bool,
    pub indexation_applied: bool,
    pub grandfathered: bool,
    /// Cost after indexation or grandfathering.
    pub cost_basis: Decimal,
    /// Negative for a loss.
    pub gain: Decimal,
    pub exemption: Decimal,
    pub taxable_gain: Decimal,
    /// `None` when the gain is taxed at slab rates.
    pub rate: Option<Decimal>,
    pub tax: Option<Decimal>,
}

/// Fiscal-year label (April to March) containing `date`.
///
/// ```
/// use chrono::NaiveDate;
/// use itax_core::calculations::fiscal_year_label;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
/// assert_eq!(fiscal_year_label(date), "2024-25");
/// ```
pub fn fiscal_year_label(date: NaiveDate) -> String {
    let start = if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{:02}", start, (start + 1).rem_euclid(100))
}

/// Computes gain and flat-rate tax for one sale.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::{AssetCategory, CapitalGainsInput, calc_capital_gains};
///
/// let input = CapitalGainsInput::new(
///     AssetCategory::ListedEquity,
///     NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     dec!(100000),
///     dec!(300000),
/// );
///
/// let result = calc_capital_gains(&input);
///
/// assert_eq!(result.holding_months, 60);
/// assert!(result.long_term);
/// assert_eq!(result.taxable_gain, dec!(100000));
/// assert_eq!(result.tax, Some(dec!(10000)));
/// ```
pub fn calc_capital_gains(input: &CapitalGainsInput) -> CapitalGainsResult {
    let asset = input.asset;
    let holding_months = holding_months(input.purchase_date, input.sale_date);
    let long_term = holding_months >= asset.long_term_months();
    let pre_cutover = is_before(input.sale_date, INDEXATION_CUTOVER);

    let indexed_cost = if long_term && !asset.is_equity() && pre_cutover {
        indexed_cost(input)
    } else {
        None
    };

    let grandfathered_cost = if long_term && is_grandfathered(input) {
        input
            .fmv_2018
            .map(|fmv| max(input.purchase_price, min(input.sale_price, fmv)))
    } else {
        None
    };

    let cost_basis = indexed_cost
        .or(grandfathered_cost)
        .unwrap_or(input.purchase_price);
    let gain = input.sale_price - cost_basis;

    let exemption = if long_term && asset.is_equity() {
        min(max(Decimal::ZERO, gain), EQUITY_LTCG_EXEMPTION)
    } else {
        Decimal::ZERO
    };
    let taxable_gain = max(Decimal::ZERO, gain - exemption);

    let rate = match (long_term, asset.is_equity()) {
        (true, true) => Some(EQUITY_LT_RATE),
        (true, false) if pre_cutover => Some(OTHER_LT_RATE_INDEXED),
        (true, false) => Some(OTHER_LT_RATE),
        (false, true) => Some(EQUITY_ST_RATE),
        (false, false) => None,
    };

    CapitalGainsResult {
        holding_months,
        long_term,
        indexation_applied: indexed_cost.is_some(),
        grandfathered: grandfathered_cost.is_some(),
        cost_basis,
        gain,
        exemption,
        taxable_gain,
        rate,
        tax: rate.map(|rate| round_rupee(taxable_gain * rate)),
    }
}

/// Whole months held, days ÷ 30.44 rounded half up.
fn holding_months(
    purchase: NaiveDate,
    sale: NaiveDate,
) -> i64 {
    let days = Decimal::from((sale - purchase).num_days());
    round_rupee(days / DAYS_PER_MONTH).to_i64().unwrap_or_default()
}

fn is_before(
    date: NaiveDate,
    (year, month, day): (i32, u32, u32),
) -> bool {
    (date.year(), date.month(), date.day()) < (year, month, day)
}

fn is_grandfathered(input: &CapitalGainsInput) -> bool {
    let eligible_asset = match input.asset {
        AssetCategory::ListedEquity => input.listed,
        AssetCategory::EquityMutualFund => true,
        _ => false,
    };
    eligible_asset && is_before(input.purchase_date, GRANDFATHERING_CUTOFF)
}

fn indexed_cost(input: &CapitalGainsInput) -> Option<Decimal> {
    let purchase_index = CostInflationIndex::lookup(&input.purchase_fy);
    let sale_index = CostInflationIndex::lookup(&input.sale_fy);

    match (purchase_index, sale_index) {
        (Some(purchase), Some(sale)) => Some(round_rupee(
            input.purchase_price * Decimal::from(sale) / Decimal::from(purchase),
        )),
        _ => {
            warn!(
                purchase_fy = %input.purchase_fy,
                sale_fy = %input.sale_fy,
                "cost inflation index not available, indexation disabled"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing::Level;

    use super::*;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::WARN)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    // =========================================================================
    // Holding period
    // =========================================================================

    #[test]
    fn equity_held_five_years_is_long_term() {
        let input = CapitalGainsInput::new(
            AssetCategory::ListedEquity,
            date(2020, 1, 1),
            date(2025, 1, 1),
            dec!(100000),
            dec!(300000),
        );

        let result = calc_capital_gains(&input);

        assert_eq!(result.holding_months, 60);
        assert!(result.long_term);
        assert!(!result.indexation_applied);
        assert_eq!(result.gain, dec!(200000));
        assert_eq!(result.exemption, dec!(100000));
        assert_eq!(result.taxable_gain, dec!(100000));
        assert_eq!(result.rate, Some(dec!(0.10)));
        assert_eq!(result.tax, Some(dec!(10000)));
    }

    #[test]
    fn equity_at_exactly_twelve_months_is_long_term() {
        let input = CapitalGainsInput::new(
            AssetCategory::EquityMutualFund,
            date(2023, 1, 1),
            date(2024, 1, 1),
            dec!(100000),
            dec!(150000),
        );

        let result = calc_capital_gains(&input);

        assert_eq!(result.holding_months, 12);
        assert!(result.long_term);
    }

    #[test]
    fn equity_one_month_short_is_short_term() {
        let input = CapitalGainsInput::new(
            AssetCategory::ListedEquity,
            date(2023, 1, 1),
            date(2023, 12, 1),
            dec!(100000),
            dec!(150000),
        );

        let result = calc_capital_gains(&input);

        assert_eq!(result.holding_months, 11);
        assert!(!result.long_term);
        assert_eq!(result.exemption, dec!(0));
        assert_eq!(result.rate, Some(dec!(0.15)));
        assert_eq!(result.tax, Some(dec!(7500)));
    }

    #[test]
    fn short_term_debt_fund_has_no_flat_rate() {
        let input = CapitalGainsInput::new(
            AssetCategory::DebtMutualFund,
            date(2023, 1, 1),
            date(2024, 1, 1),
            dec!(100000),
            dec!(110000),
        );

        let result = calc_capital_gains(&input);

        assert!(!result.long_term);
        assert_eq!(result.taxable_gain, dec!(10000));
        assert_eq!(result.rate, None);
        assert_eq!(result.tax, None);
    }

    // =========================================================================
    // Indexation
    // =========================================================================

    #[test]
    fn property_sold_before_cutover_is_indexed() {
        let input = CapitalGainsInput::new(
            AssetCategory::Property,
            date(2010, 5, 1),
            date(2024, 6, 1),
            dec!(2000000),
            dec!(8000000),
        );

        let result = calc_capital_gains(&input);

        assert_eq!(input.purchase_fy, "2010-11");
        assert_eq!(input.sale_fy, "2024-25");
        assert!(result.indexation_applied);
        // 2000000 × 363 / 167
        assert_eq!(result.cost_basis, dec!(4347305));
        assert_eq!(result.gain, dec!(3652695));
        assert_eq!(result.rate, Some(dec!(0.20)));
        assert_eq!(result.tax, Some(dec!(730539)));
    }

    #[test]
    fn property_sold_after_cutover_is_not_indexed() {
        let input = CapitalGainsInput::new(
            AssetCategory::Property,
            date(2010, 5, 1),
            date(2024, 8, 1),
            dec!(2000000),
            dec!(8000000),
        );

        let result = calc_capital_gains(&input);

        assert!(!result.indexation_applied);
        assert_eq!(result.cost_basis, dec!(2000000));
        assert_eq!(result.rate, Some(dec!(0.125)));
        assert_eq!(result.tax, Some(dec!(750000)));
    }

    #[test]
    fn missing_index_disables_indexation() {
        let _guard = init_test_tracing();
        let mut input = CapitalGainsInput::new(
            AssetCategory::Gold,
            date(1998, 6, 1),
            date(2023, 6, 1),
            dec!(50000),
            dec!(400000),
        );
        input.purchase_fy = "1998-99".to_string();

        let result = calc_capital_gains(&input);

        assert!(result.long_term);
        assert!(!result.indexation_applied);
        assert_eq!(result.cost_basis, dec!(50000));
        assert_eq!(result.tax, Some(dec!(70000)));
    }

    // =========================================================================
    // Grandfathering
    // =========================================================================

    #[test]
    fn pre_2018_equity_uses_fair_value_as_cost() {
        let mut input = CapitalGainsInput::new(
            AssetCategory::ListedEquity,
            date(2017, 6, 1),
            date(2023, 6, 1),
            dec!(100000),
            dec!(400000),
        );
        input.fmv_2018 = Some(dec!(250000));

        let result = calc_capital_gains(&input);

        assert!(result.grandfathered);
        assert_eq!(result.cost_basis, dec!(250000));
        assert_eq!(result.taxable_gain, dec!(50000));
        assert_eq!(result.tax, Some(dec!(5000)));
    }

    #[test]
    fn grandfathered_cost_never_exceeds_sale_price() {
        let mut input = CapitalGainsInput::new(
            AssetCategory::ListedEquity,
            date(2017, 6, 1),
            date(2024, 1, 10),
            dec!(100),
            dec!(250),
        );
        input.fmv_2018 = Some(dec!(300));

        let result = calc_capital_gains(&input);

        assert_eq!(result.cost_basis, dec!(250));
        assert_eq!(result.gain, dec!(0));
        assert_eq!(result.tax, Some(dec!(0)));
    }

    #[test]
    fn unlisted_shares_are_not_grandfathered() {
        let mut input = CapitalGainsInput::new(
            AssetCategory::ListedEquity,
            date(2017, 6, 1),
            date(2023, 6, 1),
            dec!(100000),
            dec!(400000),
        );
        input.listed = false;
        input.fmv_2018 = Some(dec!(250000));

        let result = calc_capital_gains(&input);

        assert!(!result.grandfathered);
        assert_eq!(result.cost_basis, dec!(100000));
    }

    #[test]
    fn loss_is_reported_and_untaxed() {
        let input = CapitalGainsInput::new(
            AssetCategory::ListedEquity,
            date(2021, 1, 1),
            date(2024, 1, 1),
            dec!(300000),
            dec!(200000),
        );

        let result = calc_capital_gains(&input);

        assert_eq!(result.gain, dec!(-100000));
        assert_eq!(result.exemption, dec!(0));
        assert_eq!(result.taxable_gain, dec!(0));
        assert_eq!(result.tax, Some(dec!(0)));
    }

    #[test]
    fn fiscal_year_label_splits_at_april() {
        assert_eq!(fiscal_year_label(date(2024, 3, 31)), "2023-24");
        assert_eq!(fiscal_year_label(date(2024, 4, 1)), "2024-25");
        assert_eq!(fiscal_year_label(date(1999, 12, 1)), "1999-00");
    }

    #[test]
    fn asset_category_parses_its_label() {
        for asset in [
            AssetCategory::ListedEquity,
            AssetCategory::EquityMutualFund,
            AssetCategory::DebtMutualFund,
            AssetCategory::Property,
            AssetCategory::Gold,
        ] {
            assert_eq!(AssetCategory::parse(asset.as_str()), Some(asset));
        }
    }
}
