//! Advance-tax installments and TDS reconciliation.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, round_rupee};

/// Advance tax is due only when the liability net of TDS reaches this amount.
const ADVANCE_TAX_THRESHOLD: Decimal = dec!(10000);

/// Due dates with the cumulative share of the year's tax payable by each.
const SCHEDULE: [(&str, Decimal); 4] = [
    ("15 Jun", dec!(15)),
    ("15 Sep", dec!(45)),
    ("15 Dec", dec!(75)),
    ("15 Mar", dec!(100)),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub due_date: String,
    /// Cumulative percentage payable by `due_date`.
    pub cumulative_percent: Decimal,
    /// Amount payable in this installment alone.
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceTaxPlan {
    pub total_tax: Decimal,
    pub tds_paid: Decimal,
    pub net_tax: Decimal,
    pub required: bool,
    /// Empty when advance tax is not required.
    pub installments: Vec<Installment>,
}

/// Splits the tax left after TDS into the four advance-tax installments.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::calc_advance_tax;
///
/// let plan = calc_advance_tax(dec!(110000), dec!(10000));
///
/// assert!(plan.required);
/// let amounts: Vec<_> = plan.installments.iter().map(|i| i.amount).collect();
/// assert_eq!(amounts, vec![dec!(15000), dec!(30000), dec!(30000), dec!(25000)]);
/// ```
pub fn calc_advance_tax(
    total_tax: Decimal,
    tds_paid: Decimal,
) -> AdvanceTaxPlan {
    let net_tax = max(Decimal::ZERO, total_tax - tds_paid);
    let required = net_tax >= ADVANCE_TAX_THRESHOLD;

    let installments = if required {
        let mut previous = Decimal::ZERO;
        SCHEDULE
            .iter()
            .map(|&(due_date, cumulative)| {
                let share = cumulative - previous;
                previous = cumulative;
                Installment {
                    due_date: due_date.to_string(),
                    cumulative_percent: cumulative,
                    amount: round_rupee(net_tax * share / Decimal::ONE_HUNDRED),
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    AdvanceTaxPlan {
        total_tax,
        tds_paid,
        net_tax,
        required,
        installments,
    }
}

/// Tax deducted at source by one deductor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TdsEntry {
    /// Deductor, e.g. employer or bank name.
    pub source: String,
    /// Section under which tax was deducted, e.g. `192` or `194A`.
    pub section: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TdsStatus {
    Payable,
    Refund,
    Nil,
}

impl TdsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payable => "payable",
            Self::Refund => "refund",
            Self::Nil => "nil",
        }
    }
}

impl fmt::Display for TdsStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TdsReconciliation {
    pub total_tax: Decimal,
    pub total_tds: Decimal,
    /// Positive when tax is still payable, negative for a refund.
    pub balance: Decimal,
    pub status: TdsStatus,
}

/// Compares TDS already deducted against the year's tax.
pub fn calc_tds_reconciliation(
    entries: &[TdsEntry],
    total_tax: Decimal,
) -> TdsReconciliation {
    let total_tds: Decimal = entries.iter().map(|e| e.amount).sum();
    let balance = total_tax - total_tds;
    let status = if balance > Decimal::ZERO {
        TdsStatus::Payable
    } else if balance < Decimal::ZERO {
        TdsStatus::Refund
    } else {
        TdsStatus::Nil
    };

    TdsReconciliation {
        total_tax,
        total_tds,
        balance,
        status,
    }
}
