//! Plain-text rendering of calculator results for the terminal.
//!
//! Amounts use Indian digit grouping (`12,34,567`) and are prefixed `Rs`.

use std::fmt::Write;

use itax_core::calculations::common::format_inr;
use itax_core::calculations::{
    AdvanceTaxPlan, CapitalGainsResult, EmiSchedule, HraBreakdown, TdsReconciliation,
};
use itax_core::{ProfileSnapshot, Recommendation, RegimeTax, Suggestion, TaxResult};
use rust_decimal::Decimal;

fn rs(amount: Decimal) -> String {
    format!("Rs {}", format_inr(amount))
}

fn row(
    out: &mut String,
    label: &str,
    old: Decimal,
    new: Decimal,
) {
    let _ = writeln!(out, "{:<28}{:>18}{:>18}", label, rs(old), rs(new));
}

/// Old vs new regime, line by line, followed by the recommendation.
pub fn render_comparison(result: &TaxResult) -> String {
    let mut out = String::new();
    let (old, new): (&RegimeTax, &RegimeTax) = (&result.old, &result.new);

    let _ = writeln!(out, "Tax comparison for {}", result.fiscal_year);
    let _ = writeln!(out, "{:<28}{:>18}{:>18}", "", "Old Regime", "New Regime");
    row(&mut out, "Gross total income", old.gross_total_income, new.gross_total_income);
    row(&mut out, "Standard deduction", old.standard_deduction, new.standard_deduction);
    row(&mut out, "Deductions (Chapter VI-A)", old.deductions, new.deductions);
    row(&mut out, "Taxable income", old.taxable_income, new.taxable_income);
    row(&mut out, "Slab tax", old.slab_tax, new.slab_tax);
    row(&mut out, "Rebate u/s 87A", old.rebate, new.rebate);
    row(&mut out, "Capital gains tax", old.capital_gains_tax, new.capital_gains_tax);
    row(&mut out, "Surcharge", old.surcharge, new.surcharge);
    if old.marginal_relief > Decimal::ZERO || new.marginal_relief > Decimal::ZERO {
        row(&mut out, "  of which marginal relief", old.marginal_relief, new.marginal_relief);
    }
    row(&mut out, "Health & education cess", old.cess, new.cess);
    row(&mut out, "Total tax", old.final_tax, new.final_tax);
    let _ = writeln!(
        out,
        "{:<28}{:>17}%{:>17}%",
        "Effective rate", old.effective_rate, new.effective_rate
    );
    let _ = writeln!(out);

    match result.recommended {
        Recommendation::Equal => {
            let _ = writeln!(out, "Both regimes cost the same.");
        }
        rec => {
            let _ = writeln!(
                out,
                "Recommended: {} (saves {})",
                rec.regime(),
                rs(result.savings)
            );
        }
    }
    out
}

pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    if suggestions.is_empty() {
        return "No further tax-saving suggestions.\n".to_string();
    }

    let mut out = String::from("Suggestions\n");
    for (i, s) in suggestions.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. [{}] {} (save up to {})",
            i + 1,
            s.priority.as_str(),
            s.title,
            rs(s.potential_saving)
        );
        let _ = writeln!(out, "   {}", s.description);
    }
    out
}

pub fn render_capital_gains(result: &CapitalGainsResult) -> String {
    let mut out = String::new();
    let term = if result.long_term { "Long term" } else { "Short term" };

    let _ = writeln!(out, "{} ({} months held)", term, result.holding_months);
    let _ = writeln!(out, "Cost basis:    {}", rs(result.cost_basis));
    if result.indexation_applied {
        let _ = writeln!(out, "               (indexed)");
    }
    if result.grandfathered {
        let _ = writeln!(out, "               (grandfathered at 31 Jan 2018 value)");
    }
    let _ = writeln!(out, "Gain:          {}", rs(result.gain));
    if result.exemption > Decimal::ZERO {
        let _ = writeln!(out, "Exemption:     {}", rs(result.exemption));
    }
    let _ = writeln!(out, "Taxable gain:  {}", rs(result.taxable_gain));
    match (result.rate, result.tax) {
        (Some(rate), Some(tax)) => {
            let _ = writeln!(
                out,
                "Tax @ {}%:     {}",
                (rate * Decimal::ONE_HUNDRED).normalize(),
                rs(tax)
            );
        }
        _ => {
            let _ = writeln!(out, "Tax:           at slab rates");
        }
    }
    out
}

pub fn render_emi(schedule: &EmiSchedule) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Monthly EMI:    {}", rs(schedule.emi));
    let _ = writeln!(out, "Total interest: {}", rs(schedule.total_interest));
    let _ = writeln!(out, "Total payment:  {}", rs(schedule.total_payment));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:>4}{:>16}{:>16}{:>16}{:>16}{:>16}",
        "Year", "Interest", "Principal", "Balance", "80C", "24(b)"
    );
    for y in &schedule.years {
        let _ = writeln!(
            out,
            "{:>4}{:>16}{:>16}{:>16}{:>16}{:>16}",
            y.year,
            format_inr(y.interest),
            format_inr(y.principal),
            format_inr(y.balance),
            format_inr(y.sec80c),
            format_inr(y.sec24b)
        );
    }
    out
}

pub fn render_advance_tax(plan: &AdvanceTaxPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total tax: {}", rs(plan.total_tax));
    let _ = writeln!(out, "TDS paid:  {}", rs(plan.tds_paid));
    let _ = writeln!(out, "Net tax:   {}", rs(plan.net_tax));

    if !plan.required {
        let _ = writeln!(out, "Advance tax is not required.");
        return out;
    }
    for i in &plan.installments {
        let _ = writeln!(
            out,
            "{:<8}{:>5}%{:>18}",
            i.due_date,
            i.cumulative_percent,
            rs(i.amount)
        );
    }
    out
}

pub fn render_tds(rec: &TdsReconciliation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total tax: {}", rs(rec.total_tax));
    let _ = writeln!(out, "Total TDS: {}", rs(rec.total_tds));
    let _ = writeln!(out, "Balance:   {} ({})", rs(rec.balance.abs()), rec.status);
    out
}

pub fn render_hra(breakdown: &HraBreakdown) -> String {
    let mut out = String::new();
    for c in &breakdown.components {
        let _ = writeln!(out, "{:<32}{:>18}", c.label, rs(c.amount));
    }
    let _ = writeln!(out, "{:<32}{:>18}", "Exempt HRA", rs(breakdown.exemption));
    let _ = writeln!(out, "{:<32}{:>18}", "Taxable HRA", rs(breakdown.taxable));
    out
}

pub fn render_profiles(snapshots: &[ProfileSnapshot]) -> String {
    if snapshots.is_empty() {
        return "No saved profiles.\n".to_string();
    }
    let mut out = String::new();
    for s in snapshots {
        let _ = writeln!(
            out,
            "{:>4}  {:<24}{}  {}",
            s.id,
            s.name,
            s.profile.fiscal_year,
            s.saved_at.format("%Y-%m-%d %H:%M")
        );
    }
    out
}
