//! Tax-planning hints derived from a profile and its computed result.
//!
//! Each rule is independent and fires on its own condition. Potential
//! savings use a flat approximate marginal rate of 30% plus 4% cess
//! (`0.312`) instead of re-running the slabs; the figures are indicative.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::{format_inr, min, round_rupee};
use crate::models::{
    Priority, Recommendation, Suggestion, SuggestionCategory, TaxProfile, TaxResult,
};

/// 30% slab rate with 4% cess.
const APPROX_MARGINAL_RATE: Decimal = dec!(0.312);
const SLAB_RATE_WITHOUT_CESS: Decimal = dec!(0.30);

const SEC_80C_LIMIT: Decimal = dec!(150000);
const SEC_80CCD1B_LIMIT: Decimal = dec!(50000);
const SEC_80D_SELF_LIMIT: Decimal = dec!(25000);
const SEC_24B_LIMIT: Decimal = dec!(200000);
const SEC_80TTA_LIMIT: Decimal = dec!(10000);

const HOME_LOAN_INCOME_FLOOR: Decimal = dec!(1000000);
const EDUCATION_LOAN_INCOME_FLOOR: Decimal = dec!(500000);

/// Builds the advisory list for `profile`, sorted by priority (high first),
/// then by potential saving (largest first). Ties keep rule order.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::{compute_tax, generate_suggestions};
/// use itax_core::{Priority, TaxProfile};
///
/// let profile = TaxProfile {
///     basic_salary: dec!(800000),
///     sec80c: dec!(100000),
///     ..Default::default()
/// };
/// let result = compute_tax(&profile);
///
/// let suggestions = generate_suggestions(&profile, &result);
///
/// assert_eq!(suggestions[0].priority, Priority::High);
/// assert!(suggestions.iter().any(|s| s.title == "Maximize Section 80C"));
/// ```
pub fn generate_suggestions(
    profile: &TaxProfile,
    result: &TaxResult,
) -> Vec<Suggestion> {
    let profile = &profile.capped();
    let mut suggestions = Vec::new();

    if profile.sec80c < SEC_80C_LIMIT {
        let gap = SEC_80C_LIMIT - profile.sec80c;
        suggestions.push(suggestion(
            "Maximize Section 80C",
            format!(
                "Invest ₹{} more under 80C. Consider ELSS (3-yr lock-in, equity returns), \
                 PPF (15-yr, risk-free 7.1%), or NSC.",
                format_inr(gap)
            ),
            heuristic_saving(gap),
            Priority::High,
            SuggestionCategory::Investment,
        ));
    }

    if profile.sec80ccd1b < SEC_80CCD1B_LIMIT {
        let gap = SEC_80CCD1B_LIMIT - profile.sec80ccd1b;
        suggestions.push(suggestion(
            "NPS Additional Deduction (80CCD1B)",
            format!(
                "Invest ₹{} more in NPS for an additional deduction beyond 80C, \
                 building a retirement corpus at the same time.",
                format_inr(gap)
            ),
            heuristic_saving(gap),
            Priority::High,
            SuggestionCategory::Investment,
        ));
    }

    if profile.sec80d.is_zero() {
        suggestions.push(suggestion(
            "Get Health Insurance (Section 80D)",
            "Premiums up to ₹25,000 (₹50,000 for senior citizens) are deductible. Add ₹25,000 \
             for parents' insurance for up to ₹1L total deduction."
                .to_string(),
            heuristic_saving(SEC_80D_SELF_LIMIT),
            Priority::High,
            SuggestionCategory::Insurance,
        ));
    }

    if profile.basic_salary > Decimal::ZERO
        && profile.hra_received > Decimal::ZERO
        && profile.rent_paid.is_zero()
    {
        suggestions.push(suggestion(
            "Claim HRA Exemption",
            "You receive HRA but haven't declared rent. If you pay rent, claim the HRA \
             exemption to reduce taxable income."
                .to_string(),
            round_rupee(profile.hra_received * SLAB_RATE_WITHOUT_CESS),
            Priority::High,
            SuggestionCategory::Salary,
        ));
    }

    if profile.home_loan_interest.is_zero() && result.gross_total_income > HOME_LOAN_INCOME_FLOOR {
        suggestions.push(suggestion(
            "Home Loan Interest Deduction",
            "Home loan interest up to ₹2,00,000 is deductible under Section 24(b) for a \
             self-occupied property."
                .to_string(),
            heuristic_saving(SEC_24B_LIMIT),
            Priority::Medium,
            SuggestionCategory::Property,
        ));
    }

    if result.recommended == Recommendation::New && profile.sec80c > Decimal::ZERO {
        suggestions.push(suggestion(
            "Consider New Tax Regime",
            format!(
                "The New Regime is more beneficial. Deductions don't apply but slab rates \
                 are lower. You save ₹{}.",
                format_inr(result.savings)
            ),
            result.savings,
            Priority::High,
            SuggestionCategory::Regime,
        ));
    }

    if result.recommended == Recommendation::Old {
        suggestions.push(suggestion(
            "Old Regime is Better for You",
            format!(
                "With your deductions, the Old Regime saves ₹{}. Maximize deductions to \
                 widen this gap.",
                format_inr(result.savings)
            ),
            result.savings,
            Priority::Medium,
            SuggestionCategory::Regime,
        ));
    }

    if result.gross_total_income > EDUCATION_LOAN_INCOME_FLOOR && profile.sec80e.is_zero() {
        suggestions.push(suggestion(
            "Education Loan Interest (80E)",
            "If you or your children have education loans, the entire interest is deductible \
             under Section 80E with no upper limit."
                .to_string(),
            Decimal::ZERO,
            Priority::Low,
            SuggestionCategory::Education,
        ));
    }

    if profile.interest_income > Decimal::ZERO && profile.sec80tta.is_zero() {
        let claimable = min(profile.interest_income, SEC_80TTA_LIMIT);
        suggestions.push(suggestion(
            "Claim Savings Interest (80TTA)",
            format!(
                "Interest on savings accounts up to ₹{} is deductible under Section 80TTA \
                 (80TTB allows more for senior citizens).",
                format_inr(SEC_80TTA_LIMIT)
            ),
            heuristic_saving(claimable),
            Priority::Medium,
            SuggestionCategory::Investment,
        ));
    }

    if profile.business_income > Decimal::ZERO && !profile.presumptive {
        suggestions.push(suggestion(
            "Check Presumptive Taxation (44AD/44ADA)",
            "Small businesses and professionals can declare a fixed share of receipts as \
             income and skip detailed books of account."
                .to_string(),
            Decimal::ZERO,
            Priority::Low,
            SuggestionCategory::Business,
        ));
    }

    suggestions.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.potential_saving.cmp(&a.potential_saving))
    });

    suggestions
}

fn heuristic_saving(amount: Decimal) -> Decimal {
    round_rupee(amount * APPROX_MARGINAL_RATE)
}

fn suggestion(
    title: &str,
    description: String,
    potential_saving: Decimal,
    priority: Priority,
    category: SuggestionCategory,
) -> Suggestion {
    Suggestion {
        title: title.to_string(),
        description,
        potential_saving,
        priority,
        category,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculations::compute_tax;

    fn suggestions_for(profile: &TaxProfile) -> Vec<Suggestion> {
        generate_suggestions(profile, &compute_tax(profile))
    }

    fn find<'a>(
        suggestions: &'a [Suggestion],
        title: &str,
    ) -> Option<&'a Suggestion> {
        suggestions.iter().find(|s| s.title == title)
    }

    #[test]
    fn fully_invested_profile_gets_no_investment_hints() {
        let profile = TaxProfile {
            basic_salary: dec!(400000),
            sec80c: dec!(150000),
            sec80ccd1b: dec!(50000),
            sec80d: dec!(25000),
            ..Default::default()
        };

        let suggestions = suggestions_for(&profile);

        assert!(
            suggestions
                .iter()
                .all(|s| s.category != SuggestionCategory::Investment)
        );
        assert!(find(&suggestions, "Get Health Insurance (Section 80D)").is_none());
    }

    #[test]
    fn section_80c_gap_uses_heuristic_rate() {
        let profile = TaxProfile {
            sec80c: dec!(50000),
            ..Default::default()
        };

        let suggestions = suggestions_for(&profile);
        let hint = find(&suggestions, "Maximize Section 80C").unwrap();

        // 100000 × 0.3 × 1.04
        assert_eq!(hint.potential_saving, dec!(31200));
        assert_eq!(hint.priority, Priority::High);
        assert!(hint.description.contains("₹1,00,000"));
    }

    #[test]
    fn health_insurance_hint_when_80d_missing() {
        let suggestions = suggestions_for(&TaxProfile::default());
        let hint = find(&suggestions, "Get Health Insurance (Section 80D)").unwrap();

        assert_eq!(hint.potential_saving, dec!(7800));
        assert_eq!(hint.category, SuggestionCategory::Insurance);
    }

    #[test]
    fn hra_claim_hint_uses_rate_without_cess() {
        let profile = TaxProfile {
            basic_salary: dec!(500000),
            hra_received: dec!(200000),
            ..Default::default()
        };

        let suggestions = suggestions_for(&profile);
        let hint = find(&suggestions, "Claim HRA Exemption").unwrap();

        assert_eq!(hint.potential_saving, dec!(60000));
    }

    #[test]
    fn home_loan_hint_needs_income_above_ten_lakh() {
        let below = suggestions_for(&TaxProfile {
            basic_salary: dec!(1000000),
            ..Default::default()
        });
        let above = suggestions_for(&TaxProfile {
            basic_salary: dec!(1100000),
            ..Default::default()
        });

        assert!(find(&below, "Home Loan Interest Deduction").is_none());
        let hint = find(&above, "Home Loan Interest Deduction").unwrap();
        assert_eq!(hint.potential_saving, dec!(62400));
        assert_eq!(hint.priority, Priority::Medium);
    }

    #[test]
    fn regime_hint_follows_recommendation() {
        let old_better = TaxProfile {
            basic_salary: dec!(600000),
            hra_received: dec!(240000),
            rent_paid: dec!(180000),
            sec80c: dec!(150000),
            ..Default::default()
        };
        let new_better = TaxProfile {
            basic_salary: dec!(1500000),
            sec80c: dec!(20000),
            ..Default::default()
        };

        let old_hints = suggestions_for(&old_better);
        let new_hints = suggestions_for(&new_better);

        let old_hint = find(&old_hints, "Old Regime is Better for You").unwrap();
        assert_eq!(old_hint.potential_saving, dec!(13000));
        assert!(find(&old_hints, "Consider New Tax Regime").is_none());

        let new_hint = find(&new_hints, "Consider New Tax Regime").unwrap();
        assert_eq!(new_hint.priority, Priority::High);
        assert!(find(&new_hints, "Old Regime is Better for You").is_none());
    }

    #[test]
    fn savings_interest_hint_caps_at_ten_thousand() {
        let profile = TaxProfile {
            interest_income: dec!(45000),
            ..Default::default()
        };

        let suggestions = suggestions_for(&profile);
        let hint = find(&suggestions, "Claim Savings Interest (80TTA)").unwrap();

        assert_eq!(hint.potential_saving, dec!(3120));
    }

    #[test]
    fn presumptive_hint_only_for_regular_business_income() {
        let regular = TaxProfile {
            business_income: dec!(300000),
            ..Default::default()
        };
        let presumptive = TaxProfile {
            presumptive: true,
            ..regular.clone()
        };

        assert!(find(&suggestions_for(&regular), "Check Presumptive Taxation (44AD/44ADA)").is_some());
        assert!(
            find(&suggestions_for(&presumptive), "Check Presumptive Taxation (44AD/44ADA)")
                .is_none()
        );
    }

    #[test]
    fn sorted_by_priority_then_saving() {
        let profile = TaxProfile {
            basic_salary: dec!(1200000),
            hra_received: dec!(100000),
            interest_income: dec!(5000),
            ..Default::default()
        };

        let suggestions = suggestions_for(&profile);

        for pair in suggestions.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.priority <= b.priority);
            if a.priority == b.priority {
                assert!(a.potential_saving >= b.potential_saving);
            }
        }
        assert_eq!(suggestions[0].title, "Maximize Section 80C");
        assert_eq!(suggestions.last().unwrap().priority, Priority::Low);
    }

    #[test]
    fn equal_hints_keep_rule_order() {
        let profile = TaxProfile {
            sec80c: dec!(100000),
            ..Default::default()
        };

        let suggestions = suggestions_for(&profile);

        // 50000 gap each: 50000 × 0.312
        assert_eq!(suggestions[0].title, "Maximize Section 80C");
        assert_eq!(suggestions[1].title, "NPS Additional Deduction (80CCD1B)");
        assert_eq!(suggestions[0].potential_saving, dec!(15600));
        assert_eq!(suggestions[1].potential_saving, dec!(15600));
        assert_eq!(suggestions[2].title, "Get Health Insurance (Section 80D)");
    }

    #[test]
    fn huge_hra_does_not_overflow() {
        let profile = TaxProfile {
            basic_salary: dec!(500000),
            hra_received: Decimal::MAX,
            ..Default::default()
        };

        let suggestions = suggestions_for(&profile);
        let hint = find(&suggestions, "Claim HRA Exemption").unwrap();

        assert_eq!(hint.potential_saving, dec!(300000000000000));
    }
}
