use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ordering is significant: `High` sorts before `Medium` before `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Investment,
    Insurance,
    Salary,
    Property,
    Regime,
    Education,
    Business,
}

impl SuggestionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Investment => "investment",
            Self::Insurance => "insurance",
            Self::Salary => "salary",
            Self::Property => "property",
            Self::Regime => "regime",
            Self::Education => "education",
            Self::Business => "business",
        }
    }
}

/// One tax-planning hint. `potential_saving` is an estimate in whole rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub potential_saving: Decimal,
    pub priority: Priority,
    pub category: SuggestionCategory,
}
