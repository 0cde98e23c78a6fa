use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single income slab taxed at one marginal rate.
///
/// `max_income` of `None` marks the open-ended top slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    /// Width of the slab, or `None` for the unbounded top slab.
    pub fn width(&self) -> Option<Decimal> {
        self.max_income.map(|max| max - self.min_income)
    }
}

/// Structural problems in a bracket set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketSetError {
    #[error("bracket set is empty")]
    Empty,

    #[error("first bracket starts at {0}, expected 0")]
    NonZeroStart(Decimal),

    #[error("bracket {index} starts at {found}, expected {expected}")]
    Gap {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {0} has an upper bound that is not above its lower bound")]
    NonIncreasing(usize),

    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd(usize),

    #[error("last bracket must be unbounded")]
    BoundedTop,
}

/// Checks that brackets are contiguous, strictly increasing, start at zero
/// and end with an unbounded slab.
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), BracketSetError> {
    let first = brackets.first().ok_or(BracketSetError::Empty)?;
    if !first.min_income.is_zero() {
        return Err(BracketSetError::NonZeroStart(first.min_income));
    }

    let last_index = brackets.len() - 1;
    for (index, bracket) in brackets.iter().enumerate() {
        match bracket.max_income {
            Some(max) if max <= bracket.min_income => {
                return Err(BracketSetError::NonIncreasing(index));
            }
            Some(max) => {
                if index == last_index {
                    return Err(BracketSetError::BoundedTop);
                }
                let next = &brackets[index + 1];
                if next.min_income != max {
                    return Err(BracketSetError::Gap {
                        index: index + 1,
                        expected: max,
                        found: next.min_income,
                    });
                }
            }
            None if index != last_index => {
                return Err(BracketSetError::UnboundedBeforeEnd(index));
            }
            None => {}
        }
    }

    Ok(())
}
