//! Reading the answer off the final ring.
//!
//! Both modes look at the labels that follow label 1 and never mutate the
//! ring.

use core::fmt;

use orbit_ring::{Label, Ring, RingError};
use serde::Deserialize;

use crate::game::MIN_LABEL;

/// How the final ring is turned into an answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Every label after label 1, concatenated in ring order.
    #[default]
    Labeling,
    /// The product of the two labels directly after label 1.
    Product,
}

/// The value read off the final ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Result of [`ScoringMode::Labeling`].
    Labels(String),
    /// Result of [`ScoringMode::Product`].
    Product(u64),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Labels(labels) => f.write_str(labels),
            Self::Product(product) => write!(f, "{product}"),
        }
    }
}

/// Score `ring` according to `mode`.
///
/// # Errors
///
/// Returns [`RingError::NotFound`] if label 1 is not in the ring.
pub fn score(ring: &Ring, mode: ScoringMode) -> Result<Answer, RingError> {
    match mode {
        ScoringMode::Labeling => labels_after_one(ring).map(Answer::Labels),
        ScoringMode::Product => product_after_one(ring).map(Answer::Product),
    }
}

/// Concatenate every label after label 1, once around the ring.
///
/// # Errors
///
/// Returns [`RingError::NotFound`] if label 1 is not in the ring.
pub fn labels_after_one(ring: &Ring) -> Result<String, RingError> {
    let labels = ring.linearize(Some(MIN_LABEL), None)?;
    Ok(labels
        .iter()
        .skip(1)
        .map(Label::to_string)
        .collect::<String>())
}

/// Multiply the two labels directly after label 1.
///
/// # Errors
///
/// Returns [`RingError::NotFound`] if label 1 is not in the ring.
pub fn product_after_one(ring: &Ring) -> Result<u64, RingError> {
    let first = ring.successor(MIN_LABEL)?;
    let second = ring.successor(first)?;
    // Two u32 factors always fit in a u64.
    Ok(u64::from(first).saturating_mul(u64::from(second)))
}
