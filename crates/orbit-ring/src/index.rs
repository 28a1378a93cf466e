//! Label to slot lookup.
//!
//! Built once from the full label set and never resized afterwards. Dense
//! label sets (the common case, `1..=N`) get a direct-address table; sparse
//! ones fall back to a hash map.

use std::collections::HashMap;

use crate::{Label, RingError};

/// Maximum direct-address entries allowed per label before the index
/// switches to a hash map.
const DENSE_SPREAD: usize = 4;

/// Mapping from label to arena slot.
#[derive(Debug, Clone)]
pub(crate) enum LabelIndex {
    /// Direct-address table indexed by label.
    Dense(Vec<Option<usize>>),
    /// Hash map for widely spread labels.
    Sparse(HashMap<Label, usize>),
}

impl Default for LabelIndex {
    fn default() -> Self {
        Self::Dense(Vec::new())
    }
}

impl LabelIndex {
    /// Create an empty index sized for the given labels.
    pub(crate) fn for_labels(labels: &[Label]) -> Self {
        let Some(max) = labels.iter().copied().max() else {
            return Self::default();
        };
        let span = usize::try_from(max).ok().and_then(|m| m.checked_add(1));
        let limit = labels
            .len()
            .saturating_mul(DENSE_SPREAD)
            .saturating_add(DENSE_SPREAD);

        match span {
            Some(span) if span <= limit => Self::Dense(vec![None; span]),
            _ => Self::Sparse(HashMap::with_capacity(labels.len())),
        }
    }

    /// Record `label` at `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::DuplicateLabel`] if the label is already
    /// indexed, or [`RingError::Corrupted`] if a dense table was sized for a
    /// different label set.
    pub(crate) fn insert(&mut self, label: Label, slot: usize) -> Result<(), RingError> {
        match self {
            Self::Dense(table) => {
                let entry = usize::try_from(label)
                    .ok()
                    .and_then(|i| table.get_mut(i))
                    .ok_or(RingError::Corrupted("label outside dense index range"))?;
                if entry.is_some() {
                    return Err(RingError::DuplicateLabel(label));
                }
                *entry = Some(slot);
            }
            Self::Sparse(map) => {
                if map.contains_key(&label) {
                    return Err(RingError::DuplicateLabel(label));
                }
                map.insert(label, slot);
            }
        }
        Ok(())
    }

    /// Look up the slot for `label`.
    pub(crate) fn get(&self, label: Label) -> Option<usize> {
        match self {
            Self::Dense(table) => usize::try_from(label)
                .ok()
                .and_then(|i| table.get(i))
                .copied()
                .flatten(),
            Self::Sparse(map) => map.get(&label).copied(),
        }
    }

    /// Number of indexed labels.
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Dense(table) => table.iter().filter(|entry| entry.is_some()).count(),
            Self::Sparse(map) => map.len(),
        }
    }

    /// Whether this index uses the direct-address table.
    pub(crate) const fn is_dense(&self) -> bool {
        matches!(self, Self::Dense(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_labels_use_dense_table() {
        let index = LabelIndex::for_labels(&[3, 1, 2]);
        assert!(index.is_dense());
    }

    #[test]
    fn spread_labels_use_hash_map() {
        let index = LabelIndex::for_labels(&[1, 1_000_000]);
        assert!(!index.is_dense());
    }

    #[test]
    fn insert_and_get_dense() {
        let mut index = LabelIndex::for_labels(&[1, 2, 3]);
        assert!(index.insert(2, 0).is_ok());
        assert_eq!(index.get(2), Some(0));
        assert_eq!(index.get(3), None);
        assert_eq!(index.get(99), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn duplicate_rejected_in_both_layouts() {
        let mut dense = LabelIndex::for_labels(&[1, 2]);
        let _ = dense.insert(1, 0);
        assert_eq!(dense.insert(1, 1), Err(RingError::DuplicateLabel(1)));

        let mut sparse = LabelIndex::for_labels(&[5, 900_000]);
        let _ = sparse.insert(900_000, 0);
        assert_eq!(
            sparse.insert(900_000, 1),
            Err(RingError::DuplicateLabel(900_000))
        );
    }
}
