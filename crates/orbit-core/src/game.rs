//! Game state and the single-round step.
//!
//! Each round, given the current label `c`:
//!
//! 1. **Pick up** -- the run of `pickup_len` labels following `c`.
//! 2. **Select destination** -- count down from `c - 1`, wrapping from
//!    [`MIN_LABEL`] to the largest label, skipping any picked-up label.
//! 3. **Relocate** -- move the picked-up run so it follows the destination.
//! 4. **Advance** -- the new current label is whatever now follows `c`.
//!
//! The ring size never changes after construction, so the destination
//! search is bounded by the size recorded when the game was built.

use orbit_ring::{Label, Ring, RingError};
use tracing::debug;

use crate::score::{self, Answer, ScoringMode};

/// Lowest label in a game ring. Labels are exactly `MIN_LABEL..=N`.
pub const MIN_LABEL: Label = 1;

/// Number of labels picked up each round in the standard game.
pub const DEFAULT_PICKUP_LEN: usize = 3;

/// Errors that can occur while building or stepping a game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A ring operation failed.
    #[error("ring error: {source}")]
    Ring {
        /// The underlying ring error.
        #[from]
        source: RingError,
    },

    /// The labels are not exactly `1..=N`.
    #[error("labels must be exactly 1..={size}, found {min:?}..={max:?}")]
    NonContiguousLabels {
        /// Number of labels supplied.
        size: usize,
        /// Smallest label supplied.
        min: Option<Label>,
        /// Largest label supplied.
        max: Option<Label>,
    },

    /// The pick-up length leaves no room for a destination.
    #[error("pickup length {pickup_len} is invalid for a ring of {size} labels")]
    InvalidPickupLength {
        /// Requested pick-up length.
        pickup_len: usize,
        /// Number of labels in the ring.
        size: usize,
    },

    /// The requested start label is not in the ring.
    #[error("start label {0} not found")]
    StartNotFound(Label),

    /// The destination search looked at every label without a match.
    #[error("destination search from {current} gave up after {attempts} attempts")]
    DestinationSearchStuck {
        /// Current label when the search started.
        current: Label,
        /// Number of candidates examined.
        attempts: usize,
    },

    /// The round counter would overflow.
    #[error("round counter overflow")]
    RoundOverflow,
}

/// A game in progress: the ring plus the current label.
#[derive(Debug, Clone)]
pub struct Game {
    /// The ring being rearranged.
    ring: Ring,
    /// Label whose followers are picked up next round.
    current: Label,
    /// Largest label; the destination search wraps to it.
    max_label: Label,
    /// Ring size recorded at construction.
    size: usize,
    /// Length of the picked-up run.
    pickup_len: usize,
    /// Picked-up labels for the round in progress. Reused every round.
    picked: Vec<Label>,
    /// Rounds completed so far.
    round: u64,
}

impl Game {
    /// Build a game from labels in ring order.
    ///
    /// `start` selects the first current label; it defaults to the first
    /// label supplied.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Ring`] if the ring cannot be built,
    /// [`GameError::NonContiguousLabels`] unless the labels are exactly
    /// `1..=N`, [`GameError::InvalidPickupLength`] unless
    /// `1 <= pickup_len < N - 1`, and [`GameError::StartNotFound`] if
    /// `start` is not a label.
    pub fn new(
        labels: Vec<Label>,
        pickup_len: usize,
        start: Option<Label>,
    ) -> Result<Self, GameError> {
        let first = labels.first().copied();
        let ring = Ring::new(labels)?;
        let size = ring.len();

        // Distinct labels spanning 1..=size can only be exactly 1..=size.
        let max_label = match (ring.min_label(), ring.max_label()) {
            (Some(MIN_LABEL), Some(max)) if usize::try_from(max).ok() == Some(size) => max,
            (min, max) => return Err(GameError::NonContiguousLabels { size, min, max }),
        };

        if pickup_len == 0 || pickup_len.saturating_add(2) > size {
            return Err(GameError::InvalidPickupLength { pickup_len, size });
        }

        let current = match start {
            Some(label) if ring.contains(label) => label,
            Some(label) => return Err(GameError::StartNotFound(label)),
            None => first.ok_or(GameError::NonContiguousLabels {
                size,
                min: None,
                max: None,
            })?,
        };

        debug!(size, pickup_len, current, "game created");

        Ok(Self {
            ring,
            current,
            max_label,
            size,
            pickup_len,
            picked: Vec::with_capacity(pickup_len),
            round: 0,
        })
    }

    /// Return the ring in its current arrangement.
    pub const fn ring(&self) -> &Ring {
        &self.ring
    }

    /// Return the current label.
    pub const fn current(&self) -> Label {
        self.current
    }

    /// Return the number of rounds played.
    pub const fn round(&self) -> u64 {
        self.round
    }

    /// Return the ring size recorded at construction.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Return the picked-up run length.
    pub const fn pickup_len(&self) -> usize {
        self.pickup_len
    }

    /// Play one round and return the new current label.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Ring`] if a ring lookup fails and
    /// [`GameError::DestinationSearchStuck`] if no destination exists. Both
    /// mean the ring no longer satisfies the game's preconditions.
    pub fn step(&mut self) -> Result<Label, GameError> {
        let head = self.pick_up()?;
        let destination = self.select_destination()?;
        self.ring.relocate(destination, head, self.pickup_len)?;
        self.current = self.ring.successor(self.current)?;
        self.round = self.round.checked_add(1).ok_or(GameError::RoundOverflow)?;
        Ok(self.current)
    }

    /// Score the ring in its current arrangement.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::NotFound`] if label 1 is missing.
    pub fn score(&self, mode: ScoringMode) -> Result<Answer, RingError> {
        score::score(&self.ring, mode)
    }

    /// Fill the pick-up buffer with the run after the current label and
    /// return the run's first label.
    fn pick_up(&mut self) -> Result<Label, GameError> {
        self.picked.clear();
        let head = self.ring.successor(self.current)?;
        self.picked.push(head);

        let mut cursor = head;
        for _ in 1..self.pickup_len {
            cursor = self.ring.successor(cursor)?;
            self.picked.push(cursor);
        }
        Ok(head)
    }

    /// Count down from the current label to the first label that is in the
    /// ring and was not picked up.
    fn select_destination(&self) -> Result<Label, GameError> {
        let mut candidate = self.current;
        for _ in 0..self.size {
            candidate = self.wrapping_decrement(candidate);
            if !self.picked.contains(&candidate) && self.ring.contains(candidate) {
                return Ok(candidate);
            }
        }
        Err(GameError::DestinationSearchStuck {
            current: self.current,
            attempts: self.size,
        })
    }

    /// `label - 1`, wrapping below [`MIN_LABEL`] to the largest label.
    fn wrapping_decrement(&self, label: Label) -> Label {
        label
            .checked_sub(1)
            .filter(|&next| next >= MIN_LABEL)
            .unwrap_or(self.max_label)
    }
}
