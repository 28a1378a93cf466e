//! Error types for the `orbit-ring` crate.
//!
//! Every fallible ring operation returns [`RingError`]. None of these are
//! transient: they all indicate a broken precondition in the caller or a
//! corrupted ring.

use crate::Label;

/// Errors that can occur during ring construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    /// A referenced label is not present in the ring.
    #[error("label {0} not found in ring")]
    NotFound(Label),

    /// The same label was supplied more than once at construction.
    #[error("duplicate label {0}")]
    DuplicateLabel(Label),

    /// A label outside the valid (strictly positive) range was supplied.
    #[error("invalid label {0}: labels must be positive")]
    InvalidLabel(Label),

    /// The run to relocate contains the destination it should follow.
    #[error(
        "cannot relocate {length} labels starting at {source_start}: run contains destination {destination}"
    )]
    RelocateOverlap {
        /// The label the run was to be placed after.
        destination: Label,
        /// The first label of the run.
        source_start: Label,
        /// The requested run length.
        length: usize,
    },

    /// The requested linearization is too long to allocate.
    #[error("cannot linearize {0} labels: allocation failed")]
    LengthTooLarge(usize),

    /// The internal link structure is inconsistent.
    #[error("ring corrupted: {0}")]
    Corrupted(&'static str),
}
