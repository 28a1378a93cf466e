//! Fixed-size circular ring of labeled elements for the Orbit simulation.
//!
//! A [`Ring`] holds a set of unique positive integer labels arranged in a
//! circle. Every element knows its successor and predecessor, and every
//! label can be found in O(1), so the operations the simulation performs
//! once per round never depend on the ring size:
//!
//! | Operation | Cost |
//! |-----------|------|
//! | [`Ring::contains`] | O(1) |
//! | [`Ring::successor`] / [`Ring::predecessor`] | O(1) |
//! | [`Ring::relocate`] | O(run length) |
//! | [`Ring::advance`] | O(\|offset\|) |
//! | [`Ring::linearize`] | O(length) |
//!
//! # Storage
//!
//! Nodes live in a single arena (`Vec`) and refer to each other by slot
//! index. The label index maps each label to its slot and is built once at
//! construction. The node count never changes after construction, so no
//! allocation happens while the ring is being mutated.
//!
//! # Usage
//!
//! ```
//! use orbit_ring::Ring;
//!
//! let mut ring = Ring::new([3, 8, 9, 1, 2, 5, 4, 6, 7])?;
//!
//! // Move the run 8, 9, 1 so it follows 2.
//! ring.relocate(2, 8, 3)?;
//! assert_eq!(ring.linearize(None, None)?, vec![3, 2, 8, 9, 1, 5, 4, 6, 7]);
//! # Ok::<(), orbit_ring::RingError>(())
//! ```

pub mod error;
mod index;
pub mod ring;

// Re-export primary types at crate root.
pub use error::RingError;
pub use ring::{Iter, Ring};

/// A ring element's label. Doubles as its lookup key.
///
/// Labels are strictly positive; `0` is rejected at construction.
pub type Label = u32;
