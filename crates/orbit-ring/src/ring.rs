//! The ring: a circular doubly-linked arena with O(1) label lookup.
//!
//! # Design
//!
//! - **Arena**: every node lives in one `Vec` and links to its neighbors by
//!   slot index. Slots are stable for the lifetime of the ring.
//! - **Explicit links**: every link change goes through [`Ring::link`],
//!   which updates both sides of the link at once.
//! - **Fixed size**: nodes are only added during construction. Relocation
//!   and traversal rewire links but never add or remove nodes.
//! - **Origin**: the first inserted node. It only defines the default
//!   starting point for iteration and linearization.

use core::fmt;

use tracing::debug;

use crate::index::LabelIndex;
use crate::{Label, RingError};

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// One ring element and its neighbor slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    label: Label,
    next: usize,
    prev: usize,
}

// ---------------------------------------------------------------------------
// Ring
// ---------------------------------------------------------------------------

/// A fixed-size circular sequence of unique labels.
///
/// Two rings are equal when they hold the same labels in the same circular
/// order, regardless of which label each one treats as its origin.
#[derive(Debug, Clone, Default)]
pub struct Ring {
    /// Node arena, in insertion order.
    nodes: Vec<Node>,
    /// Label to slot lookup, consistent with `nodes` at all times.
    index: LabelIndex,
    /// Slot of the first inserted node.
    origin: Option<usize>,
    /// Smallest label, recorded at construction.
    min_label: Option<Label>,
    /// Largest label, recorded at construction.
    max_label: Option<Label>,
}

impl Ring {
    /// Build a ring from labels in order.
    ///
    /// Each label becomes the successor of the one before it, and the last
    /// label's successor is the first.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::DuplicateLabel`] if a label repeats, or
    /// [`RingError::InvalidLabel`] for a zero label.
    pub fn new<I>(labels: I) -> Result<Self, RingError>
    where
        I: IntoIterator<Item = Label>,
    {
        let labels: Vec<Label> = labels.into_iter().collect();
        let mut ring = Self {
            nodes: Vec::with_capacity(labels.len()),
            index: LabelIndex::for_labels(&labels),
            origin: None,
            min_label: None,
            max_label: None,
        };

        for label in labels {
            ring.push_back(label)?;
        }

        debug!(
            size = ring.len(),
            dense_index = ring.index.is_dense(),
            "ring constructed"
        );
        Ok(ring)
    }

    /// Return the number of labels in the ring.
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return whether the ring holds no labels.
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Return whether `label` is in the ring.
    pub fn contains(&self, label: Label) -> bool {
        self.index.get(label).is_some()
    }

    /// Return the first inserted label.
    pub fn origin(&self) -> Option<Label> {
        self.origin
            .and_then(|slot| self.nodes.get(slot))
            .map(|node| node.label)
    }

    /// Return the smallest label in the ring.
    pub const fn min_label(&self) -> Option<Label> {
        self.min_label
    }

    /// Return the largest label in the ring.
    pub const fn max_label(&self) -> Option<Label> {
        self.max_label
    }

    /// Return the label immediately after `label`.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::NotFound`] if `label` is not in the ring.
    pub fn successor(&self, label: Label) -> Result<Label, RingError> {
        let next = self.node(self.slot_of(label)?)?.next;
        Ok(self.node(next)?.label)
    }

    /// Return the label immediately before `label`.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::NotFound`] if `label` is not in the ring.
    pub fn predecessor(&self, label: Label) -> Result<Label, RingError> {
        let prev = self.node(self.slot_of(label)?)?.prev;
        Ok(self.node(prev)?.label)
    }

    /// Return the label `offset` steps away from `label`.
    ///
    /// Positive offsets walk forward, negative offsets walk backward, and
    /// zero returns `label` itself. The walk is O(|offset|); it is meant for
    /// short hops, not for traversal (use [`linearize`] for that).
    ///
    /// # Errors
    ///
    /// Returns [`RingError::NotFound`] if `label` is not in the ring.
    ///
    /// [`linearize`]: Ring::linearize
    pub fn advance(&self, label: Label, offset: isize) -> Result<Label, RingError> {
        let slot = self.walk(self.slot_of(label)?, offset)?;
        Ok(self.node(slot)?.label)
    }

    /// Move the run of `length` labels starting at `source_start` so that it
    /// follows `destination`, keeping the run's internal order.
    ///
    /// Only the three links around the cut and the insertion point are
    /// rewritten; the cost does not depend on the ring size or on the
    /// distance between source and destination. Nothing changes when the
    /// run already follows `destination` or when `length` is zero.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::NotFound`] if either label is absent, or
    /// [`RingError::RelocateOverlap`] if the run would contain
    /// `destination`.
    pub fn relocate(
        &mut self,
        destination: Label,
        source_start: Label,
        length: usize,
    ) -> Result<(), RingError> {
        let dst = self.slot_of(destination)?;
        let head = self.slot_of(source_start)?;
        if length == 0 {
            return Ok(());
        }

        let dst_next = self.node(dst)?.next;
        if dst_next == head {
            return Ok(());
        }

        let overlap = RingError::RelocateOverlap {
            destination,
            source_start,
            length,
        };
        if length >= self.len() || head == dst {
            return Err(overlap);
        }

        let mut tail = head;
        for _ in 1..length {
            tail = self.node(tail)?.next;
            if tail == dst {
                return Err(overlap);
            }
        }

        let head_prev = self.node(head)?.prev;
        let tail_next = self.node(tail)?.next;

        // Close the gap, then splice the run in after the destination.
        self.link(head_prev, tail_next)?;
        self.link(dst, head)?;
        self.link(tail, dst_next)
    }

    /// Walk forward from `start` (default: the origin) collecting labels.
    ///
    /// Visits `length` nodes (default: every node once). Lengths beyond the
    /// ring size keep going around the circle.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::NotFound`] if `start` is given but absent, or
    /// [`RingError::LengthTooLarge`] if `length` labels cannot be allocated.
    pub fn linearize(
        &self,
        start: Option<Label>,
        length: Option<usize>,
    ) -> Result<Vec<Label>, RingError> {
        let first = match start {
            Some(label) => Some(self.slot_of(label)?),
            None => self.origin,
        };
        let Some(mut slot) = first else {
            return Ok(Vec::new());
        };

        let count = length.unwrap_or(self.len());
        let mut labels = Vec::new();
        labels
            .try_reserve_exact(count)
            .map_err(|_err| RingError::LengthTooLarge(count))?;
        for _ in 0..count {
            let node = self.node(slot)?;
            labels.push(node.label);
            slot = node.next;
        }
        Ok(labels)
    }

    /// Iterate once around the ring starting at the origin.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            ring: self,
            slot: self.origin,
            remaining: self.len(),
        }
    }

    /// Remove every label, resetting the lookup table and origin.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index = LabelIndex::default();
        self.origin = None;
        self.min_label = None;
        self.max_label = None;
    }

    /// Check every structural invariant of the ring.
    ///
    /// - Each node's successor links back to it, and its predecessor links
    ///   forward to it.
    /// - Following successors from the origin visits all nodes exactly once
    ///   before returning.
    /// - The lookup table has one entry per node, pointing at that node.
    ///
    /// This is O(N) and intended for tests and diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::Corrupted`] describing the first violation.
    pub fn verify(&self) -> Result<(), RingError> {
        let size = self.len();
        if self.index.len() != size {
            return Err(RingError::Corrupted(
                "lookup table size differs from node count",
            ));
        }

        for (slot, node) in self.nodes.iter().enumerate() {
            if self.index.get(node.label) != Some(slot) {
                return Err(RingError::Corrupted("lookup entry does not match node"));
            }
            if self.node(node.next)?.prev != slot {
                return Err(RingError::Corrupted("successor does not link back"));
            }
            if self.node(node.prev)?.next != slot {
                return Err(RingError::Corrupted("predecessor does not link forward"));
            }
        }

        let Some(origin) = self.origin else {
            return if size == 0 {
                Ok(())
            } else {
                Err(RingError::Corrupted("nodes present without an origin"))
            };
        };

        let mut slot = origin;
        for step in 1..=size {
            slot = self.node(slot)?.next;
            if slot == origin && step < size {
                return Err(RingError::Corrupted("cycle shorter than node count"));
            }
        }
        if slot != origin {
            return Err(RingError::Corrupted("walk did not return to origin"));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Append `label` after the current last node.
    fn push_back(&mut self, label: Label) -> Result<(), RingError> {
        if label == 0 {
            return Err(RingError::InvalidLabel(label));
        }

        let slot = self.len();
        self.index.insert(label, slot)?;

        match self.origin {
            None => {
                self.nodes.push(Node {
                    label,
                    next: slot,
                    prev: slot,
                });
                self.origin = Some(slot);
            }
            Some(origin) => {
                let tail = self.node(origin)?.prev;
                self.nodes.push(Node {
                    label,
                    next: slot,
                    prev: slot,
                });
                self.link(tail, slot)?;
                self.link(slot, origin)?;
            }
        }

        self.min_label = Some(self.min_label.map_or(label, |m| m.min(label)));
        self.max_label = Some(self.max_label.map_or(label, |m| m.max(label)));
        Ok(())
    }

    /// Make `to` the successor of `from` (and `from` the predecessor of `to`).
    fn link(&mut self, from: usize, to: usize) -> Result<(), RingError> {
        self.node_mut(from)?.next = to;
        self.node_mut(to)?.prev = from;
        Ok(())
    }

    /// Step `offset` links away from `slot`.
    fn walk(&self, mut slot: usize, offset: isize) -> Result<usize, RingError> {
        for _ in 0..offset.unsigned_abs() {
            let node = self.node(slot)?;
            slot = if offset > 0 { node.next } else { node.prev };
        }
        Ok(slot)
    }

    fn slot_of(&self, label: Label) -> Result<usize, RingError> {
        self.index.get(label).ok_or(RingError::NotFound(label))
    }

    fn node(&self, slot: usize) -> Result<&Node, RingError> {
        self.nodes
            .get(slot)
            .ok_or(RingError::Corrupted("slot out of range"))
    }

    fn node_mut(&mut self, slot: usize) -> Result<&mut Node, RingError> {
        self.nodes
            .get_mut(slot)
            .ok_or(RingError::Corrupted("slot out of range"))
    }
}

impl PartialEq for Ring {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let Some(origin) = self.origin else {
            return true;
        };

        // Align both walks on this ring's origin label.
        let Some(mut that) = self
            .nodes
            .get(origin)
            .and_then(|node| other.index.get(node.label))
        else {
            return false;
        };

        let mut this = origin;
        for _ in 0..self.len() {
            match (self.nodes.get(this), other.nodes.get(that)) {
                (Some(a), Some(b)) if a.label == b.label => {
                    this = a.next;
                    that = b.next;
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Ring {}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("->")?;
            }
            write!(f, "{label}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Iteration
// ---------------------------------------------------------------------------

/// Iterator over a ring's labels, once around from the origin.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    ring: &'a Ring,
    slot: Option<usize>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = Label;

    fn next(&mut self) -> Option<Label> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.ring.nodes.get(self.slot?)?;
        self.slot = Some(node.next);
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.label)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Ring {
    type Item = Label;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
