//! Associative domains.
//!
//! An [`AssocDomain`] is an explicit set of indices kept sorted in a flat
//! vector. Iteration order is ascending, and a member's iteration ordinal
//! is its rank in that order, so the order mapping stays consistent under
//! insertion and removal.
//!
//! [`IndexBuffer`] batches insertions: single-element inserts into a sorted
//! vector are linear, so bulk loads stage indices and merge them in one
//! pass.

use std::fmt;

use crate::iterand::Iterand;

/// A sorted explicit set of indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssocDomain<I> {
    // Sorted, no duplicates.
    indices: Vec<I>,
}

impl<I: Ord + Clone> AssocDomain<I> {
    /// Creates an empty domain.
    pub fn new() -> Self {
        AssocDomain {
            indices: Vec::new(),
        }
    }

    /// Adds `idx`, returning false if it was already present.
    pub fn add(&mut self, idx: I) -> bool {
        match self.indices.binary_search(&idx) {
            Ok(_) => false,
            Err(position) => {
                self.indices.insert(position, idx);
                true
            }
        }
    }

    /// Removes `idx`, returning false if it was absent.
    pub fn remove(&mut self, idx: &I) -> bool {
        match self.indices.binary_search(idx) {
            Ok(position) => {
                self.indices.remove(position);
                true
            }
            Err(_) => false,
        }
    }

    /// Removes all indices.
    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// True when `idx` is a member.
    pub fn contains(&self, idx: &I) -> bool {
        self.indices.binary_search(idx).is_ok()
    }

    /// The number of members.
    pub fn size(&self) -> i64 {
        self.indices.len() as i64
    }

    /// True when the domain has no members.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The rank of `idx` in ascending order, −1 when absent.
    pub fn index_order(&self, idx: &I) -> i64 {
        match self.indices.binary_search(idx) {
            Ok(position) => position as i64,
            Err(_) => -1,
        }
    }

    /// The member at rank `order`. Aborts when out of range.
    pub fn order_to_index(&self, order: i64) -> I {
        assert!(
            order >= 0 && order < self.size(),
            "iteration order {order} out of range (size {})",
            self.size()
        );
        self.indices[order as usize].clone()
    }

    /// Iterates the members in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, I> {
        self.indices.iter()
    }

    /// Associative domains are always bounded.
    pub fn is_bounded(&self) -> bool {
        true
    }

    /// Associative domains are always iterable.
    pub fn is_iterable(&self) -> bool {
        true
    }

    /// Always true.
    pub fn is_associative(&self) -> bool {
        true
    }

    /// Always false.
    pub fn is_rectangular(&self) -> bool {
        false
    }

    /// Opens an [`IndexBuffer`] staging up to `capacity` insertions into
    /// this domain.
    pub fn create_index_buffer(&mut self, capacity: usize) -> IndexBuffer<'_, I> {
        IndexBuffer::new(self, capacity)
    }
}

impl<I: Ord + Clone> FromIterator<I> for AssocDomain<I> {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        let mut indices: Vec<I> = iter.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        AssocDomain { indices }
    }
}

impl<'a, I> IntoIterator for &'a AssocDomain<I> {
    type Item = &'a I;
    type IntoIter = std::slice::Iter<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter()
    }
}

impl<I: Ord + Clone + Send> Iterand for AssocDomain<I> {
    type Item = I;

    fn is_iterable(&self) -> bool {
        true
    }

    fn is_bounded(&self) -> bool {
        true
    }

    fn bounded_size(&self) -> Option<i64> {
        Some(self.size())
    }

    fn item_at(&self, order: i64) -> I {
        self.order_to_index(order)
    }
}

impl<I: fmt::Display> fmt::Display for AssocDomain<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, idx) in self.indices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{idx}")?;
        }
        write!(f, "}}")
    }
}

/// Batches insertions into an [`AssocDomain`].
///
/// Staged indices become visible on [`commit`](Self::commit), when the
/// buffer fills, or when it is dropped. The domain is exclusively borrowed
/// while the buffer is live.
pub struct IndexBuffer<'d, I: Ord + Clone> {
    domain: &'d mut AssocDomain<I>,
    staged: Vec<I>,
    capacity: usize,
}

impl<'d, I: Ord + Clone> IndexBuffer<'d, I> {
    /// Creates a buffer flushing into `domain` every `capacity` additions.
    pub fn new(domain: &'d mut AssocDomain<I>, capacity: usize) -> Self {
        assert!(capacity > 0, "index buffer capacity must be positive");
        IndexBuffer {
            domain,
            staged: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Stages `idx` for insertion.
    pub fn add(&mut self, idx: I) {
        self.staged.push(idx);
        if self.staged.len() >= self.capacity {
            self.flush();
        }
    }

    /// Makes all staged indices visible in the domain.
    pub fn commit(&mut self) {
        self.flush();
    }

    fn flush(&mut self) {
        if self.staged.is_empty() {
            return;
        }
        self.staged.sort_unstable();
        self.staged.dedup();
        let existing = std::mem::take(&mut self.domain.indices);
        let mut merged = Vec::with_capacity(existing.len() + self.staged.len());
        let mut cursor = 0;
        for idx in self.staged.drain(..) {
            while cursor < existing.len() && existing[cursor] < idx {
                merged.push(existing[cursor].clone());
                cursor += 1;
            }
            if cursor < existing.len() && existing[cursor] == idx {
                // Already present; the existing copy is pushed by a later pass.
                continue;
            }
            merged.push(idx);
        }
        merged.extend_from_slice(&existing[cursor..]);
        self.domain.indices = merged;
    }
}

impl<I: Ord + Clone> Drop for IndexBuffer<'_, I> {
    fn drop(&mut self) {
        self.flush();
    }
}
