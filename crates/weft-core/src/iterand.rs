//! The loop-target contract.
//!
//! Everything the loop constructs can run over — ranges, domains,
//! associative domains, homogeneous tuples, arrays, and zip ranges —
//! implements [`Iterand`]: an ordered sequence addressable by iteration
//! ordinal. Random access by ordinal is what lets `forall` hand disjoint
//! ordinal blocks to worker threads without coordination.

/// An ordered index sequence with random access by iteration ordinal.
pub trait Iterand {
    /// The values the sequence yields.
    type Item;

    /// True when the sequence can serve as a loop target.
    fn is_iterable(&self) -> bool;

    /// True when the sequence has a finite extent.
    fn is_bounded(&self) -> bool;

    /// The number of items, `None` for unbounded sequences.
    fn bounded_size(&self) -> Option<i64>;

    /// The item at iteration ordinal `order`.
    fn item_at(&self, order: i64) -> Self::Item;
}

impl<T: crate::index::IndexValue> Iterand for crate::range::Range<T> {
    type Item = T;

    fn is_iterable(&self) -> bool {
        Self::is_iterable(self)
    }

    fn is_bounded(&self) -> bool {
        Self::is_bounded(self)
    }

    fn bounded_size(&self) -> Option<i64> {
        Self::is_bounded(self).then(|| self.size())
    }

    fn item_at(&self, order: i64) -> T {
        self.order_to_index(order)
    }
}

impl<T: Clone, const N: usize> Iterand for crate::tuple::Tuple<T, N> {
    type Item = T;

    fn is_iterable(&self) -> bool {
        true
    }

    fn is_bounded(&self) -> bool {
        true
    }

    fn bounded_size(&self) -> Option<i64> {
        Some(N as i64)
    }

    fn item_at(&self, order: i64) -> T {
        self.0[order as usize].clone()
    }
}
