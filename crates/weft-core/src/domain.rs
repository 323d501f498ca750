//! Rectangular domains.
//!
//! A [`Domain`] is the cross-product of N bounded ranges. It is a cheap
//! handle over an `Arc`'d domain-map implementation (see the dmap module),
//! so clones share the underlying layout and passing domains around is
//! free.
//!
//! ## Canonical order
//!
//! Iteration is row-major with the innermost (last) dimension varying
//! fastest. [`Domain::index_order`] and [`Domain::order_to_index`] form a
//! bijection between members and `0..size()`, built from the per-dimension
//! range mappings.
//!
//! ## Example
//!
//! ```
//! use weft_core::{Domain, Range, Tuple};
//!
//! let d = Domain::new([Range::new(0, 3), Range::new(0, 3)]);
//! assert_eq!(d.size(), 16);
//! assert_eq!(d.index_order((1, 2)), 6);
//! assert_eq!(d.order_to_index(6), Tuple([1, 2]));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::dmap::{DefaultDist, Distribution, RectangularDom};
use crate::index::IndexValue;
use crate::iterand::Iterand;
use crate::locale::Locale;
use crate::range::Range;
use crate::tuple::Tuple;

/// A rank-N rectangular index set.
#[derive(Clone)]
pub struct Domain<const N: usize, T: IndexValue = i64> {
    inner: Arc<dyn RectangularDom<N, T>>,
}

impl<const N: usize, T: IndexValue> Domain<N, T> {
    /// Creates a domain over `ranges` with the default single-locale
    /// layout. All ranges must be bounded.
    pub fn new(ranges: [Range<T>; N]) -> Self {
        Self::with_dist(ranges, Arc::new(DefaultDist::new(Locale::default())))
    }

    /// Creates a domain over `ranges` laid out by `dist`.
    pub fn with_dist(ranges: [Range<T>; N], dist: Arc<dyn Distribution<N, T>>) -> Self {
        for range in &ranges {
            assert!(
                range.is_bounded(),
                "rectangular domains require bounded ranges, got {range}"
            );
        }
        Domain {
            inner: dist.new_rectangular_dom(ranges),
        }
    }

    /// The rank.
    pub fn rank(&self) -> usize {
        N
    }

    /// The per-dimension ranges.
    pub fn dims(&self) -> [Range<T>; N] {
        self.inner.dims()
    }

    /// The range of dimension `dim`.
    pub fn dim(&self, dim: usize) -> Range<T> {
        self.dims()[dim]
    }

    /// The number of indices.
    pub fn size(&self) -> i64 {
        self.inner.num_indices()
    }

    /// True when the domain has no indices.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// The per-dimension sizes.
    pub fn shape(&self) -> Tuple<i64, N> {
        Tuple(self.dims().map(|r| r.size()))
    }

    /// The per-dimension low bounds.
    pub fn low_bound(&self) -> Tuple<T, N> {
        Tuple(self.dims().map(|r| r.low_bound()))
    }

    /// The per-dimension high bounds.
    pub fn high_bound(&self) -> Tuple<T, N> {
        Tuple(self.dims().map(|r| r.high_bound()))
    }

    /// The per-dimension first members in iteration order.
    pub fn first(&self) -> Tuple<T, N> {
        Tuple(self.dims().map(|r| r.first()))
    }

    /// The per-dimension last members in iteration order.
    pub fn last(&self) -> Tuple<T, N> {
        Tuple(self.dims().map(|r| r.last()))
    }

    /// The per-dimension smallest members.
    pub fn low(&self) -> Tuple<T, N> {
        Tuple(self.dims().map(|r| r.low()))
    }

    /// The per-dimension largest members.
    pub fn high(&self) -> Tuple<T, N> {
        Tuple(self.dims().map(|r| r.high()))
    }

    /// The per-dimension strides.
    pub fn stride(&self) -> Tuple<i64, N> {
        Tuple(self.dims().map(|r| r.stride()))
    }

    /// The per-dimension alignments. Aborts when a dimension's alignment is
    /// ambiguous, which cannot happen for domains built from bounded
    /// ranges.
    pub fn alignment(&self) -> Tuple<T, N> {
        Tuple(self.dims().map(|r| {
            r.alignment()
                .unwrap_or_else(|| panic!("dimension {r} has ambiguous alignment"))
        }))
    }

    /// True when `idx` is a member.
    pub fn contains(&self, idx: impl Into<Tuple<T, N>>) -> bool {
        self.inner.member(idx.into())
    }

    /// True when every index of `other` is a member of `self`.
    pub fn contains_domain(&self, other: &Domain<N, T>) -> bool {
        self.dims()
            .iter()
            .zip(other.dims())
            .all(|(mine, theirs)| mine.contains_range(&theirs))
    }

    /// The canonical iteration ordinal of `idx`, −1 for non-members.
    pub fn index_order(&self, idx: impl Into<Tuple<T, N>>) -> i64 {
        self.inner.index_order(idx.into())
    }

    /// The index at canonical iteration ordinal `order`.
    pub fn order_to_index(&self, order: i64) -> Tuple<T, N> {
        self.inner.order_to_index(order)
    }

    /// The distribution laying out this domain.
    pub fn dist(&self) -> Arc<dyn Distribution<N, T>> {
        self.inner.dist()
    }

    /// Rectangular domains are always bounded.
    pub fn is_bounded(&self) -> bool {
        true
    }

    /// Always true.
    pub fn is_rectangular(&self) -> bool {
        true
    }

    /// Always false.
    pub fn is_associative(&self) -> bool {
        false
    }

    /// Always false.
    pub fn is_irregular(&self) -> bool {
        false
    }

    /// Always false.
    pub fn is_sparse(&self) -> bool {
        false
    }

    /// Applies [`Range::by`] per dimension.
    pub fn by(&self, step: impl Into<Tuple<i64, N>>) -> Domain<N, T> {
        let step = step.into();
        self.lift(|dim, position| dim.by(step[position]))
    }

    /// Applies the same stride multiplier to every dimension.
    pub fn by_all(&self, step: i64) -> Domain<N, T> {
        self.lift(|dim, _| dim.by(step))
    }

    /// Applies [`Range::align`] per dimension.
    pub fn align(&self, alignment: impl Into<Tuple<T, N>>) -> Domain<N, T> {
        let alignment = alignment.into();
        self.lift(|dim, position| dim.align(alignment[position]))
    }

    /// Applies [`Range::count`] per dimension.
    pub fn count(&self, n: impl Into<Tuple<i64, N>>) -> Domain<N, T> {
        let n = n.into();
        self.lift(|dim, position| dim.count(n[position]))
    }

    /// Intersects with `other` per dimension.
    pub fn slice(&self, other: &Domain<N, T>) -> Domain<N, T> {
        let theirs = other.dims();
        self.lift(|dim, position| dim.slice(&theirs[position]))
    }

    fn lift(&self, f: impl Fn(Range<T>, usize) -> Range<T>) -> Domain<N, T> {
        let mut ranges = self.dims();
        for (position, range) in ranges.iter_mut().enumerate() {
            *range = f(*range, position);
        }
        Domain::with_dist(ranges, self.dist())
    }

    /// Rectangular domains cannot grow. Always aborts.
    pub fn add(&mut self, _idx: impl Into<Tuple<T, N>>) -> bool {
        panic!("cannot add indices to a rectangular domain");
    }

    /// Rectangular domains cannot shrink. Always aborts.
    pub fn remove(&mut self, _idx: impl Into<Tuple<T, N>>) -> bool {
        panic!("cannot remove indices from a rectangular domain");
    }

    /// Rectangular domains cannot be cleared. Always aborts.
    pub fn clear(&mut self) {
        panic!("cannot clear a rectangular domain");
    }

    /// Iterates the members in canonical row-major order.
    pub fn iter(&self) -> DomainIter<N, T> {
        let dims = self.dims();
        let sizes = dims.map(|r| r.size());
        DomainIter {
            dims,
            sizes,
            position: [0; N],
            done: sizes.iter().any(|&s| s == 0),
        }
    }
}

impl<const N: usize, T: IndexValue> Default for Domain<N, T> {
    fn default() -> Self {
        Domain::new([Range::default(); N])
    }
}

impl<const N: usize, T: IndexValue> PartialEq for Domain<N, T> {
    fn eq(&self, other: &Self) -> bool {
        self.dims() == other.dims()
    }
}

impl<const N: usize, T: IndexValue> Eq for Domain<N, T> {}

impl<const N: usize, T: IndexValue> From<[Range<T>; N]> for Domain<N, T> {
    fn from(ranges: [Range<T>; N]) -> Self {
        Domain::new(ranges)
    }
}

impl<T: IndexValue> From<Range<T>> for Domain<1, T> {
    fn from(range: Range<T>) -> Self {
        Domain::new([range])
    }
}

impl<const N: usize, T: IndexValue> fmt::Debug for Domain<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain").field("dims", &self.dims()).finish()
    }
}

impl<const N: usize, T: IndexValue> fmt::Display for Domain<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, dim) in self.dims().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{dim}")?;
        }
        write!(f, "}}")
    }
}

impl<const N: usize, T: IndexValue> Iterand for Domain<N, T> {
    type Item = Tuple<T, N>;

    fn is_iterable(&self) -> bool {
        true
    }

    fn is_bounded(&self) -> bool {
        true
    }

    fn bounded_size(&self) -> Option<i64> {
        Some(self.size())
    }

    fn item_at(&self, order: i64) -> Tuple<T, N> {
        self.order_to_index(order)
    }
}

/// Odometer-style iterator over a domain's members.
pub struct DomainIter<const N: usize, T: IndexValue> {
    dims: [Range<T>; N],
    sizes: [i64; N],
    position: [i64; N],
    done: bool,
}

impl<const N: usize, T: IndexValue> Iterator for DomainIter<N, T> {
    type Item = Tuple<T, N>;

    fn next(&mut self) -> Option<Tuple<T, N>> {
        if self.done {
            return None;
        }
        let mut out = [T::zero(); N];
        for (slot, (dim, &order)) in out
            .iter_mut()
            .zip(self.dims.iter().zip(self.position.iter()))
        {
            *slot = dim.order_to_index(order);
        }
        // Advance with the innermost dimension varying fastest.
        self.done = true;
        for position in (0..N).rev() {
            self.position[position] += 1;
            if self.position[position] < self.sizes[position] {
                self.done = false;
                break;
            }
            self.position[position] = 0;
        }
        Some(Tuple(out))
    }
}

impl<const N: usize, T: IndexValue> IntoIterator for &Domain<N, T> {
    type Item = Tuple<T, N>;
    type IntoIter = DomainIter<N, T>;

    fn into_iter(self) -> DomainIter<N, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_queries() {
        let d = Domain::new([Range::new(0, 3), Range::new(0, 3)]);
        assert_eq!(d.rank(), 2);
        assert_eq!(d.size(), 16);
        assert_eq!(d.shape(), Tuple([4, 4]));
        assert_eq!(d.low_bound(), Tuple([0, 0]));
        assert_eq!(d.high_bound(), Tuple([3, 3]));
        assert_eq!(d.stride(), Tuple([1, 1]));
        assert!(d.is_rectangular() && !d.is_associative());
        assert!(d.contains((2, 3)));
        assert!(!d.contains((4, 0)));
    }

    #[test]
    fn test_equality_compares_dims() {
        let a = Domain::new([Range::new(1, 4)]);
        let b = Domain::new([Range::new(1, 4)]);
        let c = Domain::new([Range::new(1, 5)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Domain::default());
    }

    #[test]
    fn test_canonical_iteration_order() {
        let d = Domain::new([Range::new(0, 1), Range::new(0, 2)]);
        let members: Vec<_> = d.iter().collect();
        assert_eq!(
            members,
            vec![
                Tuple([0, 0]),
                Tuple([0, 1]),
                Tuple([0, 2]),
                Tuple([1, 0]),
                Tuple([1, 1]),
                Tuple([1, 2]),
            ]
        );
        for (order, idx) in members.iter().enumerate() {
            assert_eq!(d.index_order(*idx), order as i64);
            assert_eq!(d.order_to_index(order as i64), *idx);
        }
    }

    #[test]
    fn test_empty_domain_iterates_nothing() {
        let d = Domain::new([Range::new(1, 0), Range::new(0, 5)]);
        assert!(d.is_empty());
        assert_eq!(d.iter().count(), 0);
    }

    #[test]
    fn test_rank3_round_trip() {
        let d = Domain::new([Range::new(1, 2), Range::new(0, 3), Range::new(5, 7)]);
        assert_eq!(d.size(), 2 * 4 * 3);
        for order in 0..d.size() {
            let idx = d.order_to_index(order);
            assert_eq!(d.index_order(idx), order);
        }
        let members: Vec<_> = d.iter().collect();
        assert_eq!(members.len() as i64, d.size());
        assert_eq!(members[0], Tuple([1, 0, 5]));
        assert_eq!(members[1], Tuple([1, 0, 6]));
    }

    #[test]
    fn test_transforms() {
        let d = Domain::new([Range::new(0, 9), Range::new(0, 9)]);
        let strided = d.by((2, 5));
        assert_eq!(strided.shape(), Tuple([5, 2]));

        let all = d.by_all(2);
        assert_eq!(all.shape(), Tuple([5, 5]));

        let counted = d.count((2, -2));
        assert_eq!(counted.dim(0), Range::new(0, 1));
        assert_eq!(counted.dim(1), Range::new(8, 9));

        let sliced = d.slice(&Domain::new([Range::new(5, 12), Range::new(-3, 4)]));
        assert_eq!(sliced.dim(0), Range::new(5, 9));
        assert_eq!(sliced.dim(1), Range::new(0, 4));
    }

    #[test]
    fn test_contains_domain() {
        let outer = Domain::new([Range::new(0, 9), Range::new(0, 9)]);
        assert!(outer.contains_domain(&Domain::new([Range::new(2, 4), Range::new(0, 9)])));
        assert!(!outer.contains_domain(&Domain::new([Range::new(2, 14), Range::new(0, 9)])));
    }

    #[test]
    #[should_panic(expected = "rectangular domain")]
    fn test_add_panics() {
        let mut d = Domain::new([Range::new(0, 3)]);
        d.add((1,));
    }

    #[test]
    fn test_display() {
        let d = Domain::new([Range::new(1, 4), Range::new(0, 2)]);
        assert_eq!(d.to_string(), "{1..4, 0..2}");
    }

    #[test]
    fn test_rank1_from_range() {
        let d: Domain<1> = Range::new(1, 10).into();
        assert_eq!(d.size(), 10);
        assert_eq!(d.index_order((4,)), 3);
    }
}
