//! Strided integer ranges.
//!
//! A [`Range`] describes the sequence of integers starting at its low bound
//! and stepping by `stride`, optionally missing one or both bounds. The
//! high bound is stored one past the largest representable member so that
//! closed and half-open constructors share a representation; missing bounds
//! are tracked explicitly and their slots pinned to the index type's
//! MIN/MAX values.
//!
//! ## Order mapping
//!
//! Every iterable range defines a bijection between its members and the
//! ordinals `0..size()`: [`Range::index_order`] maps a member to its
//! position in iteration order (or −1 for non-members) and
//! [`Range::order_to_index`] inverts it. Domains build their row-major
//! linearization out of these per-dimension mappings.
//!
//! ## Example
//!
//! ```
//! use weft_core::Range;
//!
//! let r = Range::new(1, 10).by(-2);
//! assert_eq!(r.first(), 10);
//! assert_eq!(r.last(), 2);
//! assert_eq!(r.size(), 5);
//! assert_eq!(r.iter().collect::<Vec<_>>(), vec![10, 8, 6, 4, 2]);
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::index::IndexValue;

/// Which of a range's two bounds are present.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BoundedKind {
    /// Both bounds present.
    Bounded,
    /// Low bound only.
    BoundedLow,
    /// High bound only.
    BoundedHigh,
    /// No bounds.
    BoundedNone,
}

impl BoundedKind {
    fn of(has_low: bool, has_high: bool) -> Self {
        match (has_low, has_high) {
            (true, true) => BoundedKind::Bounded,
            (true, false) => BoundedKind::BoundedLow,
            (false, true) => BoundedKind::BoundedHigh,
            (false, false) => BoundedKind::BoundedNone,
        }
    }

    /// True when the low bound is present.
    pub fn has_low_bound(self) -> bool {
        matches!(self, BoundedKind::Bounded | BoundedKind::BoundedLow)
    }

    /// True when the high bound is present.
    pub fn has_high_bound(self) -> bool {
        matches!(self, BoundedKind::Bounded | BoundedKind::BoundedHigh)
    }
}

/// A strided integer sequence with optionally missing bounds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Range<T: IndexValue = i64> {
    /// Inclusive low bound; pinned to `T::min_value()` when absent.
    first_index: T,
    /// One past the inclusive high bound; pinned to `T::max_value()` when
    /// absent.
    last_index: T,
    stride: i64,
    kind: BoundedKind,
    /// `None` means the alignment is ambiguous.
    alignment: Option<T>,
}

impl<T: IndexValue> Default for Range<T> {
    /// The canonical empty range.
    fn default() -> Self {
        Self::make(T::one(), T::one(), 1, BoundedKind::Bounded)
    }
}

impl<T: IndexValue> Range<T> {
    /// The closed range `low..=high` with stride 1.
    pub fn new(low: T, high: T) -> Self {
        Self::with_stride(low, high, 1)
    }

    /// The half-open range `low..<high` with stride 1.
    pub fn new_open(low: T, high: T) -> Self {
        Self::with_stride_open(low, high, 1)
    }

    /// The closed range `low..=high` stepping by `stride`.
    pub fn with_stride(low: T, high: T, stride: i64) -> Self {
        Self::make(low, high + T::one(), stride, BoundedKind::Bounded)
    }

    /// The half-open range `low..<high` stepping by `stride`.
    pub fn with_stride_open(low: T, high: T, stride: i64) -> Self {
        Self::make(low, high, stride, BoundedKind::Bounded)
    }

    /// The range `low..` without a high bound.
    pub fn from_low(low: T) -> Self {
        Self::from_low_by(low, 1)
    }

    /// The range `low..` stepping by `stride`.
    pub fn from_low_by(low: T, stride: i64) -> Self {
        Self::make(low, T::max_value(), stride, BoundedKind::BoundedLow)
    }

    /// The range `..high` without a low bound.
    pub fn to_high(high: T) -> Self {
        Self::to_high_by(high, 1)
    }

    /// The range `..high` stepping by `stride`.
    pub fn to_high_by(high: T, stride: i64) -> Self {
        Self::make(T::min_value(), high + T::one(), stride, BoundedKind::BoundedHigh)
    }

    /// The fully unbounded range `..`.
    pub fn unbounded() -> Self {
        Self::unbounded_by(1)
    }

    /// The fully unbounded range stepping by `stride`.
    pub fn unbounded_by(stride: i64) -> Self {
        Self::make(T::min_value(), T::max_value(), stride, BoundedKind::BoundedNone)
    }

    fn make(first_index: T, last_index: T, stride: i64, kind: BoundedKind) -> Self {
        assert!(stride != 0, "range stride must be non-zero");
        let first_index = if kind.has_low_bound() {
            first_index
        } else {
            T::min_value()
        };
        let last_index = if kind.has_high_bound() {
            last_index
        } else {
            T::max_value()
        };
        let alignment = if stride > 0 {
            kind.has_low_bound().then_some(first_index)
        } else {
            kind.has_high_bound().then(|| last_index - T::one())
        };
        Range {
            first_index,
            last_index,
            stride,
            kind,
            alignment,
        }
    }

    /// True when the low bound is present.
    pub fn has_low_bound(&self) -> bool {
        self.kind.has_low_bound()
    }

    /// True when the high bound is present.
    pub fn has_high_bound(&self) -> bool {
        self.kind.has_high_bound()
    }

    /// Which bounds are present.
    pub fn bounded_kind(&self) -> BoundedKind {
        self.kind
    }

    /// True when both bounds are present.
    pub fn is_bounded(&self) -> bool {
        self.kind == BoundedKind::Bounded
    }

    /// True when the range can serve as a loop target. A range missing its
    /// high bound still iterates (open-endedly) as long as iteration has a
    /// starting point.
    pub fn is_iterable(&self) -> bool {
        matches!(self.kind, BoundedKind::Bounded | BoundedKind::BoundedLow)
    }

    /// The inclusive low bound.
    pub fn low_bound(&self) -> T {
        assert!(self.has_low_bound(), "range has no low bound");
        self.first_index
    }

    /// The inclusive high bound.
    pub fn high_bound(&self) -> T {
        assert!(self.has_high_bound(), "range has no high bound");
        self.last_index - T::one()
    }

    /// The stride.
    pub fn stride(&self) -> i64 {
        self.stride
    }

    /// The alignment, `None` when ambiguous.
    pub fn alignment(&self) -> Option<T> {
        self.alignment
    }

    /// True when no unambiguous alignment is known.
    pub fn is_ambiguous(&self) -> bool {
        self.alignment.is_none()
    }

    /// True when the alignment coincides with the bound iteration starts
    /// from.
    pub fn is_naturally_aligned(&self) -> bool {
        match self.alignment {
            Some(a) if self.stride > 0 && self.has_low_bound() => a == self.low_bound(),
            Some(a) if self.stride < 0 && self.has_high_bound() => a == self.high_bound(),
            _ => false,
        }
    }

    /// True when iteration has a first member.
    pub fn has_first(&self) -> bool {
        if self.stride > 0 {
            self.has_low_bound()
        } else {
            self.has_high_bound()
        }
    }

    /// True when iteration has a last member.
    pub fn has_last(&self) -> bool {
        if self.stride > 0 {
            self.has_high_bound()
        } else {
            self.has_low_bound()
        }
    }

    /// The first member in iteration order.
    pub fn first(&self) -> T {
        assert!(self.has_first(), "range has no first index");
        if self.stride > 0 {
            self.first_index
        } else {
            self.last_index - T::one()
        }
    }

    /// The last member in iteration order, snapped onto the stride lattice.
    pub fn last(&self) -> T {
        assert!(self.has_last(), "range has no last index");
        let first = self.first().to_ordinal();
        if self.stride > 0 {
            let high = self.high_bound().to_ordinal();
            T::from_ordinal(high - (high - first).rem_euclid(self.stride))
        } else {
            let low = self.low_bound().to_ordinal();
            T::from_ordinal(low + (first - low).rem_euclid(-self.stride))
        }
    }

    /// The smallest member (bounds-respecting view of the low end).
    pub fn low(&self) -> T {
        if self.stride > 0 {
            self.first()
        } else {
            self.last()
        }
    }

    /// The largest member (bounds-respecting view of the high end).
    pub fn high(&self) -> T {
        if self.stride > 0 {
            self.last()
        } else {
            self.first()
        }
    }

    /// The number of members. Requires both bounds.
    pub fn size(&self) -> i64 {
        assert!(self.is_bounded(), "size of an unbounded range");
        let step = self.stride.abs();
        let span = self.high_bound().to_ordinal() - self.low_bound().to_ordinal() + step;
        if span <= 0 {
            0
        } else {
            span / step
        }
    }

    /// True for a bounded range with no members.
    pub fn is_empty(&self) -> bool {
        self.is_bounded() && self.size() == 0
    }

    fn lattice_anchor(&self) -> Option<T> {
        if self.has_first() {
            Some(self.first())
        } else {
            self.alignment
        }
    }

    /// True when `idx` is a member.
    pub fn contains(&self, idx: T) -> bool {
        if self.has_low_bound() && idx < self.low_bound() {
            return false;
        }
        if self.has_high_bound() && idx > self.high_bound() {
            return false;
        }
        let step = self.stride.abs();
        if step == 1 {
            return true;
        }
        match self.lattice_anchor() {
            Some(anchor) => (idx.to_ordinal() - anchor.to_ordinal()).rem_euclid(step) == 0,
            // Ambiguous alignment: only the bounds can be checked.
            None => true,
        }
    }

    /// True when every member of `other` is a member of `self`.
    pub fn contains_range(&self, other: &Range<T>) -> bool {
        if other.is_bounded() {
            if other.is_empty() {
                return true;
            }
            return self.contains(other.first())
                && self.contains(other.last())
                && other.stride.abs() % self.stride.abs() == 0;
        }
        // An unbounded operand only fits inside a range that is at least as
        // unbounded on the same sides.
        if self.has_low_bound() && !other.has_low_bound() {
            return false;
        }
        if self.has_high_bound() && !other.has_high_bound() {
            return false;
        }
        other.stride.abs() % self.stride.abs() == 0
            && match (other.lattice_anchor(), self.lattice_anchor()) {
                (Some(a), Some(b)) => {
                    (a.to_ordinal() - b.to_ordinal()).rem_euclid(self.stride.abs()) == 0
                }
                _ => true,
            }
    }

    /// The ordinal of `idx` in iteration order, −1 when `idx` is not a
    /// member or the range has no first index.
    pub fn index_order(&self, idx: T) -> i64 {
        if !self.has_first() || !self.contains(idx) {
            return -1;
        }
        let first = self.first().to_ordinal();
        let i = idx.to_ordinal();
        if self.stride > 0 {
            (i - first) / self.stride
        } else {
            (first - i) / -self.stride
        }
    }

    /// The member at ordinal `order`. Aborts on a negative ordinal or, for
    /// bounded ranges, an ordinal at or past `size()`.
    pub fn order_to_index(&self, order: i64) -> T {
        assert!(order >= 0, "negative iteration order {order}");
        assert!(self.has_first(), "range has no first index");
        if self.is_bounded() {
            let size = self.size();
            assert!(
                order < size,
                "iteration order {order} out of range (size {size})"
            );
        }
        T::from_ordinal(self.first().to_ordinal() + order * self.stride)
    }

    /// Multiplies the stride by `step`, keeping the bounds. A negative
    /// `step` flips the iteration direction.
    pub fn by(&self, step: i64) -> Range<T> {
        assert!(step != 0, "range stride must be non-zero");
        Self::make(self.first_index, self.last_index, self.stride * step, self.kind)
    }

    /// Replaces the alignment.
    pub fn align(&self, alignment: T) -> Range<T> {
        Range {
            alignment: Some(alignment),
            ..*self
        }
    }

    /// Counts off `n` members: the first `n` when `n` is positive, the last
    /// `|n|` when negative. The counted end must be present.
    pub fn count(&self, n: i64) -> Range<T> {
        if n == 0 {
            return Self::make(T::one(), T::one(), self.stride, BoundedKind::Bounded);
        }
        if self.is_bounded() {
            let size = self.size();
            assert!(n.abs() <= size, "cannot count {n} indices out of {size}");
        }
        let (near, far) = if n > 0 {
            assert!(
                self.has_first(),
                "cannot count forward from a range without a first index"
            );
            let near = self.first().to_ordinal();
            (near, near + (n - 1) * self.stride)
        } else {
            assert!(
                self.has_last(),
                "cannot count back from a range without a last index"
            );
            let near = self.last().to_ordinal();
            (near, near - (-n - 1) * self.stride)
        };
        let (low, high) = if near <= far { (near, far) } else { (far, near) };
        Self::with_stride(T::from_ordinal(low), T::from_ordinal(high), self.stride)
    }

    /// Intersects the index sets of two ranges. A side left unbounded by
    /// one operand inherits the other's bound; the resulting stride is the
    /// least common multiple of the operand strides, directed like `self`,
    /// and the bounds are snapped onto the joint stride lattice. Disjoint
    /// lattices yield the empty range.
    pub fn slice(&self, other: &Range<T>) -> Range<T> {
        let first_index = match (self.has_low_bound(), other.has_low_bound()) {
            (true, true) => {
                if self.first_index >= other.first_index {
                    self.first_index
                } else {
                    other.first_index
                }
            }
            (true, false) => self.first_index,
            (false, true) => other.first_index,
            (false, false) => T::min_value(),
        };
        let last_index = match (self.has_high_bound(), other.has_high_bound()) {
            (true, true) => {
                if self.last_index <= other.last_index {
                    self.last_index
                } else {
                    other.last_index
                }
            }
            (true, false) => self.last_index,
            (false, true) => other.last_index,
            (false, false) => T::max_value(),
        };
        let kind = BoundedKind::of(
            self.has_low_bound() || other.has_low_bound(),
            self.has_high_bound() || other.has_high_bound(),
        );
        let step = lcm(self.stride.abs(), other.stride.abs());
        let stride = if self.stride > 0 { step } else { -step };

        let (Some(a), Some(b)) = (self.lattice_anchor(), other.lattice_anchor()) else {
            // An operand with ambiguous alignment constrains only its
            // bounds.
            return Self::make(first_index, last_index, stride, kind);
        };

        // A value on both operand lattices, found by walking self's
        // lattice; members repeat with period lcm, so step/|sa| candidates
        // cover every residue self can reach.
        let step_a = self.stride.abs();
        let step_b = other.stride.abs();
        let b_ord = b.to_ordinal();
        let mut joint = a.to_ordinal();
        let mut on_both = false;
        for _ in 0..step / step_a {
            if (joint - b_ord).rem_euclid(step_b) == 0 {
                on_both = true;
                break;
            }
            joint += step_a;
        }
        if !on_both {
            return Self::make(T::one(), T::one(), stride, BoundedKind::Bounded);
        }

        let first_index = if kind.has_low_bound() {
            let low = first_index.to_ordinal();
            T::from_ordinal(low + (joint - low).rem_euclid(step))
        } else {
            first_index
        };
        let last_index = if kind.has_high_bound() {
            let high = last_index.to_ordinal() - 1;
            T::from_ordinal(high - (high - joint).rem_euclid(step) + 1)
        } else {
            last_index
        };
        let sliced = Self::make(first_index, last_index, stride, kind);
        if sliced.alignment.is_none() {
            sliced.align(T::from_ordinal(joint))
        } else {
            sliced
        }
    }

    /// Iterates the members from `first()` by `stride`. Unbounded on the
    /// high side, this iterator never terminates.
    pub fn iter(&self) -> RangeIter<T> {
        assert!(
            self.is_iterable() && self.has_first(),
            "cannot iterate a range without a first index"
        );
        RangeIter {
            cursor: self.first().to_ordinal(),
            remaining: if self.is_bounded() {
                Some(self.size())
            } else {
                None
            },
            stride: self.stride,
            _marker: PhantomData,
        }
    }
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: i64, b: i64) -> i64 {
    a / gcd(a, b) * b
}

impl<T: IndexValue> std::ops::Add<T> for Range<T> {
    type Output = Range<T>;

    /// Translates both bounds up by `offset`.
    fn add(self, offset: T) -> Range<T> {
        let first = if self.has_low_bound() {
            self.first_index + offset
        } else {
            self.first_index
        };
        let last = if self.has_high_bound() {
            self.last_index + offset
        } else {
            self.last_index
        };
        Range::make(first, last, self.stride, self.kind)
    }
}

impl<T: IndexValue> std::ops::Sub<T> for Range<T> {
    type Output = Range<T>;

    /// Translates both bounds down by `offset`.
    fn sub(self, offset: T) -> Range<T> {
        let first = if self.has_low_bound() {
            self.first_index - offset
        } else {
            self.first_index
        };
        let last = if self.has_high_bound() {
            self.last_index - offset
        } else {
            self.last_index
        };
        Range::make(first, last, self.stride, self.kind)
    }
}

impl<T: IndexValue> From<std::ops::RangeInclusive<T>> for Range<T> {
    fn from(r: std::ops::RangeInclusive<T>) -> Self {
        Range::new(*r.start(), *r.end())
    }
}

impl<T: IndexValue> From<std::ops::Range<T>> for Range<T> {
    fn from(r: std::ops::Range<T>) -> Self {
        Range::new_open(r.start, r.end)
    }
}

/// Iterator over the members of a [`Range`].
pub struct RangeIter<T> {
    cursor: i64,
    remaining: Option<i64>,
    stride: i64,
    _marker: PhantomData<T>,
}

impl<T: IndexValue> Iterator for RangeIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(remaining) = &mut self.remaining {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        let value = self.cursor;
        self.cursor += self.stride;
        Some(T::from_ordinal(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(n) => (n as usize, Some(n as usize)),
            None => (usize::MAX, None),
        }
    }
}

impl<T: IndexValue> IntoIterator for Range<T> {
    type Item = T;
    type IntoIter = RangeIter<T>;

    fn into_iter(self) -> RangeIter<T> {
        self.iter()
    }
}

impl<T: IndexValue> IntoIterator for &Range<T> {
    type Item = T;
    type IntoIter = RangeIter<T>;

    fn into_iter(self) -> RangeIter<T> {
        self.iter()
    }
}

impl<T: IndexValue> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_low_bound() {
            write!(f, "{}", self.first_index)?;
        }
        write!(f, "..")?;
        if self.has_high_bound() {
            write!(f, "{}", self.last_index - T::one())?;
        }
        if self.stride != 1 {
            write!(f, " by {}", self.stride)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_bounds() {
        let r = Range::new(1, 10);
        assert!(r.has_first() && r.has_last());
        assert!(r.has_low_bound() && r.has_high_bound());
        assert_eq!(r.first(), 1);
        assert_eq!(r.last(), 10);
        assert_eq!(r.low_bound(), 1);
        assert_eq!(r.high_bound(), 10);
        assert_eq!(r.stride(), 1);
        assert_eq!(r.size(), 10);
        assert!(r.is_iterable());
        assert!(r.is_naturally_aligned());
    }

    #[test]
    fn test_open_bounds() {
        let r = Range::new_open(1, 10);
        assert_eq!(r.first(), 1);
        assert_eq!(r.last(), 9);
        assert_eq!(r.high_bound(), 9);
        assert_eq!(r.size(), 9);
    }

    #[test]
    fn test_negative_stride() {
        let r = Range::with_stride(1, 10, -1);
        assert_eq!(r.first(), 10);
        assert_eq!(r.last(), 1);
        assert_eq!(r.low_bound(), 1);
        assert_eq!(r.high_bound(), 10);
        assert_eq!(r.size(), 10);
        assert!(r.is_naturally_aligned());

        let r = Range::new(1, 10).by(-2);
        assert_eq!(r.first(), 10);
        assert_eq!(r.last(), 2);
        assert_eq!(r.size(), 5);
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![10, 8, 6, 4, 2]);
    }

    #[test]
    fn test_strided_last_snaps_to_lattice() {
        let r = Range::new(1, 10).by(2);
        assert_eq!(r.first(), 1);
        assert_eq!(r.last(), 9);
        assert_eq!(r.size(), 5);
        assert_eq!(r.low(), 1);
        assert_eq!(r.high(), 9);

        let r = Range::new(0, 9).by(3);
        assert_eq!(r.last(), 9);
        assert_eq!(r.size(), 4);
    }

    #[test]
    fn test_empty_range() {
        let r = Range::new(1, 0);
        assert_eq!(r.size(), 0);
        assert!(r.is_empty());
        assert_eq!(r.iter().count(), 0);

        let r: Range = Range::default();
        assert!(r.is_empty());
        assert!(r.is_bounded());
    }

    #[test]
    fn test_unbounded_kinds() {
        let r = Range::from_low(3);
        assert_eq!(r.bounded_kind(), BoundedKind::BoundedLow);
        assert!(r.is_iterable() && !r.is_bounded());
        assert!(r.has_first() && !r.has_last());
        assert_eq!(r.first(), 3);

        let r = Range::to_high(3);
        assert_eq!(r.bounded_kind(), BoundedKind::BoundedHigh);
        assert!(!r.is_iterable());
        assert!(!r.has_first());
        assert_eq!(r.high_bound(), 3);

        let r: Range = Range::unbounded();
        assert_eq!(r.bounded_kind(), BoundedKind::BoundedNone);
        assert!(r.is_ambiguous());
    }

    #[test]
    fn test_contains() {
        let r = Range::new(1, 10).by(2);
        assert!(r.contains(1));
        assert!(r.contains(9));
        assert!(!r.contains(2));
        assert!(!r.contains(0));
        assert!(!r.contains(11));

        let r = Range::from_low(5);
        assert!(r.contains(1_000_000));
        assert!(!r.contains(4));
    }

    #[test]
    fn test_contains_range() {
        let outer = Range::new(0, 20);
        assert!(outer.contains_range(&Range::new(5, 10)));
        assert!(outer.contains_range(&Range::new(0, 20).by(4)));
        assert!(!outer.contains_range(&Range::new(15, 25)));
        assert!(outer.contains_range(&Range::new(10, 5)));

        let even = Range::new(0, 20).by(2);
        assert!(even.contains_range(&Range::new(0, 20).by(4)));
        assert!(!even.contains_range(&Range::new(1, 9).by(2)));
    }

    #[test]
    fn test_index_order_round_trip() {
        let r = Range::new(1, 10);
        assert_eq!(r.index_order(4), 3);
        assert_eq!(r.order_to_index(3), 4);
        assert_eq!(r.index_order(11), -1);
        assert_eq!(r.index_order(0), -1);

        let r = Range::new(1, 10).by(-2);
        for (order, member) in r.iter().enumerate() {
            assert_eq!(r.index_order(member), order as i64);
            assert_eq!(r.order_to_index(order as i64), member);
        }
        assert_eq!(r.index_order(9), -1);
    }

    #[test]
    fn test_order_to_index_unbounded_low() {
        let r = Range::from_low(100);
        assert_eq!(r.order_to_index(0), 100);
        assert_eq!(r.order_to_index(41), 141);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_order_to_index_past_end_panics() {
        Range::new(1, 10).order_to_index(10);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_zero_stride_panics() {
        Range::new(1, 10).by(0);
    }

    #[test]
    fn test_by_composition() {
        let r = Range::new(1, 20).by(2).by(2);
        assert_eq!(r.stride(), 4);
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![1, 5, 9, 13, 17]);

        let r = Range::new(1, 10).by(-1).by(-1);
        assert_eq!(r.stride(), 1);
        assert_eq!(r.first(), 1);
    }

    #[test]
    fn test_align() {
        let r = Range::new(0, 10).by(2).align(1);
        assert_eq!(r.alignment(), Some(1));
        assert!(!r.is_naturally_aligned());
    }

    #[test]
    fn test_count() {
        let r = Range::new(1, 10);
        assert_eq!(r.count(3), Range::new(1, 3));
        assert_eq!(r.count(-3), Range::new(8, 10));
        assert!(r.count(0).is_empty());

        let r = Range::new(1, 10).by(2);
        let head = r.count(2);
        assert_eq!(head.iter().collect::<Vec<_>>(), vec![1, 3]);

        let r = Range::new(1, 10).by(-2);
        let head = r.count(2);
        assert_eq!(head.iter().collect::<Vec<_>>(), vec![10, 8]);

        let r = Range::from_low(5);
        assert_eq!(r.count(4), Range::new(5, 8));
    }

    #[test]
    fn test_slice_intersection() {
        let a = Range::new(0, 20);
        let b = Range::new(5, 30);
        assert_eq!(a.slice(&b), Range::new(5, 20));

        let s = Range::new(0, 20).by(2).slice(&Range::new(0, 20).by(3));
        assert_eq!(s.stride(), 6);
        assert_eq!(s.low_bound(), 0);
        assert_eq!(s.high_bound(), 18);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 6, 12, 18]);

        // An unbounded side inherits the other operand's bound.
        let s = Range::from_low(5).slice(&Range::new(0, 10));
        assert_eq!(s, Range::new(5, 10));
    }

    #[test]
    fn test_slice_members_belong_to_both_operands() {
        // A stride-1 operand restricts only the bounds; the low bound must
        // still land on the receiver's lattice.
        let evens = Range::new(0, 20).by(2);
        let s = evens.slice(&Range::new(1, 21));
        assert_eq!(s, Range::new(2, 20).by(2));
        for member in s.iter() {
            assert!(evens.contains(member));
        }

        // Offset lattices intersect where the congruences agree.
        let s = Range::new(1, 30).by(3).slice(&Range::new(0, 30).by(2));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![4, 10, 16, 22, 28]);

        // Direction comes from the receiver.
        let s = Range::new(1, 10).by(-2).slice(&Range::new(0, 10).by(2));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![10, 8, 6, 4, 2]);
    }

    #[test]
    fn test_slice_disjoint_lattices_is_empty() {
        let evens = Range::new(0, 20).by(2);
        let odds = Range::new(1, 21).by(2);
        assert!(evens.slice(&odds).is_empty());
        assert!(odds.slice(&evens).is_empty());
    }

    #[test]
    fn test_shift_operators() {
        let r = Range::new(1, 10) + 5;
        assert_eq!(r, Range::new(6, 15));
        let r = Range::new(6, 15) - 5;
        assert_eq!(r, Range::new(1, 10));

        let r = Range::from_low(3) + 2;
        assert_eq!(r.low_bound(), 5);
        assert!(!r.has_high_bound());
    }

    #[test]
    fn test_std_range_conversions() {
        let r: Range = (1..=10).into();
        assert_eq!(r, Range::new(1, 10));
        let r: Range = (0..4).into();
        assert_eq!(r, Range::new_open(0, 4));
    }

    #[test]
    fn test_iterate_unbounded_low() {
        let r = Range::from_low_by(10, 3);
        let members: Vec<i64> = r.iter().take(4).collect();
        assert_eq!(members, vec![10, 13, 16, 19]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Range::new(1, 10).to_string(), "1..10");
        assert_eq!(Range::new(1, 10).by(2).to_string(), "1..10 by 2");
        assert_eq!(Range::from_low(3).to_string(), "3..");
        assert_eq!(Range::to_high(7).to_string(), "..7");
        assert_eq!(Range::<i64>::unbounded().to_string(), "..");
    }

    #[test]
    fn test_unsigned_index_type() {
        let r = Range::<usize>::new(0, 3);
        assert_eq!(r.size(), 4);
        assert_eq!(r.low_bound(), 0);
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(r.index_order(2), 2);
    }
}
