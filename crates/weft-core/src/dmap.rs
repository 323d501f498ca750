//! Domain maps.
//!
//! A [`Distribution`] decides how a domain's indices are laid out and which
//! locale owns each index. Domains hold their concrete implementation
//! behind `Arc<dyn RectangularDom>`, so user code stays independent of the
//! layout strategy and new distributions plug in without touching the
//! `Domain` surface.
//!
//! [`DefaultDist`] is the single-locale layout: a dense row-major mapping
//! with every index owned by the creating locale.

use std::sync::Arc;

use crate::assoc::AssocDomain;
use crate::index::IndexValue;
use crate::locale::Locale;
use crate::range::Range;
use crate::tuple::Tuple;

/// The storage/layout strategy behind a rectangular domain.
pub trait RectangularDom<const N: usize, T: IndexValue>: Send + Sync {
    /// The per-dimension ranges.
    fn dims(&self) -> [Range<T>; N];

    /// The total number of indices.
    fn num_indices(&self) -> i64;

    /// Linearizes `idx` into the canonical iteration ordinal, −1 when
    /// `idx` is not a member.
    fn index_order(&self, idx: Tuple<T, N>) -> i64;

    /// The index at canonical iteration ordinal `order`.
    fn order_to_index(&self, order: i64) -> Tuple<T, N>;

    /// True when `idx` is a member.
    fn member(&self, idx: Tuple<T, N>) -> bool;

    /// The distribution that produced this domain.
    fn dist(&self) -> Arc<dyn Distribution<N, T>>;
}

/// A pluggable index-to-locale and layout strategy.
pub trait Distribution<const N: usize, T: IndexValue>: Send + Sync {
    /// Builds the concrete domain implementation for `ranges`.
    fn new_rectangular_dom(self: Arc<Self>, ranges: [Range<T>; N])
        -> Arc<dyn RectangularDom<N, T>>;

    /// The locale owning `idx`.
    fn index_to_locale(&self, idx: Tuple<T, N>) -> Locale;

    /// The locales this distribution targets.
    fn target_locales(&self) -> Vec<Locale>;

    /// True for layouts, i.e. distributions confined to a single locale.
    fn is_layout(&self) -> bool {
        false
    }

    /// True when `other` distributes indices identically.
    fn equals(&self, other: &dyn Distribution<N, T>) -> bool;
}

/// The single-locale default distribution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultDist {
    locale: Locale,
}

impl DefaultDist {
    /// A layout owned by `locale`.
    pub fn new(locale: Locale) -> Self {
        DefaultDist { locale }
    }

    /// Builds an empty associative domain laid out by this distribution.
    pub fn new_associative_dom<I: Ord + Clone>(&self) -> AssocDomain<I> {
        AssocDomain::new()
    }
}

impl<const N: usize, T: IndexValue> Distribution<N, T> for DefaultDist {
    fn new_rectangular_dom(
        self: Arc<Self>,
        ranges: [Range<T>; N],
    ) -> Arc<dyn RectangularDom<N, T>> {
        Arc::new(DefaultRectangularDom {
            dims: ranges,
            dist: self,
        })
    }

    fn index_to_locale(&self, _idx: Tuple<T, N>) -> Locale {
        self.locale
    }

    fn target_locales(&self) -> Vec<Locale> {
        vec![self.locale]
    }

    fn is_layout(&self) -> bool {
        true
    }

    fn equals(&self, other: &dyn Distribution<N, T>) -> bool {
        other.is_layout() && other.target_locales() == vec![self.locale]
    }
}

/// Dense row-major rectangular domain.
pub struct DefaultRectangularDom<const N: usize, T: IndexValue> {
    dims: [Range<T>; N],
    dist: Arc<DefaultDist>,
}

impl<const N: usize, T: IndexValue> RectangularDom<N, T> for DefaultRectangularDom<N, T> {
    fn dims(&self) -> [Range<T>; N] {
        self.dims
    }

    fn num_indices(&self) -> i64 {
        self.dims.iter().map(|r| r.size()).product()
    }

    fn index_order(&self, idx: Tuple<T, N>) -> i64 {
        // Row-major: outer dimensions vary slowest.
        let mut order = 0;
        for (dim, component) in self.dims.iter().zip(idx.0) {
            let component_order = dim.index_order(component);
            if component_order < 0 {
                return -1;
            }
            order = order * dim.size() + component_order;
        }
        order
    }

    fn order_to_index(&self, order: i64) -> Tuple<T, N> {
        let size = self.num_indices();
        assert!(
            order >= 0 && order < size,
            "iteration order {order} out of range (size {size})"
        );
        let mut remainder = order;
        let mut out = [T::zero(); N];
        for position in (0..N).rev() {
            let dim_size = self.dims[position].size();
            out[position] = self.dims[position].order_to_index(remainder % dim_size);
            remainder /= dim_size;
        }
        Tuple(out)
    }

    fn member(&self, idx: Tuple<T, N>) -> bool {
        self.dims
            .iter()
            .zip(idx.0)
            .all(|(dim, component)| dim.contains(component))
    }

    fn dist(&self) -> Arc<dyn Distribution<N, T>> {
        self.dist.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dist_is_layout() {
        let dist = Arc::new(DefaultDist::new(Locale::default()));
        assert!(Distribution::<2, i64>::is_layout(&*dist));
        assert_eq!(
            Distribution::<2, i64>::target_locales(&*dist),
            vec![Locale::default()]
        );
        assert_eq!(
            Distribution::<2, i64>::index_to_locale(&*dist, Tuple([3, 4])),
            Locale::default()
        );

        let other = DefaultDist::new(Locale::default());
        assert!(Distribution::<2, i64>::equals(&*dist, &other));
    }

    #[test]
    fn test_row_major_linearization() {
        let dist = Arc::new(DefaultDist::default());
        let dom: Arc<dyn RectangularDom<2, i64>> =
            dist.new_rectangular_dom([Range::new(0, 3), Range::new(0, 3)]);
        assert_eq!(dom.num_indices(), 16);
        assert_eq!(dom.index_order(Tuple([0, 0])), 0);
        assert_eq!(dom.index_order(Tuple([0, 3])), 3);
        assert_eq!(dom.index_order(Tuple([1, 0])), 4);
        assert_eq!(dom.index_order(Tuple([3, 3])), 15);
        assert_eq!(dom.index_order(Tuple([4, 0])), -1);
        assert_eq!(dom.order_to_index(6), Tuple([1, 2]));
    }

    #[test]
    fn test_strided_dims_round_trip() {
        let dist = Arc::new(DefaultDist::default());
        let dom: Arc<dyn RectangularDom<2, i64>> =
            dist.new_rectangular_dom([Range::new(1, 9).by(2), Range::with_stride(1, 10, -3)]);
        let size = dom.num_indices();
        for order in 0..size {
            let idx = dom.order_to_index(order);
            assert_eq!(dom.index_order(idx), order);
        }
    }

    #[test]
    fn test_associative_factory() {
        let dist = DefaultDist::default();
        let mut assoc = dist.new_associative_dom::<i64>();
        assoc.add(4);
        assert!(assoc.contains(&4));
    }
}
