//! Zippered iteration.
//!
//! [`zip`] pairs up to four loop targets into a single [`ZipRange`] that
//! yields tuples of their items at matching iteration ordinals. The zip is
//! iterable only if every component is, bounded as soon as one component
//! is, and its size is the shortest bounded component's size, so a bounded
//! range can be zipped against an open-ended counter.
//!
//! ## Example
//!
//! ```
//! use weft_core::{zip, Range};
//!
//! let pairs: Vec<_> = zip((Range::new(1, 3), Range::from_low(100))).iter().collect();
//! assert_eq!(pairs, vec![(1, 100), (2, 101), (3, 102)]);
//! ```

use crate::iterand::Iterand;

/// A heterogeneous tuple of loop targets advancing in lockstep.
#[derive(Clone, Copy, Debug)]
pub struct ZipRange<C> {
    components: C,
}

/// A tuple of [`Iterand`]s usable as zip components.
pub trait ZipComponents {
    /// The tuple of component items.
    type Item;

    /// True when every component is iterable.
    fn all_iterable(&self) -> bool;

    /// True when at least one component is bounded.
    fn any_bounded(&self) -> bool;

    /// The smallest bounded component size, `None` when none is bounded.
    fn min_bounded_size(&self) -> Option<i64>;

    /// The component items at ordinal `order`.
    fn item_at(&self, order: i64) -> Self::Item;
}

macro_rules! impl_zip_components {
    ($($component:ident . $position:tt),+) => {
        impl<$($component: Iterand),+> ZipComponents for ($($component,)+) {
            type Item = ($($component::Item,)+);

            fn all_iterable(&self) -> bool {
                $(self.$position.is_iterable())&&+
            }

            fn any_bounded(&self) -> bool {
                $(self.$position.is_bounded())||+
            }

            fn min_bounded_size(&self) -> Option<i64> {
                let mut size: Option<i64> = None;
                $(
                    if let Some(bound) = self.$position.bounded_size() {
                        size = Some(size.map_or(bound, |current| current.min(bound)));
                    }
                )+
                size
            }

            fn item_at(&self, order: i64) -> Self::Item {
                ($(self.$position.item_at(order),)+)
            }
        }
    };
}

impl_zip_components!(A.0, B.1);
impl_zip_components!(A.0, B.1, C.2);
impl_zip_components!(A.0, B.1, C.2, D.3);

/// Zips a tuple of loop targets. Aborts unless every component is
/// iterable.
pub fn zip<C: ZipComponents>(components: C) -> ZipRange<C> {
    assert!(
        components.all_iterable(),
        "all zippered objects need to be iterable"
    );
    ZipRange { components }
}

impl<C: ZipComponents> ZipRange<C> {
    /// True when every component is iterable. Holds by construction.
    pub fn is_iterable(&self) -> bool {
        self.components.all_iterable()
    }

    /// True when at least one component is bounded.
    pub fn is_bounded(&self) -> bool {
        self.components.any_bounded()
    }

    /// The length of the shortest bounded component. Requires a bounded
    /// component.
    pub fn size(&self) -> i64 {
        match self.components.min_bounded_size() {
            Some(size) => size,
            None => panic!("size of a zip with no bounded component"),
        }
    }

    /// The tuple of component items at ordinal `order`.
    pub fn item_at(&self, order: i64) -> C::Item {
        self.components.item_at(order)
    }

    /// Iterates the zipped items. Never terminates when no component is
    /// bounded.
    pub fn iter(&self) -> ZipIter<'_, C> {
        ZipIter {
            zip: self,
            order: 0,
            remaining: self.components.min_bounded_size(),
        }
    }
}

impl<C: ZipComponents> Iterand for ZipRange<C> {
    type Item = C::Item;

    fn is_iterable(&self) -> bool {
        self.components.all_iterable()
    }

    fn is_bounded(&self) -> bool {
        self.components.any_bounded()
    }

    fn bounded_size(&self) -> Option<i64> {
        self.components.min_bounded_size()
    }

    fn item_at(&self, order: i64) -> C::Item {
        self.components.item_at(order)
    }
}

/// Iterator over a [`ZipRange`].
pub struct ZipIter<'z, C> {
    zip: &'z ZipRange<C>,
    order: i64,
    remaining: Option<i64>,
}

impl<C: ZipComponents> Iterator for ZipIter<'_, C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        if let Some(remaining) = &mut self.remaining {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        let item = self.zip.item_at(self.order);
        self.order += 1;
        Some(item)
    }
}
