//! Index element types.
//!
//! Ranges and domains are generic over the integer type their members are
//! drawn from. [`IndexValue`] names the types that qualify and supplies the
//! conversions to the `i64` ordinal currency used by the order mappings,
//! plus the MIN/MAX sentinels that encode missing range bounds.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use num_traits::PrimInt;

/// An integer type usable as a range/domain index element.
pub trait IndexValue:
    PrimInt + Default + Display + Debug + Hash + Send + Sync + 'static
{
    /// Lossless view of this value as an iteration ordinal.
    fn to_ordinal(self) -> i64;

    /// Reconstructs a value from ordinal arithmetic.
    fn from_ordinal(ordinal: i64) -> Self;
}

macro_rules! impl_index_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IndexValue for $ty {
                #[inline]
                fn to_ordinal(self) -> i64 {
                    self as i64
                }

                #[inline]
                fn from_ordinal(ordinal: i64) -> Self {
                    ordinal as $ty
                }
            }
        )*
    };
}

impl_index_value!(i32, i64, isize, u32, u64, usize);
