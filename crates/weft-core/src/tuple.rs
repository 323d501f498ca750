//! Fixed-size homogeneous tuples.
//!
//! [`Tuple`] is the index currency of rank-N domains and doubles as the
//! loopable tuple surface: element-wise arithmetic, lexicographic ordering,
//! indexing, and iteration. Heterogeneous aggregates are served by native
//! Rust tuples (see the zip module); `Tuple` covers the homogeneous case
//! where per-element iteration makes sense.

use std::fmt;
use std::ops::{Index, IndexMut};

/// A fixed-size homogeneous value aggregate.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Tuple<T, const N: usize>(pub [T; N]);

// Not derivable: std has no `Default` for generic `[T; N]`.
impl<T: Default, const N: usize> Default for Tuple<T, N> {
    fn default() -> Self {
        Tuple(std::array::from_fn(|_| T::default()))
    }
}

impl<T, const N: usize> Tuple<T, N> {
    /// Creates a tuple from its component array.
    pub const fn new(values: [T; N]) -> Self {
        Tuple(values)
    }

    /// The number of components.
    pub const fn size(&self) -> usize {
        N
    }

    /// Borrows the components as an array.
    pub const fn as_array(&self) -> &[T; N] {
        &self.0
    }

    /// Consumes the tuple, yielding its component array.
    pub fn into_array(self) -> [T; N] {
        self.0
    }

    /// Iterates over the components in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Applies `f` to every component.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Tuple<U, N> {
        Tuple(self.0.map(f))
    }

    /// Folds the components left to right.
    pub fn fold<A>(self, init: A, f: impl FnMut(A, T) -> A) -> A {
        self.0.into_iter().fold(init, f)
    }
}

impl<T: Copy, const N: usize> Tuple<T, N> {
    /// Adds `scalar` to every component.
    pub fn add_scalar(self, scalar: T) -> Self
    where
        T: std::ops::Add<Output = T>,
    {
        self.map(|v| v + scalar)
    }

    /// Subtracts `scalar` from every component.
    pub fn sub_scalar(self, scalar: T) -> Self
    where
        T: std::ops::Sub<Output = T>,
    {
        self.map(|v| v - scalar)
    }

    /// Multiplies every component by `scalar`.
    pub fn mul_scalar(self, scalar: T) -> Self
    where
        T: std::ops::Mul<Output = T>,
    {
        self.map(|v| v * scalar)
    }
}

impl<T, const N: usize> Index<usize> for Tuple<T, N> {
    type Output = T;

    fn index(&self, position: usize) -> &T {
        &self.0[position]
    }
}

impl<T, const N: usize> IndexMut<usize> for Tuple<T, N> {
    fn index_mut(&mut self, position: usize) -> &mut T {
        &mut self.0[position]
    }
}

impl<T, const N: usize> IntoIterator for Tuple<T, N> {
    type Item = T;
    type IntoIter = std::array::IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Tuple<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T, const N: usize> From<[T; N]> for Tuple<T, N> {
    fn from(values: [T; N]) -> Self {
        Tuple(values)
    }
}

impl<T> From<(T,)> for Tuple<T, 1> {
    fn from(t: (T,)) -> Self {
        Tuple([t.0])
    }
}

impl<T> From<(T, T)> for Tuple<T, 2> {
    fn from(t: (T, T)) -> Self {
        Tuple([t.0, t.1])
    }
}

impl<T> From<(T, T, T)> for Tuple<T, 3> {
    fn from(t: (T, T, T)) -> Self {
        Tuple([t.0, t.1, t.2])
    }
}

impl<T> From<(T, T, T, T)> for Tuple<T, 4> {
    fn from(t: (T, T, T, T)) -> Self {
        Tuple([t.0, t.1, t.2, t.3])
    }
}

macro_rules! impl_tuple_binop {
    ($($op:ident => $method:ident),* $(,)?) => {
        $(
            impl<T, const N: usize> std::ops::$op for Tuple<T, N>
            where
                T: std::ops::$op<Output = T> + Copy,
            {
                type Output = Tuple<T, N>;

                fn $method(self, rhs: Self) -> Self::Output {
                    let mut out = self.0;
                    for (slot, value) in out.iter_mut().zip(rhs.0) {
                        *slot = std::ops::$op::$method(*slot, value);
                    }
                    Tuple(out)
                }
            }
        )*
    };
}

impl_tuple_binop!(
    Add => add,
    Sub => sub,
    Mul => mul,
    Div => div,
    Rem => rem,
    BitAnd => bitand,
    BitOr => bitor,
    BitXor => bitxor,
    Shl => shl,
    Shr => shr,
);

impl<T: fmt::Display, const N: usize> fmt::Display for Tuple<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}
