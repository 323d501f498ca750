//! Domain-backed arrays.
//!
//! An [`Array`] stores one element per index of a rectangular [`Domain`],
//! flat and in canonical row-major order. Indexing goes through the
//! domain's order mapping, so whatever the domain's bounds and strides,
//! element `i` of the storage is the element of the `i`-th index in
//! canonical iteration order.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::domain::Domain;
use crate::error::{Error, Result};
use crate::index::IndexValue;
use crate::iterand::Iterand;
use crate::range::Range;
use crate::tuple::Tuple;

/// A dense rank-N array over a rectangular domain.
#[derive(Clone, Debug, PartialEq)]
pub struct Array<T, const N: usize, I: IndexValue = i64> {
    domain: Domain<N, I>,
    data: Vec<T>,
}

impl<T: Clone + Default, const N: usize, I: IndexValue> Array<T, N, I> {
    /// An array over `domain` with every element default-initialized.
    pub fn new(domain: Domain<N, I>) -> Self {
        let data = vec![T::default(); domain.size() as usize];
        Array { domain, data }
    }
}

impl<T: Clone, const N: usize, I: IndexValue> Array<T, N, I> {
    /// An array over `domain` with every element set to `value`.
    pub fn filled(domain: Domain<N, I>, value: T) -> Self {
        let data = vec![value; domain.size() as usize];
        Array { domain, data }
    }

    /// Overwrites every element with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T, const N: usize, I: IndexValue> Array<T, N, I> {
    /// Adopts `data` as the storage for `domain`. The length must equal
    /// the domain's size.
    pub fn from_vec(domain: Domain<N, I>, data: Vec<T>) -> Result<Self> {
        if data.len() as i64 != domain.size() {
            return Err(Error::StorageSizeMismatch {
                expected: domain.size(),
                actual: data.len() as i64,
            });
        }
        Ok(Array { domain, data })
    }

    /// The domain this array is defined over.
    pub fn domain(&self) -> &Domain<N, I> {
        &self.domain
    }

    /// The number of elements.
    pub fn size(&self) -> i64 {
        self.data.len() as i64
    }

    /// The rank.
    pub fn rank(&self) -> usize {
        N
    }

    /// The element at `idx`, `None` when `idx` is outside the domain.
    pub fn get(&self, idx: impl Into<Tuple<I, N>>) -> Option<&T> {
        let order = self.domain.index_order(idx);
        if order < 0 {
            return None;
        }
        self.data.get(order as usize)
    }

    /// The element at canonical iteration ordinal `order`.
    pub fn at(&self, order: i64) -> &T {
        &self.data[order as usize]
    }

    /// Mutable access by canonical iteration ordinal.
    pub fn at_mut(&mut self, order: i64) -> &mut T {
        &mut self.data[order as usize]
    }

    /// Iterates the elements in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Mutably iterates the elements in canonical order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// The flat storage in canonical order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Array<T, 2> {
    /// Builds a rank-2 array from nested rows over the zero-based domain
    /// `{0..<rows, 0..<cols}`. All rows must have the same length.
    pub fn from_nested(rows: Vec<Vec<T>>) -> Result<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != col_count {
                return Err(Error::RaggedInitializer {
                    row,
                    expected: col_count,
                    actual: values.len(),
                });
            }
        }
        let domain = Domain::new([
            Range::new_open(0, row_count as i64),
            Range::new_open(0, col_count as i64),
        ]);
        let mut data = Vec::with_capacity(row_count * col_count);
        for values in rows {
            data.extend(values);
        }
        Ok(Array { domain, data })
    }
}

impl<T> Array<T, 3> {
    /// Builds a rank-3 array from nested planes over the zero-based domain
    /// `{0..<planes, 0..<rows, 0..<cols}`. All planes and rows must agree
    /// on their lengths.
    pub fn from_nested3(planes: Vec<Vec<Vec<T>>>) -> Result<Self> {
        let plane_count = planes.len();
        let row_count = planes.first().map_or(0, Vec::len);
        let col_count = planes
            .first()
            .and_then(|p| p.first())
            .map_or(0, Vec::len);
        for (plane, rows) in planes.iter().enumerate() {
            if rows.len() != row_count {
                return Err(Error::RaggedInitializer {
                    row: plane,
                    expected: row_count,
                    actual: rows.len(),
                });
            }
            for (row, values) in rows.iter().enumerate() {
                if values.len() != col_count {
                    return Err(Error::RaggedInitializer {
                        row: plane * row_count + row,
                        expected: col_count,
                        actual: values.len(),
                    });
                }
            }
        }
        let domain = Domain::new([
            Range::new_open(0, plane_count as i64),
            Range::new_open(0, row_count as i64),
            Range::new_open(0, col_count as i64),
        ]);
        let mut data = Vec::with_capacity(plane_count * row_count * col_count);
        for rows in planes {
            for values in rows {
                data.extend(values);
            }
        }
        Ok(Array { domain, data })
    }
}

impl<T, const N: usize, I: IndexValue> Index<Tuple<I, N>> for Array<T, N, I> {
    type Output = T;

    fn index(&self, idx: Tuple<I, N>) -> &T {
        let order = self.domain.index_order(idx);
        assert!(order >= 0, "index {idx} outside array domain {}", self.domain);
        &self.data[order as usize]
    }
}

impl<T, const N: usize, I: IndexValue> IndexMut<Tuple<I, N>> for Array<T, N, I> {
    fn index_mut(&mut self, idx: Tuple<I, N>) -> &mut T {
        let order = self.domain.index_order(idx);
        assert!(order >= 0, "index {idx} outside array domain {}", self.domain);
        &mut self.data[order as usize]
    }
}

impl<T, const N: usize, I: IndexValue> Index<[I; N]> for Array<T, N, I> {
    type Output = T;

    fn index(&self, idx: [I; N]) -> &T {
        &self[Tuple(idx)]
    }
}

impl<T, const N: usize, I: IndexValue> IndexMut<[I; N]> for Array<T, N, I> {
    fn index_mut(&mut self, idx: [I; N]) -> &mut T {
        &mut self[Tuple(idx)]
    }
}

impl<T, I: IndexValue> Index<I> for Array<T, 1, I> {
    type Output = T;

    fn index(&self, idx: I) -> &T {
        &self[Tuple([idx])]
    }
}

impl<T, I: IndexValue> IndexMut<I> for Array<T, 1, I> {
    fn index_mut(&mut self, idx: I) -> &mut T {
        &mut self[Tuple([idx])]
    }
}

impl<'a, T, const N: usize, I: IndexValue> IntoIterator for &'a Array<T, N, I> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: Clone + Send, const N: usize, I: IndexValue> Iterand for Array<T, N, I> {
    type Item = T;

    fn is_iterable(&self) -> bool {
        true
    }

    fn is_bounded(&self) -> bool {
        true
    }

    fn bounded_size(&self) -> Option<i64> {
        Some(self.size())
    }

    fn item_at(&self, order: i64) -> T {
        self.data[order as usize].clone()
    }
}

impl<T: fmt::Display, const N: usize, I: IndexValue> fmt::Display for Array<T, N, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = self.domain.dims()[N - 1].size().max(1);
        for (position, value) in self.data.iter().enumerate() {
            if position > 0 {
                if position as i64 % row == 0 {
                    writeln!(f)?;
                } else {
                    write!(f, " ")?;
                }
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fill() {
        let a: Array<i64, 2> = Array::new(Domain::new([Range::new(0, 2), Range::new(0, 2)]));
        assert_eq!(a.size(), 9);
        assert!(a.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_filled_and_fill() {
        let d = Domain::new([Range::new(1, 4)]);
        let mut a = Array::filled(d, 7);
        assert!(a.iter().all(|&v| v == 7));
        a.fill(3);
        assert!(a.iter().all(|&v| v == 3));
    }

    #[test]
    fn test_from_vec_validates_length() -> Result<()> {
        let d = Domain::new([Range::new(0, 3)]);
        let a = Array::from_vec(d.clone(), vec![1, 2, 3, 4])?;
        assert_eq!(a[2], 3);

        let err = Array::from_vec(d, vec![1, 2]).unwrap_err();
        assert!(matches!(
            err,
            Error::StorageSizeMismatch {
                expected: 4,
                actual: 2
            }
        ));
        Ok(())
    }

    #[test]
    fn test_indexing_follows_domain_bounds() -> Result<()> {
        let d = Domain::new([Range::new(1, 2), Range::new(1, 3)]);
        let a = Array::from_vec(d, (1..=6).collect())?;
        assert_eq!(a[Tuple([1, 1])], 1);
        assert_eq!(a[[1, 3]], 3);
        assert_eq!(a[[2, 1]], 4);
        assert_eq!(a[[2, 3]], 6);
        assert_eq!(a.get((2, 4)), None);
        Ok(())
    }

    #[test]
    fn test_rank1_scalar_indexing() -> Result<()> {
        let d = Domain::new([Range::new(5, 8)]);
        let mut a = Array::from_vec(d, vec![10, 20, 30, 40])?;
        assert_eq!(a[5], 10);
        assert_eq!(a[8], 40);
        a[6] = 99;
        assert_eq!(a.at(1), &99);
        Ok(())
    }

    #[test]
    #[should_panic(expected = "outside array domain")]
    fn test_out_of_domain_index_panics() {
        let a: Array<i64, 1> = Array::new(Domain::new([Range::new(0, 3)]));
        let _ = a[7];
    }

    #[test]
    fn test_from_nested() -> Result<()> {
        let a = Array::from_nested(vec![vec![1, 2, 3], vec![4, 5, 6]])?;
        assert_eq!(a.domain().shape(), Tuple([2, 3]));
        assert_eq!(a[[0, 2]], 3);
        assert_eq!(a[[1, 0]], 4);

        let err = Array::from_nested(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert!(matches!(err, Error::RaggedInitializer { row: 1, .. }));
        Ok(())
    }

    #[test]
    fn test_from_nested3() -> Result<()> {
        let a = Array::from_nested3(vec![
            vec![vec![1, 2], vec![3, 4]],
            vec![vec![5, 6], vec![7, 8]],
        ])?;
        assert_eq!(a.domain().shape(), Tuple([2, 2, 2]));
        assert_eq!(a[[0, 0, 0]], 1);
        assert_eq!(a[[1, 1, 0]], 7);
        assert_eq!(a.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        Ok(())
    }

    #[test]
    fn test_iteration_matches_canonical_order() -> Result<()> {
        let d = Domain::new([Range::new(0, 1), Range::new(0, 1)]);
        let a = Array::from_vec(d.clone(), vec![1, 2, 3, 4])?;
        let by_domain: Vec<i64> = d.iter().map(|idx| a[idx]).collect();
        let by_storage: Vec<i64> = a.iter().copied().collect();
        assert_eq!(by_domain, by_storage);
        Ok(())
    }

    #[test]
    fn test_strided_domain_array() -> Result<()> {
        let d = Domain::new([Range::new(1, 9).by(2)]);
        let a = Array::from_vec(d, vec![1, 3, 5, 7, 9])?;
        assert_eq!(a[5], 5);
        assert_eq!(a.get((4,)), None);
        Ok(())
    }

    #[test]
    fn test_display() -> Result<()> {
        let a = Array::from_nested(vec![vec![1, 2], vec![3, 4]])?;
        assert_eq!(a.to_string(), "1 2\n3 4");
        Ok(())
    }
}
