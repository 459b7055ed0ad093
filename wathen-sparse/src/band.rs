//! General band storage.
use crate::cg::LinearOperator;
use crate::ShapeMismatch;
use nalgebra::{ClosedAdd, ClosedMul, DMatrix, DVectorView, DVectorViewMut, Scalar};
use num::Zero;
use std::cmp::min;
use std::error::Error;

/// A matrix whose non-zeros lie within a fixed number of diagonals.
///
/// Entry `(i, j)` with `-lower <= j - i <= upper` is stored in row `upper + i - j` and column `j`
/// of a dense `(lower + upper + 1) x ncols` array, so every column of the band array holds one
/// column of the matrix, top to bottom. Entries outside the band are structurally zero.
#[derive(Debug, Clone, PartialEq)]
pub struct BandMatrix<T: Scalar> {
    nrows: usize,
    lower: usize,
    upper: usize,
    band: DMatrix<T>,
}

impl<T: Scalar + Zero> BandMatrix<T> {
    pub fn zeros(nrows: usize, ncols: usize, lower: usize, upper: usize) -> Self {
        Self {
            nrows,
            lower,
            upper,
            band: DMatrix::zeros(lower + upper + 1, ncols),
        }
    }

    /// Returns the entry `(i, j)`, which is zero if it lies outside the band.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> T {
        assert!(i < self.nrows && j < self.ncols(), "Index out of bounds.");
        match self.band_index(i, j) {
            Some(idx) => self.band[idx].clone(),
            None => T::zero(),
        }
    }

    pub fn to_dense(&self) -> DMatrix<T> {
        let mut dense = DMatrix::zeros(self.nrows, self.ncols());
        for j in 0..self.ncols() {
            for i in self.column_range(j) {
                dense[(i, j)] = self.band[(self.upper + i - j, j)].clone();
            }
        }
        dense
    }
}

impl<T: Scalar> BandMatrix<T> {
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.band.ncols()
    }

    pub fn lower_bandwidth(&self) -> usize {
        self.lower
    }

    pub fn upper_bandwidth(&self) -> usize {
        self.upper
    }

    /// The underlying `(lower + upper + 1) x ncols` band array.
    pub fn band_storage(&self) -> &DMatrix<T> {
        &self.band
    }

    /// Whether `(i, j)` is a valid index that lies within the band.
    pub fn contains(&self, i: usize, j: usize) -> bool {
        i < self.nrows && j < self.ncols() && j <= i + self.upper && i <= j + self.lower
    }

    /// Mutable access to the stored entry `(i, j)`, or `None` if it lies outside the band.
    pub fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut T> {
        self.band_index(i, j).map(move |idx| &mut self.band[idx])
    }

    /// Adds `value` to the entry `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` lies outside the band.
    pub fn add_assign_at(&mut self, i: usize, j: usize, value: T)
    where
        T: ClosedAdd,
    {
        let (lower, upper) = (self.lower, self.upper);
        let entry = self
            .get_mut(i, j)
            .unwrap_or_else(|| panic!("Entry ({i}, {j}) lies outside band with bandwidths ({lower}, {upper})."));
        *entry += value;
    }

    fn band_index(&self, i: usize, j: usize) -> Option<(usize, usize)> {
        self.contains(i, j).then(|| (self.upper + i - j, j))
    }

    /// Rows of column `j` that lie within the band.
    fn column_range(&self, j: usize) -> std::ops::Range<usize> {
        j.saturating_sub(self.upper)..min(self.nrows, j + self.lower + 1)
    }
}

impl<T> LinearOperator<T> for BandMatrix<T>
where
    T: Scalar + Zero + ClosedAdd + ClosedMul,
{
    fn apply(&self, mut y: DVectorViewMut<T>, x: DVectorView<T>) -> Result<(), Box<dyn Error>> {
        ShapeMismatch::check(self.nrows, self.ncols(), y.len(), x.len())?;
        y.fill(T::zero());
        for j in 0..self.ncols() {
            let x_j = x[j].clone();
            for i in self.column_range(j) {
                y[i] += self.band[(self.upper + i - j, j)].clone() * x_j.clone();
            }
        }
        Ok(())
    }
}
