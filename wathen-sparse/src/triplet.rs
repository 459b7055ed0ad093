//! Products with matrices stored as (row, column, value) triplets.
//!
//! Triplet data is allowed to contain the same coordinate several times. Such entries
//! are *summed*, never overwritten, so the kernels here can be used directly on the raw output
//! of element-by-element assembly.
use crate::cg::LinearOperator;
use crate::ShapeMismatch;
use itertools::izip;
use nalgebra::{ClosedAdd, ClosedMul, DVector, DVectorView, DVectorViewMut, Scalar};
use nalgebra_sparse::CooMatrix;
use num::Zero;
use std::error::Error;

/// Computes `y = A x` for the `nrows x ncols` matrix `A` given by the triplet arrays.
///
/// # Panics
///
/// Panics if the triplet arrays have different lengths, if `x` does not have length `ncols`
/// or if any index is out of bounds.
pub fn mv_triplet<'a, T>(
    nrows: usize,
    ncols: usize,
    rows: &[usize],
    cols: &[usize],
    values: &[T],
    x: impl Into<DVectorView<'a, T>>,
) -> DVector<T>
where
    T: Scalar + Zero + ClosedAdd + ClosedMul,
{
    let x = x.into();
    assert_eq!(x.len(), ncols, "Input vector length must match number of columns.");
    let mut y = DVector::zeros(nrows);
    spmv_triplet_into(&mut y, rows, cols, values, x);
    y
}

/// Overwrites `y` with `A x`, where `A` is given by the triplet arrays.
///
/// The triplets are visited in order, so the result does not depend on whether duplicate
/// coordinates are adjacent.
///
/// # Panics
///
/// Panics if the triplet arrays have different lengths or if any index is out of bounds
/// for `y` or `x`.
pub fn spmv_triplet_into<'a, 'b, T>(
    y: impl Into<DVectorViewMut<'a, T>>,
    rows: &[usize],
    cols: &[usize],
    values: &[T],
    x: impl Into<DVectorView<'b, T>>,
) where
    T: Scalar + Zero + ClosedAdd + ClosedMul,
{
    let mut y = y.into();
    let x = x.into();
    assert_eq!(rows.len(), cols.len(), "Row and column index arrays must have equal length.");
    assert_eq!(rows.len(), values.len(), "Index and value arrays must have equal length.");

    y.fill(T::zero());
    for (&i, &j, v) in izip!(rows, cols, values) {
        y[i] += v.clone() * x[j].clone();
    }
}

impl<T> LinearOperator<T> for CooMatrix<T>
where
    T: Scalar + Zero + ClosedAdd + ClosedMul,
{
    fn apply(&self, y: DVectorViewMut<T>, x: DVectorView<T>) -> Result<(), Box<dyn Error>> {
        ShapeMismatch::check(self.nrows(), self.ncols(), y.len(), x.len())?;
        spmv_triplet_into(y, self.row_indices(), self.col_indices(), self.values(), x);
        Ok(())
    }
}
