//! Conjugate Gradient solvers for Wathen systems, one per storage format.
//!
//! Each solver runs exactly `n` iterations of unpreconditioned CG for a matrix of order `n`,
//! starting from the given initial guess, and returns the final iterate. There is no
//! convergence test. Because of round-off, the result may still carry a noticeable error for
//! larger or badly conditioned systems; calling the solver again with the previous result as
//! the initial guess usually improves it. For a solver that iterates until a tolerance is met,
//! see [`cg_to_tolerance`](crate::sparse::cg::cg_to_tolerance).
//!
//! The matrix must be symmetric positive definite, which holds for every Wathen matrix.
//! This is not checked.
use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::{CooMatrix, CscMatrix};
use wathen_sparse::cg::{cg_fixed_steps, LinearOperator, SolveError};
use wathen_sparse::BandMatrix;

/// Solves `A x = b` for any operator with `n` fixed CG iterations, starting from `x0`.
///
/// Returns an error if `b` and `x0` have different lengths or if the operator cannot be
/// applied to vectors of that length.
pub fn cg<A>(a: &A, b: &DVector<f64>, x0: &DVector<f64>) -> Result<DVector<f64>, SolveError>
where
    A: ?Sized + LinearOperator<f64>,
{
    let mut x = x0.clone();
    cg_fixed_steps(a, b, &mut x)?;
    Ok(x)
}

pub fn cg_dense(a: &DMatrix<f64>, b: &DVector<f64>, x0: &DVector<f64>) -> Result<DVector<f64>, SolveError> {
    cg(a, b, x0)
}

pub fn cg_csc(a: &CscMatrix<f64>, b: &DVector<f64>, x0: &DVector<f64>) -> Result<DVector<f64>, SolveError> {
    cg(a, b, x0)
}

/// Duplicate triplets in `a` are summed in every matrix-vector product.
pub fn cg_triplet(a: &CooMatrix<f64>, b: &DVector<f64>, x0: &DVector<f64>) -> Result<DVector<f64>, SolveError> {
    cg(a, b, x0)
}

pub fn cg_band(a: &BandMatrix<f64>, b: &DVector<f64>, x0: &DVector<f64>) -> Result<DVector<f64>, SolveError> {
    cg(a, b, x0)
}
