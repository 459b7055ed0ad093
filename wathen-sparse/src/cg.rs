//! Unpreconditioned Conjugate Gradient solvers for symmetric positive definite systems.
//!
//! Two variants are provided, both working with any [`LinearOperator`] and both driven by a
//! [`CgWorkspace`]:
//!
//! - [`cg_fixed_steps`] (or [`CgWorkspace::solve_fixed_steps`]) runs exactly `n` iterations for an
//!   `n x n` system and never checks for convergence. In exact arithmetic CG terminates with the
//!   exact solution after at most `n` steps, and this solver relies on that property.
//! - [`cg_to_tolerance`] (or [`CgWorkspace::solve_to_tolerance`]) iterates until the recurrence
//!   residual satisfies `||r|| <= tol ||b||`, giving up after `max_iter` iterations.
//!
//! Both use the same update: `alpha = p.r / p.Ap` and `beta = -r.Ap / p.Ap`.
//! Neither solver checks that the operator is symmetric. For an operator that is not
//! symmetric positive definite, the fixed-step solver silently returns a meaningless vector.
use crate::ShapeMismatch;
use core::fmt;
use nalgebra::base::constraint::AreMultipliable;
use nalgebra::constraint::{DimEq, ShapeConstraint};
use nalgebra::storage::Storage;
use nalgebra::{ClosedAdd, ClosedMul, DVector, DVectorView, DVectorViewMut, Dim, Dyn, Matrix, RealField, Scalar, U1};
use nalgebra_sparse::ops::serial::{spmm_csc_dense, spmm_csr_dense};
use nalgebra_sparse::ops::Op;
use nalgebra_sparse::{CscMatrix, CsrMatrix};
use num::{One, Zero};
use std::error::Error;

/// A linear map `y = A x`.
///
/// Implementations overwrite the whole of `y` and report an error if the vector lengths do not
/// match the shape of the operator.
pub trait LinearOperator<T: Scalar> {
    fn apply(&self, y: DVectorViewMut<T>, x: DVectorView<T>) -> Result<(), Box<dyn Error>>;
}

impl<'a, T, A> LinearOperator<T> for &'a A
where
    T: Scalar,
    A: ?Sized + LinearOperator<T>,
{
    fn apply(&self, y: DVectorViewMut<T>, x: DVectorView<T>) -> Result<(), Box<dyn Error>> {
        <A as LinearOperator<T>>::apply(self, y, x)
    }
}

impl<T, R, C, S> LinearOperator<T> for Matrix<T, R, C, S>
where
    T: Scalar + One + Zero + ClosedMul + ClosedAdd,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
    ShapeConstraint: DimEq<Dyn, R> + DimEq<C, Dyn> + AreMultipliable<R, C, Dyn, U1>,
{
    fn apply(&self, mut y: DVectorViewMut<T>, x: DVectorView<T>) -> Result<(), Box<dyn Error>> {
        ShapeMismatch::check(self.nrows(), self.ncols(), y.len(), x.len())?;
        y.gemv(T::one(), self, &x, T::zero());
        Ok(())
    }
}

impl<T> LinearOperator<T> for CsrMatrix<T>
where
    T: Scalar + Zero + One + ClosedMul + ClosedAdd,
{
    fn apply(&self, mut y: DVectorViewMut<T>, x: DVectorView<T>) -> Result<(), Box<dyn Error>> {
        ShapeMismatch::check(self.nrows(), self.ncols(), y.len(), x.len())?;
        spmm_csr_dense(T::zero(), &mut y, T::one(), Op::NoOp(self), Op::NoOp(&x));
        Ok(())
    }
}

impl<T> LinearOperator<T> for CscMatrix<T>
where
    T: Scalar + Zero + One + ClosedMul + ClosedAdd,
{
    fn apply(&self, mut y: DVectorViewMut<T>, x: DVectorView<T>) -> Result<(), Box<dyn Error>> {
        ShapeMismatch::check(self.nrows(), self.ncols(), y.len(), x.len())?;
        spmm_csc_dense(T::zero(), &mut y, T::one(), Op::NoOp(self), Op::NoOp(&x));
        Ok(())
    }
}

/// Summary of a successful solve.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CgStats<T> {
    /// Number of updates made to the solution vector.
    pub iterations: usize,
    /// Norm of the residual maintained by the CG recurrence when the solver stopped.
    ///
    /// Round-off makes it drift away from the true residual `||b - A x||` over many iterations.
    pub residual_norm: T,
}

/// Scratch vectors for the CG solvers.
///
/// Reusing a workspace across solves avoids reallocating the buffers. The contents of the
/// workspace never influence the result of a solve.
#[derive(Debug, Clone)]
pub struct CgWorkspace<T: Scalar> {
    r: DVector<T>,
    p: DVector<T>,
    ap: DVector<T>,
}

impl<T: Scalar + Zero> Default for CgWorkspace<T> {
    fn default() -> Self {
        Self {
            r: DVector::zeros(0),
            p: DVector::zeros(0),
            ap: DVector::zeros(0),
        }
    }
}

impl<T: RealField> CgWorkspace<T> {
    /// Runs exactly `n` CG iterations on the `n x n` system `A x = b`, starting from the guess
    /// stored in `x`, and leaves the final iterate in `x`.
    ///
    /// The only early exit happens when `p^T A p` is exactly zero, in which case the current
    /// iterate is kept. This guards against division by zero, not against near-breakdown.
    /// If the result is not accurate enough because of round-off, solving again with the
    /// previous result as the initial guess usually helps.
    pub fn solve_fixed_steps<'b, A>(
        &mut self,
        operator: &A,
        b: impl Into<DVectorView<'b, T>>,
        x: impl Into<DVectorViewMut<'b, T>>,
    ) -> Result<CgStats<T>, SolveError>
    where
        A: ?Sized + LinearOperator<T>,
    {
        let b = b.into();
        let mut x = x.into();
        self.start(operator, &b, &x)?;

        let n = x.len();
        let mut iterations = 0;
        while iterations < n {
            let p_ap = self
                .curvature(operator)
                .map_err(|err| SolveError::new(iterations, SolveErrorKind::Operator(err)))?;
            if p_ap == T::zero() {
                break;
            }
            self.advance(&mut x, p_ap);
            iterations += 1;
        }

        Ok(CgStats {
            iterations,
            residual_norm: self.r.norm(),
        })
    }

    /// Iterates CG on `A x = b`, starting from the guess stored in `x`, until the recurrence
    /// residual satisfies `||r|| <= tol ||b||`.
    ///
    /// A zero right-hand side gives the zero solution without iterating. Fails with
    /// [`SolveErrorKind::NotConverged`] once `max_iter` iterations have been made without
    /// meeting the tolerance, and with [`SolveErrorKind::NotPositiveDefinite`] if a search
    /// direction with `p^T A p <= 0` comes up. In both cases `x` holds the last iterate.
    pub fn solve_to_tolerance<'b, A>(
        &mut self,
        operator: &A,
        b: impl Into<DVectorView<'b, T>>,
        x: impl Into<DVectorViewMut<'b, T>>,
        tol: T,
        max_iter: usize,
    ) -> Result<CgStats<T>, SolveError>
    where
        A: ?Sized + LinearOperator<T>,
    {
        let b = b.into();
        let mut x = x.into();
        self.start(operator, &b, &x)?;

        let b_norm = b.norm();
        if b_norm == T::zero() {
            x.fill(T::zero());
            return Ok(CgStats {
                iterations: 0,
                residual_norm: T::zero(),
            });
        }

        let threshold = tol * b_norm;
        let mut iterations = 0;
        loop {
            let residual_norm = self.r.norm();
            if residual_norm <= threshold {
                return Ok(CgStats {
                    iterations,
                    residual_norm,
                });
            }
            if iterations == max_iter {
                return Err(SolveError::new(iterations, SolveErrorKind::NotConverged { max_iter }));
            }

            let p_ap = self
                .curvature(operator)
                .map_err(|err| SolveError::new(iterations, SolveErrorKind::Operator(err)))?;
            if p_ap <= T::zero() {
                return Err(SolveError::new(iterations, SolveErrorKind::NotPositiveDefinite));
            }
            self.advance(&mut x, p_ap);
            iterations += 1;
        }
    }

    /// Sizes the buffers and sets `r = b - A x`, `p = r`.
    fn start<A>(&mut self, operator: &A, b: &DVectorView<T>, x: &DVectorViewMut<T>) -> Result<(), SolveError>
    where
        A: ?Sized + LinearOperator<T>,
    {
        let n = x.len();
        if b.len() != n {
            let kind = SolveErrorKind::DimensionMismatch {
                b_len: b.len(),
                x_len: n,
            };
            return Err(SolveError::new(0, kind));
        }

        self.r.resize_vertically_mut(n, T::zero());
        self.p.resize_vertically_mut(n, T::zero());
        self.ap.resize_vertically_mut(n, T::zero());

        LinearOperator::apply(operator, (&mut self.ap).into(), x.into())
            .map_err(|err| SolveError::new(0, SolveErrorKind::Operator(err)))?;
        self.r.copy_from(b);
        self.r -= &self.ap;
        self.p.copy_from(&self.r);
        Ok(())
    }

    /// Computes `Ap` and returns `p^T A p`.
    fn curvature<A>(&mut self, operator: &A) -> Result<T, Box<dyn Error>>
    where
        A: ?Sized + LinearOperator<T>,
    {
        LinearOperator::apply(operator, (&mut self.ap).into(), (&self.p).into())?;
        Ok(self.p.dot(&self.ap))
    }

    /// Moves `x` along `p`, updates the residual and picks the next search direction.
    fn advance(&mut self, x: &mut DVectorViewMut<T>, p_ap: T) {
        let alpha = self.p.dot(&self.r) / p_ap.clone();
        x.axpy(alpha.clone(), &self.p, T::one());
        self.r.axpy(-alpha, &self.ap, T::one());
        let beta = -self.r.dot(&self.ap) / p_ap;
        self.p.axpy(T::one(), &self.r, beta);
    }
}

/// Solves `A x = b` with exactly `n` CG iterations, starting from the guess stored in `x`.
///
/// See [`CgWorkspace::solve_fixed_steps`].
pub fn cg_fixed_steps<'b, T, A>(
    operator: &A,
    b: impl Into<DVectorView<'b, T>>,
    x: impl Into<DVectorViewMut<'b, T>>,
) -> Result<CgStats<T>, SolveError>
where
    T: RealField,
    A: ?Sized + LinearOperator<T>,
{
    CgWorkspace::default().solve_fixed_steps(operator, b, x)
}

/// Solves `A x = b` by CG until `||r|| <= tol ||b||`, starting from the guess stored in `x`.
///
/// See [`CgWorkspace::solve_to_tolerance`].
pub fn cg_to_tolerance<'b, T, A>(
    operator: &A,
    b: impl Into<DVectorView<'b, T>>,
    x: impl Into<DVectorViewMut<'b, T>>,
    tol: T,
    max_iter: usize,
) -> Result<CgStats<T>, SolveError>
where
    T: RealField,
    A: ?Sized + LinearOperator<T>,
{
    CgWorkspace::default().solve_to_tolerance(operator, b, x, tol, max_iter)
}

#[derive(Debug)]
#[non_exhaustive]
pub enum SolveErrorKind {
    /// The operator could not be applied to the vectors.
    Operator(Box<dyn Error>),
    DimensionMismatch { b_len: usize, x_len: usize },
    /// A search direction with `p^T A p <= 0` was found.
    NotPositiveDefinite,
    /// The tolerance was not met within the iteration limit.
    NotConverged { max_iter: usize },
}

impl fmt::Display for SolveErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator(err) => write!(f, "failed to apply operator: {err}"),
            Self::DimensionMismatch { b_len, x_len } => {
                write!(f, "right-hand side has length {b_len}, but solution vector has length {x_len}")
            }
            Self::NotPositiveDefinite => write!(f, "operator is not positive definite"),
            Self::NotConverged { max_iter } => write!(f, "no convergence within {max_iter} iterations"),
        }
    }
}

/// A failed CG solve, with the number of iterations made before the failure.
#[derive(Debug)]
pub struct SolveError {
    pub iterations: usize,
    pub kind: SolveErrorKind,
}

impl SolveError {
    fn new(iterations: usize, kind: SolveErrorKind) -> Self {
        Self { iterations, kind }
    }
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CG failed after {} iterations: {}", self.iterations, self.kind)
    }
}

impl Error for SolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            SolveErrorKind::Operator(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
