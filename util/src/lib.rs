use nalgebra::storage::Storage;
use nalgebra::{Matrix, RealField};

/// Poor man's approx assertion for matrices
#[macro_export]
macro_rules! assert_approx_matrix_eq {
    ($x:expr, $y:expr, abstol = $tol:expr) => {{
        let diff = $x - $y;

        let max_absdiff = diff.abs().max();
        let approx_eq = max_absdiff <= $tol;

        if !approx_eq {
            println!("abstol: {:e}", $tol);
            println!("left: {}", $x);
            println!("right: {}", $y);
            println!("diff: {:e}", diff);
        }
        assert!(approx_eq);
    }};
    ($x:expr, $y:expr, reltol = $tol:expr) => {{
        let rel_error = $crate::relative_error($x, $y);
        let approx_eq = rel_error <= $tol;

        if !approx_eq {
            println!("reltol: {:e}", $tol);
            println!("relative error: {:e}", rel_error);
            println!("left: {}", $x);
            println!("right: {}", $y);
        }
        assert!(approx_eq);
    }};
}

#[macro_export]
macro_rules! assert_panics {
    ($e:expr) => {{
        use std::panic::catch_unwind;
        use std::stringify;
        let expr_string = stringify!($e);
        let result = catch_unwind(|| $e);
        if result.is_ok() {
            panic!("assert_panics!({}) failed.", expr_string);
        }
    }};
}

/// Relative error `||x - reference|| / ||reference||` of a vector.
///
/// Falls back to the absolute error `||x||` when the reference is zero.
pub fn relative_error<T, S1, S2>(
    x: &Matrix<T, nalgebra::Dyn, nalgebra::U1, S1>,
    reference: &Matrix<T, nalgebra::Dyn, nalgebra::U1, S2>,
) -> T
where
    T: RealField,
    S1: Storage<T, nalgebra::Dyn, nalgebra::U1>,
    S2: Storage<T, nalgebra::Dyn, nalgebra::U1>,
{
    assert_eq!(x.len(), reference.len(), "Vectors must have the same length.");
    let diff_norm = (x - reference).norm();
    let reference_norm = reference.norm();
    if reference_norm == T::zero() {
        diff_norm
    } else {
        diff_norm / reference_norm
    }
}

/// The residual norm `||A x - b||` for a dense system.
pub fn residual_norm<T, S1, S2, S3>(
    a: &Matrix<T, nalgebra::Dyn, nalgebra::Dyn, S1>,
    x: &Matrix<T, nalgebra::Dyn, nalgebra::U1, S2>,
    b: &Matrix<T, nalgebra::Dyn, nalgebra::U1, S3>,
) -> T
where
    T: RealField,
    S1: Storage<T, nalgebra::Dyn, nalgebra::Dyn>,
    S2: Storage<T, nalgebra::Dyn, nalgebra::U1>,
    S3: Storage<T, nalgebra::Dyn, nalgebra::U1>,
{
    let ax = a * x;
    let r = ax - b;
    if r.is_empty() {
        T::zero()
    } else {
        r.norm()
    }
}
