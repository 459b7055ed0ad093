//! Linear algebra for Wathen matrices.
//!
//! The [`LinearOperator`](cg::LinearOperator) trait is the only thing the solvers in [`cg`] need
//! from a matrix. It is implemented for dense `nalgebra` matrices, for the compressed formats of
//! `nalgebra-sparse`, for [`CooMatrix`] (where duplicate entries are summed on the fly) and for
//! [`BandMatrix`].

use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

pub mod band;
pub mod cg;
pub mod triplet;

pub use band::BandMatrix;
pub use nalgebra_sparse::{CooMatrix, CscMatrix, CsrMatrix};
pub use triplet::{mv_triplet, spmv_triplet_into};

/// Reported by an operator when the input or output vector does not match its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMismatch {
    pub nrows: usize,
    pub ncols: usize,
    pub input_len: usize,
    pub output_len: usize,
}

impl ShapeMismatch {
    /// Returns an error if `output_len x input_len` is not compatible with `nrows x ncols`.
    pub fn check(nrows: usize, ncols: usize, output_len: usize, input_len: usize) -> Result<(), Self> {
        if nrows == output_len && ncols == input_len {
            Ok(())
        } else {
            Err(Self {
                nrows,
                ncols,
                input_len,
                output_len,
            })
        }
    }
}

impl Display for ShapeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot apply {}x{} operator to vector of length {} with output of length {}",
            self.nrows, self.ncols, self.input_len, self.output_len
        )
    }
}

impl Error for ShapeMismatch {}
