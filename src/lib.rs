//! Wathen finite element test matrices.
//!
//! A Wathen matrix is assembled from the integer element mass matrix of the 8-node serendipity
//! quadrilateral over a rectangular grid of `nx x ny` elements, where every element is weighted
//! by a random density drawn uniformly from `[0, 100)`. The result is a sparse, symmetric positive definite matrix of order
//! `3 nx ny + 2 nx + 2 ny + 1`, commonly used to exercise linear solvers.
//!
//! The same matrix can be assembled into four storage formats (see [`assembly`]):
//! dense, triplets with duplicate coordinates, compressed sparse column and general band.
//! All of them can be handed to the Conjugate Gradient solvers in [`solve`].
//!
//! Randomness is always supplied by the caller, so a seeded generator reproduces the same
//! matrix in every format:
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use wathen::{assemble_csc, assemble_dense, WathenGrid};
//!
//! let grid = WathenGrid::new(3, 2).unwrap();
//! let dense = assemble_dense(&grid, &mut StdRng::seed_from_u64(7));
//! let csc = assemble_csc(&grid, &mut StdRng::seed_from_u64(7));
//! assert_eq!(dense.nrows(), 29);
//! assert_eq!(csc.nrows(), 29);
//! ```

use std::fmt;
use std::fmt::{Display, Formatter};

pub mod assembly;
pub mod element;
pub mod grid;
pub mod solve;

pub mod sparse {
    pub use wathen_sparse::*;
}

#[cfg(feature = "proptest")]
pub mod proptest;

pub extern crate nalgebra;
pub extern crate nalgebra_sparse;

pub use assembly::{assemble, assemble_band, assemble_csc, assemble_dense, assemble_triplet, StorageFormat, WathenMatrix};
pub use grid::{bandwidth, order, triplet_size, Bandwidth, WathenGrid};
pub use solve::{cg, cg_band, cg_csc, cg_dense, cg_triplet};
pub use wathen_sparse::mv_triplet;

/// Library-wide error type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A grid must have at least one element in each direction.
    EmptyGrid { nx: usize, ny: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { nx, ny } => {
                write!(f, "Grid must have at least one element in each direction, got {nx} x {ny}")
            }
        }
    }
}

impl std::error::Error for Error {}
