//! Assembly of Wathen matrices in different storage formats.
//!
//! All assemblers visit the elements in the order given by [`WathenGrid::element_indices`] and
//! draw exactly one density per element from the supplied generator. Two assemblers fed with
//! identically seeded generators therefore produce the same matrix, regardless of format.
use crate::element::{element_matrix, NUM_ELEMENT_NODES};
use crate::grid::WathenGrid;
use log::{debug, trace};
use nalgebra::{DMatrix, DVectorView, DVectorViewMut};
use nalgebra_sparse::{CooMatrix, CscMatrix};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use wathen_sparse::cg::LinearOperator;
use wathen_sparse::BandMatrix;

/// Element densities are drawn uniformly from `[0, MAX_DENSITY)`.
pub const MAX_DENSITY: f64 = 100.0;

/// Draws a single element density.
pub fn draw_density<R: Rng>(rng: &mut R) -> f64 {
    MAX_DENSITY * rng.gen::<f64>()
}

/// Calls `f` with the global node indices and the density of every element, in assembly order.
pub fn for_each_element<R, F>(grid: &WathenGrid, rng: &mut R, mut f: F)
where
    R: Rng,
    F: FnMut(&[usize; NUM_ELEMENT_NODES], f64),
{
    for (i, j) in grid.element_indices() {
        let rho = draw_density(rng);
        let nodes = grid.element_nodes(i, j);
        f(&nodes, rho);
    }
}

/// Assembles the Wathen matrix as a dense `n x n` matrix.
pub fn assemble_dense<R: Rng>(grid: &WathenGrid, rng: &mut R) -> DMatrix<f64> {
    let n = grid.order();
    let em = element_matrix();
    let mut matrix = DMatrix::zeros(n, n);

    for_each_element(grid, rng, |nodes, rho| {
        for (r, &node_r) in nodes.iter().enumerate() {
            for (c, &node_c) in nodes.iter().enumerate() {
                matrix[(node_r, node_c)] += rho * em[(r, c)];
            }
        }
    });

    debug!("Assembled dense Wathen matrix for {}x{} grid (order {n}).", grid.nx(), grid.ny());
    matrix
}

/// Assembles the Wathen matrix as unsummed triplets.
///
/// Every element contributes all 64 entries of its element matrix, so the result holds exactly
/// [`WathenGrid::triplet_size`] triplets and most coordinates appear several times. Duplicates
/// must be summed by the consumer, as done by [`wathen_sparse::mv_triplet`], the
/// [`LinearOperator`] implementation of [`CooMatrix`] and the conversions of `nalgebra-sparse`.
///
/// The triplets of an element are stored row by row of the element matrix.
pub fn assemble_triplet<R: Rng>(grid: &WathenGrid, rng: &mut R) -> CooMatrix<f64> {
    let n = grid.order();
    let nz = grid.triplet_size();
    let em = element_matrix();
    let mut rows = Vec::with_capacity(nz);
    let mut cols = Vec::with_capacity(nz);
    let mut values = Vec::with_capacity(nz);

    for_each_element(grid, rng, |nodes, rho| {
        for (r, &node_r) in nodes.iter().enumerate() {
            for (c, &node_c) in nodes.iter().enumerate() {
                rows.push(node_r);
                cols.push(node_c);
                values.push(rho * em[(r, c)]);
            }
        }
    });

    debug!(
        "Assembled {} triplets of Wathen matrix for {}x{} grid (order {n}).",
        values.len(),
        grid.nx(),
        grid.ny()
    );
    CooMatrix::try_from_triplets(n, n, rows, cols, values)
        .expect("Element node indices are always smaller than the matrix order")
}

/// Assembles the Wathen matrix in compressed sparse column format.
///
/// The triplets of [`assemble_triplet`] are converted to CSC, summing duplicate coordinates.
pub fn assemble_csc<R: Rng>(grid: &WathenGrid, rng: &mut R) -> CscMatrix<f64> {
    let coo = assemble_triplet(grid, rng);
    let csc = CscMatrix::from(&coo);
    trace!("Summed {} triplets into {} CSC entries.", coo.nnz(), csc.nnz());
    csc
}

/// Assembles the Wathen matrix in general band storage with the bandwidths of
/// [`WathenGrid::bandwidth`].
pub fn assemble_band<R: Rng>(grid: &WathenGrid, rng: &mut R) -> BandMatrix<f64> {
    let n = grid.order();
    let bandwidth = grid.bandwidth();
    let em = element_matrix();
    let mut matrix = BandMatrix::zeros(n, n, bandwidth.lower, bandwidth.upper);

    for_each_element(grid, rng, |nodes, rho| {
        for (r, &node_r) in nodes.iter().enumerate() {
            for (c, &node_c) in nodes.iter().enumerate() {
                matrix.add_assign_at(node_r, node_c, rho * em[(r, c)]);
            }
        }
    });

    debug!(
        "Assembled band Wathen matrix for {}x{} grid (order {n}, bandwidths {}/{}).",
        grid.nx(),
        grid.ny(),
        bandwidth.lower,
        bandwidth.upper
    );
    matrix
}

/// Storage formats a Wathen matrix can be assembled into.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageFormat {
    Dense,
    Triplet,
    Csc,
    Band,
}

impl StorageFormat {
    pub const ALL: [StorageFormat; 4] = [Self::Dense, Self::Triplet, Self::Csc, Self::Band];
}

/// A Wathen matrix in any of the supported storage formats.
///
/// All variants implement the same [`LinearOperator`], so a solver written against the
/// operator handles every format.
#[derive(Debug, Clone)]
pub enum WathenMatrix {
    Dense(DMatrix<f64>),
    Triplet(CooMatrix<f64>),
    Csc(CscMatrix<f64>),
    Band(BandMatrix<f64>),
}

/// Assembles the Wathen matrix in the requested format.
pub fn assemble<R: Rng>(grid: &WathenGrid, format: StorageFormat, rng: &mut R) -> WathenMatrix {
    match format {
        StorageFormat::Dense => WathenMatrix::Dense(assemble_dense(grid, rng)),
        StorageFormat::Triplet => WathenMatrix::Triplet(assemble_triplet(grid, rng)),
        StorageFormat::Csc => WathenMatrix::Csc(assemble_csc(grid, rng)),
        StorageFormat::Band => WathenMatrix::Band(assemble_band(grid, rng)),
    }
}

impl WathenMatrix {
    pub fn format(&self) -> StorageFormat {
        match self {
            Self::Dense(_) => StorageFormat::Dense,
            Self::Triplet(_) => StorageFormat::Triplet,
            Self::Csc(_) => StorageFormat::Csc,
            Self::Band(_) => StorageFormat::Band,
        }
    }

    /// Order of the (square) matrix.
    pub fn nrows(&self) -> usize {
        match self {
            Self::Dense(matrix) => matrix.nrows(),
            Self::Triplet(matrix) => matrix.nrows(),
            Self::Csc(matrix) => matrix.nrows(),
            Self::Band(matrix) => matrix.nrows(),
        }
    }

    /// Dense copy of the matrix, with duplicate triplets summed.
    pub fn to_dense(&self) -> DMatrix<f64> {
        match self {
            Self::Dense(matrix) => matrix.clone(),
            Self::Triplet(matrix) => DMatrix::from(matrix),
            Self::Csc(matrix) => DMatrix::from(matrix),
            Self::Band(matrix) => matrix.to_dense(),
        }
    }
}

impl LinearOperator<f64> for WathenMatrix {
    fn apply(&self, y: DVectorViewMut<f64>, x: DVectorView<f64>) -> Result<(), Box<dyn Error>> {
        match self {
            Self::Dense(matrix) => LinearOperator::apply(matrix, y, x),
            Self::Triplet(matrix) => LinearOperator::apply(matrix, y, x),
            Self::Csc(matrix) => LinearOperator::apply(matrix, y, x),
            Self::Band(matrix) => LinearOperator::apply(matrix, y, x),
        }
    }
}
