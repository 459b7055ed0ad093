//! Node numbering and size formulas for the rectangular serendipity grid.
//!
//! Nodes are numbered row by row from the bottom of the unit square to the top. Rows alternate
//! between *full* rows, which hold the `2 nx + 1` corner and midside nodes along horizontal element
//! edges, and *midside* rows, which hold the `nx + 1` midside nodes on vertical element edges:
//!
//! ```text
//!  8 -- 9 -- 10 - 11 - 12     full row
//!  |         |         |
//!  5         6         7      midside row
//!  |         |         |
//!  0 -- 1 -- 2 -- 3 -- 4      full row
//! ```
//!
//! This is the `2 x 1` grid. See [`WathenGrid::node_coordinates`] for the exact positions.
use crate::element::{NUM_ELEMENT_ENTRIES, NUM_ELEMENT_NODES};
use crate::Error;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Order of the Wathen matrix for an `nx x ny` grid, `3 nx ny + 2 nx + 2 ny + 1`.
///
/// This is the total number of nodes of the grid.
pub fn order(nx: usize, ny: usize) -> usize {
    3 * nx * ny + 2 * nx + 2 * ny + 1
}

/// Number of (row, column, value) triplets produced by element-wise assembly.
///
/// Every element contributes a full `8 x 8` block, so this counts duplicate coordinates.
pub fn triplet_size(nx: usize, ny: usize) -> usize {
    NUM_ELEMENT_ENTRIES * nx * ny
}

/// Bandwidths of the Wathen matrix for an `nx x ny` grid.
pub fn bandwidth(nx: usize, _ny: usize) -> Bandwidth {
    Bandwidth {
        lower: 3 * nx + 4,
        diagonal: 1,
        upper: 3 * nx + 4,
    }
}

/// Number of sub-diagonals, diagonals and super-diagonals that may hold non-zeros.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bandwidth {
    pub lower: usize,
    pub diagonal: usize,
    pub upper: usize,
}

impl Bandwidth {
    /// Total number of diagonals in the band.
    pub fn total(&self) -> usize {
        self.lower + self.diagonal + self.upper
    }
}

/// A rectangular grid of `nx x ny` serendipity elements covering the unit square.
///
/// Construction rejects empty grids, so every grid has a non-trivial matrix.
/// Deserialization goes through the same check.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridDimensions")]
pub struct WathenGrid {
    nx: usize,
    ny: usize,
}

#[derive(Deserialize)]
struct GridDimensions {
    nx: usize,
    ny: usize,
}

impl TryFrom<GridDimensions> for WathenGrid {
    type Error = Error;

    fn try_from(dims: GridDimensions) -> Result<Self, Self::Error> {
        Self::new(dims.nx, dims.ny)
    }
}

impl WathenGrid {
    pub fn new(nx: usize, ny: usize) -> Result<Self, Error> {
        if nx == 0 || ny == 0 {
            Err(Error::EmptyGrid { nx, ny })
        } else {
            Ok(Self { nx, ny })
        }
    }

    /// Number of elements in the horizontal direction.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of elements in the vertical direction.
    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn num_elements(&self) -> usize {
        self.nx * self.ny
    }

    /// Number of nodes, which is also the order of the matrix.
    pub fn order(&self) -> usize {
        order(self.nx, self.ny)
    }

    pub fn bandwidth(&self) -> Bandwidth {
        bandwidth(self.nx, self.ny)
    }

    pub fn triplet_size(&self) -> usize {
        triplet_size(self.nx, self.ny)
    }

    /// Element indices `(i, j)` in assembly order: `j` in the outer loop, `i` in the inner loop.
    pub fn element_indices(&self) -> impl Iterator<Item = (usize, usize)> {
        let (nx, ny) = (self.nx, self.ny);
        (0..ny).flat_map(move |j| (0..nx).map(move |i| (i, j)))
    }

    /// Global indices of the local nodes `0..8` of element `(i, j)`.
    ///
    /// See [`crate::element`] for the local node order.
    pub fn element_nodes(&self, i: usize, j: usize) -> [usize; NUM_ELEMENT_NODES] {
        debug_assert!(i < self.nx, "Element index i = {i} out of bounds for nx = {}", self.nx);
        debug_assert!(j < self.ny, "Element index j = {j} out of bounds for ny = {}", self.ny);

        // One-based element and node indices.
        let nx = self.nx;
        let (i1, j1) = (i + 1, j + 1);
        let top_right = 3 * j1 * nx + 2 * j1 + 2 * i1 + 1;
        let left = (3 * j1 - 1) * nx + 2 * j1 + i1 - 1;
        let bottom_left = (3 * j1 - 3) * nx + 2 * j1 + 2 * i1 - 3;

        [
            top_right,
            top_right - 1,
            top_right - 2,
            left,
            bottom_left,
            bottom_left + 1,
            bottom_left + 2,
            left + 1,
        ]
        .map(|node| node - 1)
    }

    /// Coordinates of all nodes in the unit square, in global node order.
    pub fn node_coordinates(&self) -> Vec<Point2<f64>> {
        let (nx, ny) = (self.nx, self.ny);
        let mut coords = Vec::with_capacity(self.order());
        for row in 0..=2 * ny {
            let y = row as f64 / (2 * ny) as f64;
            if row % 2 == 0 {
                coords.extend((0..=2 * nx).map(|col| Point2::new(col as f64 / (2 * nx) as f64, y)));
            } else {
                coords.extend((0..=nx).map(|col| Point2::new(col as f64 / nx as f64, y)));
            }
        }
        coords
    }
}
